/*
 * collaborators.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Interfaces to content loading and serialization.
 */

//! Seams between the export pipeline and document processing.
//!
//! Parsing a document, serializing it to Word, and rendering it to LaTeX
//! all happen behind these traits. The pipeline only moves their results
//! to the right place. Implementations that call external tools should do
//! so through the async methods of [`SystemRuntime`], so that sibling
//! exports keep running meanwhile.

use std::path::Path;

use async_trait::async_trait;
use folio_system_runtime::SystemRuntime;
use folio_tex::TexTemplateImports;
use serde_json::Value;

use crate::error::Result;
use crate::frontmatter::Frontmatter;

/// A loaded document
#[derive(Debug, Clone, Default)]
pub struct DocumentContent {
    /// Document tree (format owned by the loader)
    pub tree: Value,
    pub frontmatter: Frontmatter,
    /// Footnote definitions referenced from the tree
    pub footnotes: Vec<Value>,
}

/// Everything a Word serializer needs
#[derive(Debug, Clone, Copy)]
pub struct DocxDocument<'a> {
    pub tree: &'a Value,
    pub footnotes: &'a [Value],
    pub title: Option<&'a str>,
    pub authors: &'a [String],
}

/// LaTeX body plus the packages and macros it requires
#[derive(Debug, Clone, Default)]
pub struct RenderedTex {
    pub body: String,
    pub imports: TexTemplateImports,
}

#[async_trait]
pub trait ContentLoader: Send + Sync {
    async fn load(&self, runtime: &dyn SystemRuntime, file: &Path) -> Result<DocumentContent>;
}

#[async_trait]
pub trait DocxSerializer: Send + Sync {
    /// Produce the bytes of a `.docx` file
    async fn serialize(
        &self,
        runtime: &dyn SystemRuntime,
        doc: &DocxDocument<'_>,
    ) -> Result<Vec<u8>>;
}

#[async_trait]
pub trait TexRenderer: Send + Sync {
    async fn render(
        &self,
        runtime: &dyn SystemRuntime,
        content: &DocumentContent,
    ) -> Result<RenderedTex>;
}
