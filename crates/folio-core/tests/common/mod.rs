/*
 * tests/common/mod.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Shared fixtures for folio-core integration tests.
 */

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use folio_core::frontmatter::{parse_frontmatter, split_frontmatter};
use folio_core::{
    ContentLoader, DocumentContent, DocxDocument, DocxSerializer, ExportSession, Frontmatter,
    RenderedTex, Result, TexRenderer,
};
use folio_system_runtime::{NativeRuntime, SystemRuntime};
use folio_tex::TexTemplateImports;
use serde_json::json;

/// Document engine that needs no external tools.
///
/// The "tree" is the raw body text; Word output is a JSON summary and LaTeX
/// output is the body verbatim.
pub struct FakeEngine;

#[async_trait]
impl ContentLoader for FakeEngine {
    async fn load(&self, runtime: &dyn SystemRuntime, file: &Path) -> Result<DocumentContent> {
        let text = runtime.file_read_string(file)?;
        let (yaml, body) = split_frontmatter(&text);
        let frontmatter = match yaml {
            Some(yaml) => parse_frontmatter(yaml, file)?,
            None => Frontmatter::default(),
        };
        Ok(DocumentContent {
            tree: json!({ "body": body }),
            frontmatter,
            footnotes: vec![json!("a footnote")],
        })
    }
}

#[async_trait]
impl DocxSerializer for FakeEngine {
    async fn serialize(
        &self,
        _runtime: &dyn SystemRuntime,
        doc: &DocxDocument<'_>,
    ) -> Result<Vec<u8>> {
        let summary = json!({
            "title": doc.title,
            "authors": doc.authors,
            "tree": doc.tree,
            "footnotes": doc.footnotes,
        });
        Ok(serde_json::to_vec(&summary)?)
    }
}

#[async_trait]
impl TexRenderer for FakeEngine {
    async fn render(
        &self,
        _runtime: &dyn SystemRuntime,
        content: &DocumentContent,
    ) -> Result<RenderedTex> {
        let body = content.tree["body"].as_str().unwrap_or_default().to_string();
        Ok(RenderedTex {
            body,
            imports: TexTemplateImports::new().with_import("graphicx"),
        })
    }
}

/// Like [`FakeEngine`], but Word output passes through a slow external
/// command, as a real converter would.
pub struct PipedEngine {
    pub delay_secs: u32,
}

#[async_trait]
impl ContentLoader for PipedEngine {
    async fn load(&self, runtime: &dyn SystemRuntime, file: &Path) -> Result<DocumentContent> {
        FakeEngine.load(runtime, file).await
    }
}

#[async_trait]
impl DocxSerializer for PipedEngine {
    async fn serialize(
        &self,
        runtime: &dyn SystemRuntime,
        doc: &DocxDocument<'_>,
    ) -> Result<Vec<u8>> {
        let input = FakeEngine.serialize(runtime, doc).await?;
        let script = format!("sleep {}; cat", self.delay_secs);
        Ok(runtime.exec_pipe("sh", &["-c", &script], &input).await?)
    }
}

#[async_trait]
impl TexRenderer for PipedEngine {
    async fn render(
        &self,
        runtime: &dyn SystemRuntime,
        content: &DocumentContent,
    ) -> Result<RenderedTex> {
        FakeEngine.render(runtime, content).await
    }
}

/// Session over the real filesystem with `cwd` as the caller's directory
pub fn session(cwd: &Path) -> ExportSession {
    ExportSession::new(Arc::new(NativeRuntime::new()), Arc::new(FakeEngine))
        .unwrap()
        .with_cwd(cwd)
}

/// Write `contents` to `dir/name`, creating folders, and return the path
pub fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, contents).unwrap();
    path
}
