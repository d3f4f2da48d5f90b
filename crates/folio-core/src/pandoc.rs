/*
 * pandoc.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Pandoc-backed content loading and serialization.
 */

//! Pandoc as the document engine.
//!
//! Front matter is split off and read by folio itself; the remaining body is
//! parsed to Pandoc's JSON AST, which is then written out as Word or LaTeX.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use folio_system_runtime::SystemRuntime;
use folio_tex::TexTemplateImports;
use serde_json::{Value, json};
use tracing::debug;

use crate::collaborators::{
    ContentLoader, DocumentContent, DocxDocument, DocxSerializer, RenderedTex, TexRenderer,
};
use crate::error::{ExportError, Result};
use crate::frontmatter::{Frontmatter, parse_frontmatter, split_frontmatter};

/// Environment variable locating the pandoc binary
pub const PANDOC_ENV: &str = "FOLIO_PANDOC";

/// Packages implied by commands pandoc emits in LaTeX output
const PACKAGE_TRIGGERS: &[(&str, &str)] = &[
    ("\\includegraphics", "graphicx"),
    ("\\href", "hyperref"),
    ("\\url", "hyperref"),
    ("\\begin{longtable}", "longtable"),
    ("\\toprule", "booktabs"),
    ("\\begin{align", "amsmath"),
    ("\\text{", "amsmath"),
    ("\\mathbb", "amssymb"),
    ("\\textcolor", "xcolor"),
    ("\\st{", "soul"),
    ("\\begin{Shaded}", "fancyvrb"),
];

#[derive(Debug, Clone)]
pub struct PandocContent {
    pandoc: PathBuf,
}

impl PandocContent {
    pub fn new(pandoc: impl Into<PathBuf>) -> Self {
        Self {
            pandoc: pandoc.into(),
        }
    }

    /// Locate pandoc through `FOLIO_PANDOC` or `PATH`
    pub fn discover(runtime: &dyn SystemRuntime) -> Result<Self> {
        runtime
            .find_binary("pandoc", PANDOC_ENV)
            .map(Self::new)
            .ok_or_else(|| {
                ExportError::Collaborator(format!(
                    "pandoc not found; install it or set {PANDOC_ENV}"
                ))
            })
    }

    async fn run(
        &self,
        runtime: &dyn SystemRuntime,
        args: &[&str],
        input: &[u8],
    ) -> Result<Vec<u8>> {
        let program = self.pandoc.to_string_lossy();
        debug!("Running {program} {}", args.join(" "));
        runtime
            .exec_pipe(&program, args, input)
            .await
            .map_err(|err| ExportError::Collaborator(format!("pandoc failed: {err}")))
    }
}

#[async_trait]
impl ContentLoader for PandocContent {
    async fn load(&self, runtime: &dyn SystemRuntime, file: &Path) -> Result<DocumentContent> {
        let text = runtime.file_read_string(file)?;
        let (yaml, body) = split_frontmatter(&text);
        let frontmatter = match yaml {
            Some(yaml) => parse_frontmatter(yaml, file)?,
            None => Frontmatter::default(),
        };

        let json = self
            .run(runtime, &["-f", "markdown", "-t", "json"], body.as_bytes())
            .await?;
        let tree: Value = serde_json::from_slice(&json)?;

        // Pandoc keeps notes inline, so there are no separate definitions
        Ok(DocumentContent {
            tree,
            frontmatter,
            footnotes: Vec::new(),
        })
    }
}

#[async_trait]
impl DocxSerializer for PandocContent {
    async fn serialize(
        &self,
        runtime: &dyn SystemRuntime,
        doc: &DocxDocument<'_>,
    ) -> Result<Vec<u8>> {
        let tree = with_title_block(doc.tree, doc.title, doc.authors, doc.footnotes);
        let input = serde_json::to_vec(&tree)?;
        self.run(runtime, &["-f", "json", "-t", "docx", "-o", "-"], &input)
            .await
    }
}

#[async_trait]
impl TexRenderer for PandocContent {
    async fn render(
        &self,
        runtime: &dyn SystemRuntime,
        content: &DocumentContent,
    ) -> Result<RenderedTex> {
        let input = serde_json::to_vec(&content.tree)?;
        let out = self
            .run(runtime, &["-f", "json", "-t", "latex"], &input)
            .await?;
        let body = String::from_utf8_lossy(&out).into_owned();
        let imports = detect_imports(&body);
        Ok(RenderedTex { body, imports })
    }
}

/// Put title and authors into the document metadata and append footnotes.
fn with_title_block(tree: &Value, title: Option<&str>, authors: &[String], footnotes: &[Value]) -> Value {
    let mut tree = tree.clone();
    if let Some(root) = tree.as_object_mut() {
        let meta = root.entry("meta").or_insert_with(|| json!({}));
        if let Some(meta) = meta.as_object_mut() {
            if let Some(title) = title {
                meta.insert("title".into(), json!({ "t": "MetaString", "c": title }));
            }
            if !authors.is_empty() {
                let list: Vec<Value> = authors
                    .iter()
                    .map(|a| json!({ "t": "MetaString", "c": a }))
                    .collect();
                meta.insert("author".into(), json!({ "t": "MetaList", "c": list }));
            }
        }
        if !footnotes.is_empty()
            && let Some(blocks) = root.get_mut("blocks").and_then(Value::as_array_mut)
        {
            blocks.extend(footnotes.iter().cloned());
        }
    }
    tree
}

/// Packages a LaTeX body needs, judged by the commands it uses.
pub fn detect_imports(body: &str) -> TexTemplateImports {
    let mut imports = TexTemplateImports::new();
    for (trigger, package) in PACKAGE_TRIGGERS {
        if body.contains(trigger) {
            imports.imports.insert((*package).to_string());
        }
    }
    imports
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_imports() {
        let imports = detect_imports("See \\href{x}{y} and \\includegraphics{a.png} with $\\mathbb{R}$");
        let found: Vec<_> = imports.imports.iter().map(String::as_str).collect();
        assert_eq!(found, vec!["amssymb", "graphicx", "hyperref"]);
        assert!(imports.commands.is_empty());
        assert!(detect_imports("plain text").is_empty());
    }

    #[test]
    fn test_title_block_added_to_meta() {
        let tree = json!({ "pandoc-api-version": [1, 23], "meta": {}, "blocks": [] });
        let note = json!({ "t": "Para", "c": [] });
        let out = with_title_block(&tree, Some("Paper"), &["Ada".to_string()], &[note.clone()]);
        assert_eq!(out["meta"]["title"]["c"], "Paper");
        assert_eq!(out["meta"]["author"]["c"][0]["c"], "Ada");
        assert_eq!(out["blocks"][0], note);
    }

    #[test]
    fn test_title_block_leaves_tree_without_title() {
        let tree = json!({ "meta": {}, "blocks": [] });
        assert_eq!(with_title_block(&tree, None, &[], &[]), tree);
    }
}
