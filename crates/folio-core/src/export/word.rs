/*
 * word.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Word (.docx) exports.
 */

use std::path::Path;

use tracing::info;

use crate::batch::{BatchReport, resolve_and_log_errors};
use crate::build::clean_output;
use crate::collaborators::DocxDocument;
use crate::error::Result;
use crate::export::{collect_article_exports, ensure_parent};
use crate::format::ExportFormat;
use crate::resolve::ResolvedExport;
use crate::session::ExportSession;

#[derive(Debug, Clone, Default)]
pub struct WordExportOptions {
    /// Single output file, overriding the declared exports
    pub filename: Option<String>,
    /// Remove previous outputs first
    pub clean: bool,
}

/// Write one `.docx` export of `file`.
pub async fn run_word_export(
    session: &ExportSession,
    file: &Path,
    export: &ResolvedExport,
    clean: bool,
) -> Result<()> {
    let runtime = session.runtime.as_ref();
    let output = &export.output;
    if clean {
        clean_output(runtime, output)?;
    }

    let content = session.loader.load(runtime, file).await?;
    let doc = DocxDocument {
        tree: &content.tree,
        footnotes: &content.footnotes,
        title: content.frontmatter.title.as_deref(),
        authors: &content.frontmatter.authors,
    };
    let buffer = session.docx.serialize(runtime, &doc).await?;

    info!("Writing docx to {}", output.display());
    ensure_parent(session, output)?;
    runtime.file_write(output, &buffer)?;
    Ok(())
}

/// Export `file` to every Word output its front matter declares.
pub async fn local_article_to_word(
    session: &ExportSession,
    file: &Path,
    opts: &WordExportOptions,
) -> Result<BatchReport> {
    let article = collect_article_exports(
        session,
        file,
        ExportFormat::Docx,
        opts.filename.as_deref(),
        None,
    )?;
    let report = resolve_and_log_errors(
        article
            .exports
            .iter()
            .map(|export| run_word_export(session, &article.file, export, opts.clean)),
    )
    .await;
    Ok(report)
}
