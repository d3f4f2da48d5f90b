/*
 * pdf.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * PDF exports via an intermediate tex export.
 */

use std::path::{Path, PathBuf};

use crate::batch::{BatchReport, resolve_and_log_errors};
use crate::build::{PdfBuildOptions, create_pdf_given_tex_export};
use crate::error::Result;
use crate::export::collect_article_exports;
use crate::export::tex::run_tex_export;
use crate::format::ExportFormat;
use crate::project::ProjectContext;
use crate::resolve::ResolvedExport;
use crate::session::ExportSession;

/// Environment variable replacing the latexmk invocation
pub const PDF_COMMAND_ENV: &str = "FOLIO_PDF_COMMAND";

#[derive(Debug, Clone, Default)]
pub struct PdfExportOptions {
    pub filename: Option<String>,
    pub clean: bool,
    /// Copy compiler logs next to the PDF
    pub logs: bool,
    pub template_dir: Option<PathBuf>,
    /// Compile command with `{tex}` and `{log}` placeholders
    pub pdf_command: Option<String>,
}

/// Render `file` to tex in a private folder, then build the PDF from it.
pub async fn run_pdf_export(
    session: &ExportSession,
    file: &Path,
    export: &ResolvedExport,
    project: &ProjectContext,
    opts: &PdfExportOptions,
) -> Result<()> {
    let runtime = session.runtime.as_ref();
    let stem = export
        .output
        .file_stem()
        .map_or_else(|| "export".to_string(), |s| s.to_string_lossy().into_owned());

    // Removed once the PDF has been built
    let tex_dir = runtime.temp_dir("folio-tex-")?;
    let tex_export = ResolvedExport {
        format: ExportFormat::Tex,
        output: tex_dir.path().join(format!("{stem}.tex")),
        template: export.template.clone(),
        spec: export.spec.clone(),
    };
    let template = run_tex_export(session, file, &tex_export, project, false).await?;

    let command = match &opts.pdf_command {
        Some(command) => Some(command.clone()),
        None => runtime.env_get(PDF_COMMAND_ENV)?,
    };
    let build = PdfBuildOptions {
        copy_logs: opts.logs,
        clean: opts.clean,
        command,
    };
    create_pdf_given_tex_export(
        runtime,
        &tex_export.output,
        &export.output,
        template.as_ref(),
        &build,
    )
    .await
}

/// Export `file` to every PDF output its front matter declares.
pub async fn local_article_to_pdf(
    session: &ExportSession,
    file: &Path,
    opts: &PdfExportOptions,
) -> Result<BatchReport> {
    let article = collect_article_exports(
        session,
        file,
        ExportFormat::Pdf,
        opts.filename.as_deref(),
        opts.template_dir.clone(),
    )?;
    let report = resolve_and_log_errors(
        article
            .exports
            .iter()
            .map(|export| run_pdf_export(session, &article.file, export, &article.project, opts)),
    )
    .await;
    Ok(report)
}
