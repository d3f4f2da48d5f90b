/*
 * pdf.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * PDF export command
 */

use std::path::PathBuf;

use anyhow::Result;
use folio_core::{PdfExportOptions, local_article_to_pdf};
use tracing::debug;

use super::{check_input, native_session, run_export};

/// Arguments for the pdf command
#[derive(Debug)]
pub struct PdfArgs {
    pub file: PathBuf,
    pub filename: Option<String>,
    pub clean: bool,
    /// Copy LaTeX logs next to each PDF
    pub logs: bool,
    pub template_dir: Option<PathBuf>,
    /// Overrides `FOLIO_PDF_COMMAND` and latexmk
    pub pdf_command: Option<String>,
}

impl PdfArgs {
    fn options(&self) -> PdfExportOptions {
        PdfExportOptions {
            filename: self.filename.clone(),
            clean: self.clean,
            logs: self.logs,
            template_dir: self.template_dir.clone(),
            pdf_command: self.pdf_command.clone(),
        }
    }
}

/// Execute the pdf command
pub fn execute(args: PdfArgs) -> Result<()> {
    let session = native_session()?;
    check_input(&session, &args.file)?;
    let opts = args.options();
    debug!("PDF export options: {opts:?}");
    run_export(&args.file, local_article_to_pdf(&session, &args.file, &opts))
}
