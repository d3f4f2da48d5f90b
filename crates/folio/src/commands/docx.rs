/*
 * docx.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Word export command
 */

use std::path::PathBuf;

use anyhow::Result;
use folio_core::{WordExportOptions, local_article_to_word};

use super::{check_input, native_session, run_export};

/// Arguments for the docx command
#[derive(Debug)]
pub struct DocxArgs {
    pub file: PathBuf,
    pub filename: Option<String>,
    pub clean: bool,
}

impl DocxArgs {
    fn options(&self) -> WordExportOptions {
        WordExportOptions {
            filename: self.filename.clone(),
            clean: self.clean,
        }
    }
}

/// Execute the docx command
pub fn execute(args: DocxArgs) -> Result<()> {
    let session = native_session()?;
    check_input(&session, &args.file)?;
    let opts = args.options();
    run_export(&args.file, local_article_to_word(&session, &args.file, &opts))
}
