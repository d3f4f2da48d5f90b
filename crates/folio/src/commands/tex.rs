/*
 * tex.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * LaTeX export command
 */

use std::path::PathBuf;

use anyhow::Result;
use folio_core::{TexExportOptions, local_article_to_tex};

use super::{check_input, native_session, run_export};

/// Arguments for the tex command
#[derive(Debug)]
pub struct TexArgs {
    pub file: PathBuf,
    pub filename: Option<String>,
    pub clean: bool,
    pub template_dir: Option<PathBuf>,
}

impl TexArgs {
    fn options(&self) -> TexExportOptions {
        TexExportOptions {
            filename: self.filename.clone(),
            clean: self.clean,
            template_dir: self.template_dir.clone(),
        }
    }
}

/// Execute the tex command
pub fn execute(args: TexArgs) -> Result<()> {
    let session = native_session()?;
    check_input(&session, &args.file)?;
    let opts = args.options();
    run_export(&args.file, local_article_to_tex(&session, &args.file, &opts))
}
