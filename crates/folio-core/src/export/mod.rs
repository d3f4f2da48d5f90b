/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Export orchestration for single documents.
 */

//! Exporting a single document.
//!
//! Every `local_article_to_*` entry point follows the same steps:
//! 1. Discover the project the document belongs to
//! 2. Read the declared exports from its front matter
//! 3. Resolve them into output paths
//! 4. Run every export as an independent task and report the outcomes

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::format::ExportFormat;
use crate::frontmatter::read_frontmatter;
use crate::naming::DefaultNaming;
use crate::paths::resolve_path;
use crate::project::ProjectContext;
use crate::resolve::{ExportRequest, ResolveContext, ResolvedExport, collect_export_options};
use crate::session::ExportSession;

pub mod pdf;
pub mod tex;
pub mod word;

pub use pdf::{PDF_COMMAND_ENV, PdfExportOptions, local_article_to_pdf, run_pdf_export};
pub use tex::{TexExportOptions, local_article_to_tex, run_tex_export};
pub use word::{WordExportOptions, local_article_to_word, run_word_export};

/// A document with its project and resolved exports
#[derive(Debug)]
pub(crate) struct ArticleExports {
    pub file: PathBuf,
    pub project: ProjectContext,
    pub exports: Vec<ResolvedExport>,
}

/// Locate the project and resolve the exports of `file` for one format.
pub(crate) fn collect_article_exports(
    session: &ExportSession,
    file: &Path,
    format: ExportFormat,
    filename: Option<&str>,
    templates_dir: Option<PathBuf>,
) -> Result<ArticleExports> {
    let runtime = session.runtime.as_ref();
    let file = resolve_path(&session.cwd, file);
    let project = ProjectContext::discover(runtime, &file)?
        .with_templates_dir(templates_dir.map(|d| resolve_path(&session.cwd, d)));
    let frontmatter = read_frontmatter(runtime, &file)?;

    let formats = [format];
    let ctx = ResolveContext {
        file: &file,
        project: project.project_path(),
        cwd: &session.cwd,
    };
    let request = ExportRequest::new(&formats, format.extension()).with_filename(filename);
    let naming = DefaultNaming::new(project.build_dir_name());
    let exports = collect_export_options(runtime, &ctx, &frontmatter.exports, &request, &naming)?;

    Ok(ArticleExports {
        file,
        project,
        exports,
    })
}

/// Create the parent folder of `path` when missing
pub(crate) fn ensure_parent(session: &ExportSession, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !session.runtime.is_dir(parent)?
    {
        session.runtime.dir_create(parent, true)?;
    }
    Ok(())
}
