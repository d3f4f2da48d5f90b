//! Export resolution and build pipeline for folio
//!
//! This crate turns the exports a document declares in its front matter into
//! Word, LaTeX and PDF files.
//!
//! # Architecture
//!
//! - [`collect_export_options`] - resolves declared exports into unique output paths
//! - [`create_pdf_given_tex_export`] - builds a PDF in an isolated [`BuildWorkspace`]
//! - [`resolve_and_log_errors`] - runs independent exports to completion
//! - [`ExportSession`] - the runtime and document collaborators shared by a run
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use folio_core::{ExportSession, PdfExportOptions, local_article_to_pdf};
//! use folio_system_runtime::NativeRuntime;
//!
//! let session = ExportSession::with_pandoc(Arc::new(NativeRuntime::new()))?;
//! let report = local_article_to_pdf(&session, "paper.md".as_ref(), &PdfExportOptions::default()).await?;
//! assert!(report.is_success());
//! ```

pub mod batch;
pub mod build;
pub mod collaborators;
pub mod error;
pub mod export;
pub mod format;
pub mod frontmatter;
pub mod naming;
pub mod pandoc;
pub mod paths;
pub mod project;
pub mod resolve;
pub mod session;

// Re-export commonly used types
pub use batch::{BatchReport, resolve_and_log_errors};
pub use build::{BuildWorkspace, PdfBuildOptions, clean_output, create_pdf_given_tex_export};
pub use collaborators::{
    ContentLoader, DocumentContent, DocxDocument, DocxSerializer, RenderedTex, TexRenderer,
};
pub use error::{ExportError, Result};
pub use export::{
    PdfExportOptions, TexExportOptions, WordExportOptions, local_article_to_pdf,
    local_article_to_tex, local_article_to_word, run_pdf_export, run_tex_export, run_word_export,
};
pub use format::ExportFormat;
pub use frontmatter::{ExportSpec, Frontmatter, ValidationMessage, read_frontmatter, validate_export};
pub use naming::{DefaultNaming, ExportNaming};
pub use pandoc::PandocContent;
pub use project::ProjectContext;
pub use resolve::{ExportRequest, ResolveContext, ResolvedExport, collect_export_options};
pub use session::ExportSession;
