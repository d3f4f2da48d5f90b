//! Command implementations for the folio CLI
//!
//! Each command module handles the CLI interface and delegates to
//! folio-core for the actual export.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use folio_core::{BatchReport, ExportSession};
use folio_system_runtime::{SystemRuntime, default_runtime};
use tracing::info;

pub mod docx;
pub mod pdf;
pub mod tex;

/// Session over the native runtime, with pandoc as the document engine
pub fn native_session() -> Result<ExportSession> {
    let runtime: Arc<dyn SystemRuntime> = Arc::new(default_runtime());
    ExportSession::with_pandoc(runtime).context("Failed to set up export session")
}

/// Check that the input document exists before exporting
pub fn check_input(session: &ExportSession, file: &Path) -> Result<()> {
    let exists = session
        .runtime
        .is_file(&session.cwd.join(file))
        .context("Failed to check input path")?;
    if !exists {
        anyhow::bail!("Input file does not exist: {}", file.display());
    }
    Ok(())
}

/// Drive an export to completion on a single-threaded runtime.
///
/// Fails if the export could not start or if any of its tasks failed.
pub fn run_export<F>(file: &Path, export: F) -> Result<()>
where
    F: Future<Output = folio_core::Result<BatchReport>>,
{
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let report = rt
        .block_on(export)
        .with_context(|| format!("Failed to export {}", file.display()))?;
    summarize(&report)
}

fn summarize(report: &BatchReport) -> Result<()> {
    if report.is_success() {
        info!("Finished {} export(s)", report.succeeded);
        return Ok(());
    }
    anyhow::bail!(
        "{} of {} export(s) failed",
        report.failures.len(),
        report.total()
    )
}
