/*
 * clean.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Removal of previous export outputs.
 */

use std::path::Path;

use folio_system_runtime::{PathKind, SystemRuntime};
use tracing::info;

use crate::error::Result;

/// Remove a previous output (file or folder) if present.
pub fn clean_output(runtime: &dyn SystemRuntime, path: &Path) -> Result<()> {
    if !runtime.path_exists(path, None)? {
        return Ok(());
    }
    info!("Cleaning output: {}", path.display());
    if runtime.path_metadata(path)?.kind == PathKind::Directory {
        runtime.dir_remove(path, true)?;
    } else {
        runtime.file_remove(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_system_runtime::NativeRuntime;

    #[test]
    fn test_clean_file_and_folder() {
        let rt = NativeRuntime::new();
        let temp = tempfile::TempDir::new().unwrap();
        let file = temp.path().join("paper.pdf");
        let logs = temp.path().join("paper_pdf_logs");
        std::fs::write(&file, "pdf").unwrap();
        std::fs::create_dir(&logs).unwrap();
        std::fs::write(logs.join("paper.log"), "log").unwrap();

        clean_output(&rt, &file).unwrap();
        clean_output(&rt, &logs).unwrap();
        assert!(!file.exists());
        assert!(!logs.exists());
    }

    #[test]
    fn test_clean_missing_is_noop() {
        let rt = NativeRuntime::new();
        let temp = tempfile::TempDir::new().unwrap();
        clean_output(&rt, &temp.path().join("nothing.docx")).unwrap();
    }
}
