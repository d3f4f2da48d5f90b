/*
 * workspace.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Isolated build workspaces.
 */

use std::path::Path;

use folio_system_runtime::{PathKind, SystemRuntime, TempDir};

use crate::error::Result;

/// Prefix of every build workspace directory
pub const WORKSPACE_PREFIX: &str = "folio-build-";

/// A fresh temporary directory owned by exactly one build.
///
/// The directory is removed on drop unless [`BuildWorkspace::keep`] is
/// called, which leaves it on disk for inspection.
#[derive(Debug)]
pub struct BuildWorkspace {
    dir: TempDir,
}

impl BuildWorkspace {
    /// Create an empty workspace
    pub fn create(runtime: &dyn SystemRuntime) -> Result<Self> {
        Ok(Self {
            dir: runtime.temp_dir(WORKSPACE_PREFIX)?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Copy every file and folder of `source` into the workspace
    pub fn mirror(&self, runtime: &dyn SystemRuntime, source: &Path) -> Result<()> {
        copy_contents(runtime, source, self.path())
    }

    /// Leave the workspace on disk after this value is dropped
    pub fn keep(&mut self) {
        self.dir.keep();
    }
}

/// Recursively copy the contents of `src` into the existing folder `dest`.
///
/// Directories are created before their contents. Symlinks get no special
/// treatment.
pub fn copy_contents(runtime: &dyn SystemRuntime, src: &Path, dest: &Path) -> Result<()> {
    for item in runtime.dir_list(src)? {
        let Some(name) = item.file_name() else {
            continue;
        };
        let dest_item = dest.join(name);
        if runtime.path_metadata(&item)?.kind == PathKind::Directory {
            if !runtime.is_dir(&dest_item)? {
                runtime.dir_create(&dest_item, false)?;
            }
            copy_contents(runtime, &item, &dest_item)?;
        } else {
            runtime.file_copy(&item, &dest_item)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_system_runtime::NativeRuntime;

    #[test]
    fn test_mirror_nested_tree() {
        let rt = NativeRuntime::new();
        let src = tempfile::TempDir::new().unwrap();
        std::fs::write(src.path().join("main.tex"), "\\documentclass{article}").unwrap();
        std::fs::create_dir_all(src.path().join("figures/raw")).unwrap();
        std::fs::write(src.path().join("figures/raw/plot.png"), [0u8, 1, 2]).unwrap();

        let ws = BuildWorkspace::create(&rt).unwrap();
        ws.mirror(&rt, src.path()).unwrap();

        assert!(ws.path().join("main.tex").is_file());
        assert_eq!(
            std::fs::read(ws.path().join("figures/raw/plot.png")).unwrap(),
            vec![0u8, 1, 2]
        );
    }

    #[test]
    fn test_workspaces_are_distinct_and_removed() {
        let rt = NativeRuntime::new();
        let a = BuildWorkspace::create(&rt).unwrap();
        let b = BuildWorkspace::create(&rt).unwrap();
        assert_ne!(a.path(), b.path());

        let path = a.path().to_path_buf();
        drop(a);
        assert!(!path.exists());
    }

    #[test]
    fn test_kept_workspace_survives_drop() {
        let rt = NativeRuntime::new();
        let mut ws = BuildWorkspace::create(&rt).unwrap();
        ws.keep();
        let path = ws.path().to_path_buf();
        drop(ws);
        assert!(path.is_dir());
        std::fs::remove_dir_all(path).unwrap();
    }
}
