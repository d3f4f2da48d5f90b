/*
 * naming.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Default export folder and file names.
 */

use std::path::{Path, PathBuf};

use crate::project::DEFAULT_BUILD_DIR;

/// Supplies default output locations when an export entry declares none.
pub trait ExportNaming: Send + Sync {
    /// Folder exports are written to by default
    fn default_export_folder(&self, file: &Path, project: Option<&Path>) -> PathBuf;

    /// File name (without extension) used when an output names only a folder
    fn default_export_filename(&self, file: &Path, project: Option<&Path>) -> String;
}

/// `<project or document dir>/<build dir>/exports`, with slugified file names.
#[derive(Debug, Clone)]
pub struct DefaultNaming {
    build_dir: PathBuf,
}

impl DefaultNaming {
    pub fn new(build_dir: impl Into<PathBuf>) -> Self {
        Self {
            build_dir: build_dir.into(),
        }
    }
}

impl Default for DefaultNaming {
    fn default() -> Self {
        Self::new(DEFAULT_BUILD_DIR)
    }
}

impl ExportNaming for DefaultNaming {
    fn default_export_folder(&self, file: &Path, project: Option<&Path>) -> PathBuf {
        let root = project.or_else(|| file.parent()).unwrap_or(Path::new(""));
        root.join(&self.build_dir).join("exports")
    }

    fn default_export_filename(&self, file: &Path, project: Option<&Path>) -> String {
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Documents below the project root carry their folder in the name
        let mut parts: Vec<String> = project
            .and_then(|root| file.parent()?.strip_prefix(root).ok())
            .map(|rel| {
                rel.components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        parts.push(stem);

        let name = slug::slugify(parts.join("-"));
        if name.is_empty() {
            "export".to_string()
        } else {
            name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_folder_single_file() {
        let naming = DefaultNaming::default();
        assert_eq!(
            naming.default_export_folder(Path::new("/docs/paper.md"), None),
            PathBuf::from("/docs/_build/exports")
        );
    }

    #[test]
    fn test_default_folder_in_project() {
        let naming = DefaultNaming::new("build");
        assert_eq!(
            naming.default_export_folder(Path::new("/proj/ch/intro.md"), Some(Path::new("/proj"))),
            PathBuf::from("/proj/build/exports")
        );
    }

    #[test]
    fn test_default_filename_slug() {
        let naming = DefaultNaming::default();
        assert_eq!(
            naming.default_export_filename(Path::new("/docs/My Great Paper.md"), None),
            "my-great-paper"
        );
    }

    #[test]
    fn test_default_filename_includes_project_folders() {
        let naming = DefaultNaming::default();
        assert_eq!(
            naming.default_export_filename(
                Path::new("/proj/chapters/Intro.md"),
                Some(Path::new("/proj"))
            ),
            "chapters-intro"
        );
        assert_eq!(
            naming.default_export_filename(Path::new("/proj/index.md"), Some(Path::new("/proj"))),
            "index"
        );
    }

    #[test]
    fn test_default_filename_never_empty() {
        let naming = DefaultNaming::default();
        assert_eq!(naming.default_export_filename(Path::new("/docs/___.md"), None), "export");
    }
}
