/*
 * project.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Project context for folio exports.
 */

//! Project context management.
//!
//! A project context represents either:
//! - A folio project (with `folio.yml`)
//! - A single-file "pseudo-project" (no configuration file)
//!
//! The project context provides:
//! - Project root directory
//! - Parsed configuration
//! - Build, export and template directory resolution

use std::path::{Path, PathBuf};

use folio_system_runtime::SystemRuntime;
use serde::Deserialize;

use crate::error::{ExportError, Result};

/// Project configuration file names, in lookup order
pub const PROJECT_CONFIG_FILES: [&str; 2] = ["folio.yml", "folio.yaml"];

/// Default build directory name (relative to the project root)
pub const DEFAULT_BUILD_DIR: &str = "_build";

/// `project:` section of `folio.yml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawProjectSection {
    output_dir: Option<PathBuf>,
    templates: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawProjectFile {
    #[serde(default)]
    project: Option<RawProjectSection>,
}

/// Parsed project configuration from `folio.yml`
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// Build directory (relative to project root)
    pub output_dir: PathBuf,

    /// Template directory (relative to project root)
    pub templates: Option<PathBuf>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_BUILD_DIR),
            templates: None,
        }
    }
}

/// Project context for exporting
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Project root directory (directory containing `folio.yml`, or the document directory)
    pub dir: PathBuf,

    /// Parsed project configuration (if `folio.yml` exists)
    pub config: Option<ProjectConfig>,

    /// Is this a single-file pseudo-project?
    pub is_single_file: bool,

    /// Template directory given on the command line, overriding the configuration
    pub templates_override: Option<PathBuf>,
}

impl ProjectContext {
    /// Discover the project context for a document.
    ///
    /// Looks for `folio.yml` in the document's directory and its parents.
    /// If none is found, creates a single-file pseudo-project rooted at the
    /// document's directory.
    pub fn discover(runtime: &dyn SystemRuntime, file: &Path) -> Result<Self> {
        let search_dir = if runtime.is_dir(file)? {
            file.to_path_buf()
        } else {
            file.parent()
                .ok_or_else(|| ExportError::other("Input file has no parent directory"))?
                .to_path_buf()
        };

        match Self::find_project_config(runtime, &search_dir)? {
            Some((dir, config)) => Ok(Self {
                dir,
                config: Some(config),
                is_single_file: false,
                templates_override: None,
            }),
            None => Ok(Self::single_file(search_dir)),
        }
    }

    /// Create a single-file project context rooted at `dir`
    pub fn single_file(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            config: None,
            is_single_file: true,
            templates_override: None,
        }
    }

    /// Override the template directory
    pub fn with_templates_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.templates_override = dir;
        self
    }

    /// Search for `folio.yml` in directory and parents
    fn find_project_config(
        runtime: &dyn SystemRuntime,
        start_dir: &Path,
    ) -> Result<Option<(PathBuf, ProjectConfig)>> {
        let mut current = Some(start_dir);
        while let Some(dir) = current {
            for name in PROJECT_CONFIG_FILES {
                let config_path = dir.join(name);
                if runtime.is_file(&config_path)? {
                    let config = Self::parse_config(runtime, &config_path)?;
                    return Ok(Some((dir.to_path_buf(), config)));
                }
            }
            current = dir.parent();
        }
        Ok(None)
    }

    /// Parse a `folio.yml` file
    fn parse_config(runtime: &dyn SystemRuntime, path: &Path) -> Result<ProjectConfig> {
        let content = runtime.file_read_string(path)?;
        let to_error = |source| ExportError::ProjectConfig {
            path: path.to_path_buf(),
            source,
        };

        let value: serde_yaml::Value = serde_yaml::from_str(&content).map_err(to_error)?;
        let parsed: Option<RawProjectFile> = serde_yaml::from_value(value).map_err(to_error)?;
        let section = parsed.and_then(|p| p.project).unwrap_or_default();

        Ok(ProjectConfig {
            output_dir: section
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_DIR)),
            templates: section.templates,
        })
    }

    /// Project root passed to naming helpers; `None` for single files
    pub fn project_path(&self) -> Option<&Path> {
        if self.is_single_file {
            None
        } else {
            Some(&self.dir)
        }
    }

    /// Build directory name relative to the project root
    pub fn build_dir_name(&self) -> &Path {
        self.config
            .as_ref()
            .map(|c| c.output_dir.as_path())
            .unwrap_or(Path::new(DEFAULT_BUILD_DIR))
    }

    /// Directory holding LaTeX templates
    pub fn templates_dir(&self) -> PathBuf {
        if let Some(dir) = &self.templates_override {
            return dir.clone();
        }
        match self.config.as_ref().and_then(|c| c.templates.as_ref()) {
            Some(templates) => self.dir.join(templates),
            None => self.dir.join("templates"),
        }
    }
}
