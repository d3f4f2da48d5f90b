/*
 * template.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * LaTeX templates and the latexmk build command.
 */

//! LaTeX templates.
//!
//! A template is a directory containing:
//!
//! - `template.tex` - the document skeleton, with `[-IMPORTS-]`,
//!   `[-CONTENT-]` and `[-TITLE-]` placeholders
//! - `template.yml` (optional) - build options and the packages the
//!   skeleton already loads
//! - any other supporting files (class files, logos), copied next to the
//!   rendered `.tex` file

use std::path::{Path, PathBuf};

use folio_system_runtime::SystemRuntime;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, TexError};

pub const TEMPLATE_TEX: &str = "template.tex";
pub const TEMPLATE_YML: &str = "template.yml";

const IMPORTS_PLACEHOLDER: &str = "[-IMPORTS-]";
const CONTENT_PLACEHOLDER: &str = "[-CONTENT-]";
const TITLE_PLACEHOLDER: &str = "[-TITLE-]";

const DEFAULT_ENGINE: &str = "xelatex";

/// `build:` section of `template.yml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateBuild {
    /// latexmk engine flag (`xelatex`, `pdflatex`, `lualatex`), or a raw
    /// `$`-prefixed latexmk option passed through unchanged
    pub engine: Option<String>,
}

/// Parsed `template.yml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateConfig {
    #[serde(default)]
    pub build: TemplateBuild,
    /// Packages `template.tex` already loads
    #[serde(default)]
    pub packages: Vec<String>,
}

/// Values substituted into a template skeleton.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateContent<'a> {
    pub imports: &'a str,
    pub content: &'a str,
    pub title: Option<&'a str>,
}

/// A LaTeX template loaded from disk.
#[derive(Debug, Clone)]
pub struct TexTemplate {
    /// Template directory
    pub dir: PathBuf,
    /// Contents of `template.tex`
    pub source: String,
    pub config: TemplateConfig,
}

impl TexTemplate {
    /// Load a template from its directory.
    pub fn load(runtime: &dyn SystemRuntime, dir: &Path) -> Result<Self> {
        let tex_path = dir.join(TEMPLATE_TEX);
        if !runtime.is_file(&tex_path)? {
            return Err(TexError::TemplateNotFound(dir.to_path_buf()));
        }
        let source = runtime.file_read_string(&tex_path)?;

        let yml_path = dir.join(TEMPLATE_YML);
        let config = if runtime.is_file(&yml_path)? {
            let text = runtime.file_read_string(&yml_path)?;
            serde_yaml::from_str::<Option<TemplateConfig>>(&text)
                .map_err(|source| TexError::Config {
                    path: yml_path.clone(),
                    source,
                })?
                .unwrap_or_default()
        } else {
            TemplateConfig::default()
        };
        debug!("Loaded template {}", dir.display());

        Ok(Self {
            dir: dir.to_path_buf(),
            source,
            config,
        })
    }

    /// Resolve a template reference: an absolute directory is used directly,
    /// a bare name is looked up under `templates_dir`.
    pub fn resolve(
        runtime: &dyn SystemRuntime,
        template: &str,
        templates_dir: Option<&Path>,
    ) -> Result<Self> {
        let as_path = Path::new(template);
        if as_path.is_absolute() {
            return Self::load(runtime, as_path);
        }
        match templates_dir {
            Some(root) => Self::load(runtime, &root.join(template)),
            None => Err(TexError::TemplateNotFound(as_path.to_path_buf())),
        }
    }

    /// Packages the skeleton already loads.
    pub fn packages(&self) -> &[String] {
        &self.config.packages
    }

    /// Supporting files to place next to the rendered document.
    pub fn support_files(&self, runtime: &dyn SystemRuntime) -> Result<Vec<PathBuf>> {
        Ok(runtime
            .dir_list(&self.dir)?
            .into_iter()
            .filter(|p| {
                !matches!(
                    p.file_name().and_then(|n| n.to_str()),
                    Some(TEMPLATE_TEX | TEMPLATE_YML)
                )
            })
            .collect())
    }

    /// Fill the skeleton's placeholders.
    pub fn render(&self, content: TemplateContent<'_>) -> String {
        self.source
            .replace(IMPORTS_PLACEHOLDER, content.imports)
            .replace(TITLE_PLACEHOLDER, content.title.unwrap_or_default())
            .replace(CONTENT_PLACEHOLDER, content.content)
    }

    /// latexmk command building `tex_file`, with output redirected to `log_file`.
    pub fn pdf_export_command(&self, tex_file: &str, log_file: &str) -> String {
        pdf_export_command(tex_file, log_file, self.config.build.engine.as_deref())
    }
}

/// Document used when no template is requested.
pub fn render_default_document(content: TemplateContent<'_>) -> String {
    let mut out = String::from("\\documentclass{article}\n");
    out.push_str(content.imports);
    if let Some(title) = content.title {
        out.push_str(&format!("\\title{{{title}}}\n"));
    }
    out.push_str("\\begin{document}\n");
    if content.title.is_some() {
        out.push_str("\\maketitle\n");
    }
    out.push_str(content.content);
    if !content.content.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("\\end{document}\n");
    out
}

/// latexmk command line for building a PDF from `tex_file`.
///
/// `engine` defaults to xelatex. Output is redirected to `log_file` so it
/// can be copied back alongside the PDF.
pub fn pdf_export_command(tex_file: &str, log_file: &str, engine: Option<&str>) -> String {
    let engine = engine.unwrap_or(DEFAULT_ENGINE);
    let engine_flag = if engine.starts_with('$') {
        engine.to_string()
    } else {
        format!("-{engine}")
    };
    let base = format!(
        "latexmk -f {engine_flag} -synctex=1 -interaction=batchmode -file-line-error -latexoption=\"-shell-escape\" {tex_file}"
    );
    if cfg!(windows) {
        format!("{base} 1> {log_file} 2>&1")
    } else {
        format!("{base} > {log_file} 2>&1")
    }
}
