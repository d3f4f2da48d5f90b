/*
 * resolve.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Export option resolution.
 */

//! Export option resolution.
//!
//! Turns the exports declared in front matter (plus any command-line
//! filename) into concrete, absolute, non-colliding output paths.
//!
//! Output path precedence:
//! 1. Filename given on the command line (relative to the caller's cwd)
//! 2. The entry's own `output` (relative to the document's directory)
//! 3. The default export folder
//!
//! A path without an extension is treated as a folder and receives the
//! default file name. Paths with the wrong extension are dropped. Repeated
//! paths are disambiguated as `name_1.ext`, `name_2.ext`, ... in list order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use folio_system_runtime::SystemRuntime;
use serde_yaml::Value;
use tracing::{error, info};

use crate::error::{ExportError, Result};
use crate::format::{ExportFormat, format_list};
use crate::frontmatter::{ExportSpec, ValidationMessage, validate_export};
use crate::naming::ExportNaming;
use crate::paths::{resolve_path, with_numeric_suffix};

/// Where a document lives and which directories relative paths resolve against.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Absolute path of the source document
    pub file: &'a Path,
    /// Project root, if the document belongs to a project
    pub project: Option<&'a Path>,
    /// Base for the command-line filename
    pub cwd: &'a Path,
}

impl ResolveContext<'_> {
    /// Directory declared outputs are resolved against
    pub fn base_dir(&self) -> &Path {
        self.file.parent().unwrap_or(Path::new(""))
    }
}

/// Which exports to resolve.
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    /// Formats to pick from the declared entries
    pub formats: &'a [ExportFormat],
    /// Extension (without dot) every resolved output must carry
    pub extension: &'a str,
    /// Command-line filename; collapses the result to a single export
    pub filename: Option<&'a str>,
}

impl<'a> ExportRequest<'a> {
    pub fn new(formats: &'a [ExportFormat], extension: &'a str) -> Self {
        Self {
            formats,
            extension,
            filename: None,
        }
    }

    pub fn with_filename(mut self, filename: Option<&'a str>) -> Self {
        self.filename = filename;
        self
    }
}

/// An export with its final output location.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedExport {
    pub format: ExportFormat,
    /// Absolute, unique within its batch
    pub output: PathBuf,
    /// Template directory (absolute) or template name
    pub template: Option<String>,
    /// The validated declaration this export came from
    pub spec: ExportSpec,
}

/// Validate declared entries, keeping those whose format was requested.
pub fn validated_exports(
    raw_exports: &[Value],
    formats: &[ExportFormat],
    messages: &mut Vec<ValidationMessage>,
) -> Vec<ExportSpec> {
    raw_exports
        .iter()
        .enumerate()
        .filter_map(|(ind, exp)| validate_export(exp, &format!("exports.{ind}"), messages))
        .filter(|exp| formats.contains(&exp.format))
        .collect()
}

/// Resolve declared exports into concrete export tasks.
///
/// `runtime` is only consulted to decide whether a template reference names
/// a local directory.
pub fn collect_export_options(
    runtime: &dyn SystemRuntime,
    ctx: &ResolveContext<'_>,
    raw_exports: &[Value],
    request: &ExportRequest<'_>,
    naming: &dyn ExportNaming,
) -> Result<Vec<ResolvedExport>> {
    let mut messages = Vec::new();
    let mut candidates = validated_exports(raw_exports, request.formats, &mut messages);

    // A command-line filename means a single export, using the first declared entry if any
    if request.filename.is_some() {
        candidates = match (candidates.into_iter().next(), request.formats.first()) {
            (Some(first), _) => vec![first],
            (None, Some(format)) => vec![ExportSpec::new(*format)],
            (None, None) => Vec::new(),
        };
    }

    let with_outputs: Vec<ResolvedExport> = candidates
        .into_iter()
        .filter_map(|spec| {
            let output = compute_output(ctx, &spec, request, naming);
            if output.extension().and_then(|e| e.to_str()) != Some(request.extension) {
                error!(
                    "The filename must end with '.{}': \"{}\"",
                    request.extension,
                    output.display()
                );
                return None;
            }
            let template = spec
                .template
                .as_deref()
                .map(|t| resolve_template(runtime, ctx, t));
            Some(ResolvedExport {
                format: spec.format,
                output,
                template,
                spec,
            })
        })
        .collect();

    let resolved = deduplicate_outputs(with_outputs);

    if resolved.is_empty() {
        return Err(ExportError::NoExports {
            formats: format_list(request.formats),
            file: ctx.file.to_path_buf(),
            causes: messages.iter().map(ToString::to_string).collect(),
        });
    }

    for exp in &resolved {
        info!("Performing export: {}", exp.output.display());
    }
    Ok(resolved)
}

/// Raw output path for one candidate, before extension checks.
fn compute_output(
    ctx: &ResolveContext<'_>,
    spec: &ExportSpec,
    request: &ExportRequest<'_>,
    naming: &dyn ExportNaming,
) -> PathBuf {
    let output = if let Some(filename) = request.filename {
        resolve_path(ctx.cwd, filename)
    } else if let Some(declared) = &spec.output {
        resolve_path(ctx.base_dir(), declared)
    } else {
        resolve_path(
            ctx.base_dir(),
            naming.default_export_folder(ctx.file, ctx.project),
        )
    };

    if output.extension().is_none() {
        let slug = naming.default_export_filename(ctx.file, ctx.project);
        return output.join(format!("{slug}.{}", request.extension));
    }
    output
}

/// A template reference naming an existing directory next to the document
/// becomes that absolute directory; anything else stays a template name.
fn resolve_template(runtime: &dyn SystemRuntime, ctx: &ResolveContext<'_>, template: &str) -> String {
    let candidate = resolve_path(ctx.base_dir(), template);
    if runtime.is_dir(&candidate).unwrap_or(false) {
        candidate.to_string_lossy().into_owned()
    } else {
        template.to_string()
    }
}

/// Rewrite repeated outputs as `name_<n>.ext`, `n` counting earlier occurrences.
///
/// Only this batch is considered; files already on disk are not.
pub fn deduplicate_outputs(exports: Vec<ResolvedExport>) -> Vec<ResolvedExport> {
    let mut taken: HashSet<PathBuf> = HashSet::new();
    let mut seen: Vec<PathBuf> = Vec::with_capacity(exports.len());

    exports
        .into_iter()
        .map(|mut exp| {
            let prior = seen.iter().filter(|p| **p == exp.output).count();
            seen.push(exp.output.clone());

            let mut output = exp.output.clone();
            let mut n = prior;
            while n > 0 || taken.contains(&output) {
                n = n.max(1);
                output = with_numeric_suffix(&exp.output, n);
                if !taken.contains(&output) {
                    break;
                }
                n += 1;
            }
            taken.insert(output.clone());
            exp.output = output;
            exp
        })
        .collect()
}
