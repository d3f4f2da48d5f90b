/*
 * frontmatter.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Front matter reading and export entry validation.
 */

//! Front matter and declared exports.
//!
//! Export entries arrive as loosely-typed YAML. [`validate_export`] turns each
//! one into either an [`ExportSpec`] or a [`ValidationMessage`], so nothing
//! malformed reaches the resolver.

use std::collections::BTreeMap;
use std::path::Path;

use folio_system_runtime::SystemRuntime;
use serde_yaml::{Mapping, Value};
use tracing::warn;

use crate::error::{ExportError, Result};
use crate::format::ExportFormat;

/// A problem found while validating a declared value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationMessage {
    /// Dotted path of the offending property, e.g. `exports.1.format`
    pub property: String,
    pub message: String,
}

impl ValidationMessage {
    pub fn new(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' {}", self.property, self.message)
    }
}

/// A validated export declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSpec {
    pub format: ExportFormat,
    /// Output path as declared (relative to the document)
    pub output: Option<String>,
    /// Template name or path
    pub template: Option<String>,
    /// Every other declared field, passed through untouched
    pub extra: Mapping,
}

impl ExportSpec {
    /// A bare entry with only a format
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            output: None,
            template: None,
            extra: Mapping::new(),
        }
    }

    /// A pass-through string field
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }
}

/// Validate one declared export entry.
///
/// Problems are appended to `messages` and `None` is returned; the entry is
/// never partially accepted. When `format` is missing it is inferred from the
/// extension of `output`.
pub fn validate_export(
    value: &Value,
    property: &str,
    messages: &mut Vec<ValidationMessage>,
) -> Option<ExportSpec> {
    let Some(map) = value.as_mapping() else {
        messages.push(ValidationMessage::new(property, "must be an object"));
        return None;
    };
    let before = messages.len();

    let output = match map.get("output") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            messages.push(ValidationMessage::new(
                format!("{property}.output"),
                "must be a string",
            ));
            None
        }
    };

    let template = match map.get("template") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            messages.push(ValidationMessage::new(
                format!("{property}.template"),
                "must be a string or null",
            ));
            None
        }
    };

    let format = match map.get("format") {
        Some(Value::String(s)) => match ExportFormat::try_from(s.as_str()) {
            Ok(format) => Some(format),
            Err(_) => {
                messages.push(ValidationMessage::new(
                    format!("{property}.format"),
                    format!("unknown export format \"{s}\""),
                ));
                None
            }
        },
        Some(_) => {
            messages.push(ValidationMessage::new(
                format!("{property}.format"),
                "must be a string",
            ));
            None
        }
        None => {
            let inferred = output
                .as_deref()
                .and_then(|o| Path::new(o).extension())
                .and_then(|e| e.to_str())
                .and_then(ExportFormat::from_extension);
            if inferred.is_none() {
                messages.push(ValidationMessage::new(
                    format!("{property}.format"),
                    "is required",
                ));
            }
            inferred
        }
    };

    if messages.len() > before {
        return None;
    }

    let extra = map
        .iter()
        .filter(|(k, _)| !matches!(k.as_str(), Some("format" | "output" | "template")))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Some(ExportSpec {
        format: format?,
        output,
        template,
        extra,
    })
}

/// Document-level metadata relevant to exporting.
#[derive(Debug, Clone, Default)]
pub struct Frontmatter {
    pub title: Option<String>,
    /// Author display names
    pub authors: Vec<String>,
    /// Math macros, name to body
    pub math: BTreeMap<String, String>,
    /// Raw export entries, unvalidated
    pub exports: Vec<Value>,
}

/// Split a leading `---` delimited YAML block from a document.
///
/// Returns the YAML text (if any) and the remaining body.
pub fn split_frontmatter(text: &str) -> (Option<&str>, &str) {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let Some(rest) = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    else {
        return (None, text);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed == "---" || trimmed == "..." {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }
    (None, text)
}

/// Parse front matter YAML. `path` is used for error messages only.
pub fn parse_frontmatter(yaml: &str, path: &Path) -> Result<Frontmatter> {
    let value: Value = serde_yaml::from_str(yaml).map_err(|source| ExportError::Frontmatter {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = match value {
        Value::Mapping(map) => map,
        Value::Null => Mapping::new(),
        _ => {
            warn!("Ignoring frontmatter of {} (not a mapping)", path.display());
            Mapping::new()
        }
    };

    let title = raw.get("title").and_then(Value::as_str).map(String::from);

    let authors = match raw.get("authors").or_else(|| raw.get("author")) {
        Some(Value::Sequence(items)) => items.iter().filter_map(author_name).collect(),
        Some(single) => author_name(single).into_iter().collect(),
        None => Vec::new(),
    };

    let math = match raw.get("math") {
        Some(Value::Mapping(macros)) => macros
            .iter()
            .filter_map(|(k, v)| match (k.as_str(), v.as_str()) {
                (Some(name), Some(body)) => Some((name.to_string(), body.to_string())),
                _ => {
                    warn!("Ignoring non-string math macro in {}", path.display());
                    None
                }
            })
            .collect(),
        _ => BTreeMap::new(),
    };

    let exports = match raw.get("exports") {
        Some(Value::Sequence(items)) => items.clone(),
        Some(Value::Null) | None => Vec::new(),
        Some(single) => vec![single.clone()],
    };

    Ok(Frontmatter {
        title,
        authors,
        math,
        exports,
    })
}

fn author_name(value: &Value) -> Option<String> {
    match value {
        Value::String(name) => Some(name.clone()),
        Value::Mapping(map) => map.get("name").and_then(Value::as_str).map(String::from),
        _ => None,
    }
}

/// Read the front matter of a document; an absent block yields defaults.
pub fn read_frontmatter(runtime: &dyn SystemRuntime, file: &Path) -> Result<Frontmatter> {
    let text = runtime.file_read_string(file)?;
    match split_frontmatter(&text) {
        (Some(yaml), _) => parse_frontmatter(yaml, file),
        (None, _) => Ok(Frontmatter::default()),
    }
}
