/*
 * imports.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Package imports and math command definitions for LaTeX preambles.
 */

//! Preamble imports and math commands.
//!
//! Renderers and front matter each contribute a [`TexTemplateImports`]:
//! a set of packages to `\usepackage` and a map of math macros to
//! `\newcommand`. These are merged with [`merge_tex_template_imports`] and
//! rendered once, deterministically, by [`render_tex_imports`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::comment::{COMMENT_LENGTH, tex_separator, write_tex_labelled_comment};

/// `#1` .. `#9` positional argument references in a macro body.
static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([1-9])").expect("Invalid regex pattern for macro arguments"));

/// Packages and math commands required by a rendered document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TexTemplateImports {
    /// Package names for `\usepackage`
    #[serde(default)]
    pub imports: BTreeSet<String>,
    /// Macro name (including the leading backslash) to macro body
    #[serde(default)]
    pub commands: BTreeMap<String, String>,
}

impl TexTemplateImports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_import(mut self, package: impl Into<String>) -> Self {
        self.imports.insert(package.into());
        self
    }

    pub fn with_command(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.commands.insert(name.into(), body.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.commands.is_empty()
    }
}

/// Preamble content as declared by a template or document.
///
/// Older templates supply a ready-made block of LaTeX instead of structured
/// imports; that text is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateImports {
    Raw(String),
    Structured(TexTemplateImports),
}

impl From<TexTemplateImports> for TemplateImports {
    fn from(imports: TexTemplateImports) -> Self {
        TemplateImports::Structured(imports)
    }
}

/// Merge two sets of imports.
///
/// Packages are unioned. Commands are overlaid, `next` winning on a shared name.
pub fn merge_tex_template_imports(
    current: Option<&TexTemplateImports>,
    next: Option<&TexTemplateImports>,
) -> TexTemplateImports {
    let mut merged = current.cloned().unwrap_or_default();
    if let Some(next) = next {
        merged.imports.extend(next.imports.iter().cloned());
        merged
            .commands
            .extend(next.commands.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    merged
}

/// `\usepackage` lines for `packages`, sorted, skipping any in `existing_packages`.
pub fn create_tex_import_commands<'a>(
    packages: impl IntoIterator<Item = &'a String>,
    existing_packages: Option<&[String]>,
) -> Vec<String> {
    let mut sorted: Vec<&String> = packages.into_iter().collect();
    sorted.sort();
    sorted.dedup();
    sorted
        .into_iter()
        .filter(|p| existing_packages.is_none_or(|existing| !existing.contains(*p)))
        .map(|p| format!("\\usepackage{{{p}}}"))
        .collect()
}

/// Number of arguments a macro body expects: the highest `#n` it references.
pub fn count_macro_arguments(body: &str) -> usize {
    PLACEHOLDER_PATTERN
        .captures_iter(body)
        .filter_map(|c| c[1].parse::<usize>().ok())
        .max()
        .unwrap_or(0)
}

/// `\newcommand` definitions for each macro, in name order.
pub fn create_tex_math_commands(commands: &BTreeMap<String, String>) -> Vec<String> {
    commands
        .iter()
        .map(|(name, body)| match count_macro_arguments(body) {
            0 => format!("\\newcommand{{{name}}}{{{body}}}"),
            n => format!("\\newcommand{{{name}}}[{n}]{{{body}}}"),
        })
        .collect()
}

/// Render the import and math-command sections of a preamble.
///
/// Structured imports become a labelled `imports` block and a labelled
/// `math commands` block framed by separator lines. Raw text is framed
/// as-is. The free-form `preamble`, if any, follows the framed section.
/// With nothing to render the result is empty.
pub fn render_tex_imports(
    template_imports: Option<&TemplateImports>,
    existing_packages: Option<&[String]>,
    preamble: Option<&str>,
) -> String {
    let imports_and_commands = match template_imports {
        None => String::new(),
        Some(TemplateImports::Raw(text)) => text.clone(),
        Some(TemplateImports::Structured(structured)) => {
            let imports = write_tex_labelled_comment(
                "imports",
                &create_tex_import_commands(&structured.imports, existing_packages),
                COMMENT_LENGTH,
            );
            let commands = write_tex_labelled_comment(
                "math commands",
                &create_tex_math_commands(&structured.commands),
                COMMENT_LENGTH,
            );
            format!("{imports}{commands}")
        }
    };
    let preamble_content = match preamble {
        Some(text) if !text.is_empty() => format!("{text}\n"),
        _ => String::new(),
    };
    if imports_and_commands.is_empty() {
        return preamble_content;
    }
    let separator = tex_separator(COMMENT_LENGTH);
    format!("{separator}\n{imports_and_commands}{separator}\n{preamble_content}")
}
