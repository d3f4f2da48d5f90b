/*
 * comment.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Labelled LaTeX comment blocks.
 */

/// Width of the `%` separator lines framing generated preamble sections.
pub const COMMENT_LENGTH: usize = 50;

/// A line of `%` characters `length` wide.
pub fn tex_separator(length: usize) -> String {
    "%".repeat(length)
}

/// Write a block of lines headed by a centered, `%`-padded label.
///
/// ```text
/// %%%%%%%%%%%%%%%%%%%%  imports  %%%%%%%%%%%%%%%%%%%%
/// \usepackage{amsmath}
/// ```
///
/// Returns an empty string when there are no lines, so empty sections vanish
/// from the output entirely.
pub fn write_tex_labelled_comment(title: &str, lines: &[String], length: usize) -> String {
    if lines.is_empty() {
        return String::new();
    }
    // Two spaces either side of the label
    let pad = length.saturating_sub(title.chars().count() + 4);
    let start = "%".repeat(pad.div_ceil(2));
    let end = "%".repeat(pad / 2);
    let mut out = format!("{start}  {title}  {end}\n");
    out.push_str(&lines.join("\n"));
    out.push('\n');
    out
}
