/*
 * format.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Export format identifiers.
 */

//! Export formats.
//!
//! Each format fixes the file extension its output path must carry.

/// Output format an export entry can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// PDF compiled from LaTeX
    Pdf,
    /// LaTeX source
    Tex,
    /// Word document
    Docx,
}

impl ExportFormat {
    /// Get the format name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Tex => "tex",
            ExportFormat::Docx => "docx",
        }
    }

    /// File extension (without leading dot) an output of this format must have
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Tex => "tex",
            ExportFormat::Docx => "docx",
        }
    }

    /// Guess a format from an output file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(ExportFormat::Pdf),
            "tex" => Some(ExportFormat::Tex),
            "docx" => Some(ExportFormat::Docx),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for ExportFormat {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "tex" | "latex" => Ok(ExportFormat::Tex),
            "docx" | "word" => Ok(ExportFormat::Docx),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

/// Join format names for messages: `pdf, tex`
pub fn format_list(formats: &[ExportFormat]) -> String {
    formats
        .iter()
        .map(ExportFormat::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
