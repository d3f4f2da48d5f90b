//! Error types for folio-core

use std::path::PathBuf;

use folio_system_runtime::RuntimeError;
use folio_tex::TexError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    /// Nothing survived export resolution
    #[error(
        "No export options of format {formats} defined in frontmatter of {}{}",
        .file.display(),
        possible_causes(.causes)
    )]
    NoExports {
        formats: String,
        file: PathBuf,
        /// Validation messages collected while reading the declared exports
        causes: Vec<String>,
    },

    /// The tex source was not present in the build workspace after mirroring
    #[error("Could not find tex file: {0}")]
    MissingTexFile(PathBuf),

    /// No PDF at the requested output once the build finished
    #[error("pdf export failed: {0}")]
    PdfExportFailed(PathBuf),

    #[error("Invalid frontmatter in {path}: {source}")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid project configuration {path}: {source}")]
    ProjectConfig {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Tex(#[from] TexError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure reported by a content loader or serializer
    #[error("{0}")]
    Collaborator(String),

    #[error("{0}")]
    Other(String),
}

impl ExportError {
    /// Create an error from any message.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

fn possible_causes(causes: &[String]) -> String {
    if causes.is_empty() {
        return String::new();
    }
    format!("\nPossible causes:\n- {}", causes.join("\n- "))
}

pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_exports_message_without_causes() {
        let err = ExportError::NoExports {
            formats: "docx".to_string(),
            file: PathBuf::from("/doc/paper.md"),
            causes: vec![],
        };
        assert_eq!(
            err.to_string(),
            "No export options of format docx defined in frontmatter of /doc/paper.md"
        );
    }

    #[test]
    fn test_no_exports_message_lists_causes() {
        let err = ExportError::NoExports {
            formats: "pdf, tex".to_string(),
            file: PathBuf::from("paper.md"),
            causes: vec!["a".to_string(), "b".to_string()],
        };
        assert!(err.to_string().ends_with("\nPossible causes:\n- a\n- b"));
    }
}
