//! Error types for folio-tex

use std::path::PathBuf;

use folio_system_runtime::RuntimeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TexError {
    #[error("Could not find template at {0}")]
    TemplateNotFound(PathBuf),

    #[error("Invalid template configuration {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

pub type Result<T> = std::result::Result<T, TexError>;
