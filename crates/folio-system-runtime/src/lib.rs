/*
 * folio-system-runtime
 * Copyright (c) 2025 Posit, PBC
 *
 * Runtime abstraction layer for folio system operations.
 *
 * The export pipeline reaches the filesystem, temporary directories and
 * external processes only through the [`SystemRuntime`] trait:
 *
 * - NativeRuntime: std for files, tokio for external tools
 */

mod native;
mod traits;

// Re-export core types (API surface)
pub use traits::{
    CommandOutput, PathKind, PathMetadata, RuntimeError, RuntimeResult, SystemRuntime, TempDir,
};

// Re-export runtime implementations
pub use native::NativeRuntime;

/// Create a default runtime for the current platform.
pub fn default_runtime() -> NativeRuntime {
    NativeRuntime::new()
}
