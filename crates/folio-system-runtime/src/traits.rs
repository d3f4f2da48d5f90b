/*
 * traits.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * The SystemRuntime trait and the values it passes around.
 *
 * Exports reach the filesystem, temporary folders and external tools only
 * through this trait.
 */

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An external tool exited unsuccessfully
    #[error("Process execution failed (exit {code}): {message}")]
    ProcessFailed {
        code: i32,
        /// Captured stderr
        message: String,
    },
}

/// What a path points at, without following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
    Symlink,
}

#[derive(Debug, Clone)]
pub struct PathMetadata {
    pub kind: PathKind,
}

/// Result of a shell command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code, -1 when the process was killed by a signal
    pub code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    pub fn stderr_string(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// A temporary folder that is removed when dropped, unless kept
#[derive(Debug)]
pub struct TempDir {
    path: PathBuf,
    remove_on_drop: bool,
}

impl TempDir {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            remove_on_drop: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Leave the folder on disk when this guard is dropped.
    pub fn keep(&mut self) {
        self.remove_on_drop = false;
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        if self.remove_on_drop && self.path.exists() {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }
}

/// Host operations needed by the export pipeline.
///
/// Filesystem calls are synchronous. Calls into external tools are async, so
/// the exports of one batch overlap while pandoc or a LaTeX compiler runs.
#[async_trait]
pub trait SystemRuntime: Send + Sync {
    // ═══════════════════════════════════════════════════════════════════════
    // FILES
    // ═══════════════════════════════════════════════════════════════════════

    fn file_read(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Read a file that must be valid UTF-8.
    fn file_read_string(&self, path: &Path) -> RuntimeResult<String> {
        let bytes = self.file_read(path)?;
        String::from_utf8(bytes).map_err(|e| {
            RuntimeError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} is not UTF-8: {e}", path.display()),
            ))
        })
    }

    /// Create or overwrite `path`.
    fn file_write(&self, path: &Path, contents: &[u8]) -> RuntimeResult<()>;

    /// Whether `path` exists, and is of `kind` when one is given.
    fn path_exists(&self, path: &Path, kind: Option<PathKind>) -> RuntimeResult<bool>;

    fn is_file(&self, path: &Path) -> RuntimeResult<bool> {
        self.path_exists(path, Some(PathKind::File))
    }

    fn is_dir(&self, path: &Path) -> RuntimeResult<bool> {
        self.path_exists(path, Some(PathKind::Directory))
    }

    /// Metadata of `path` itself; symlinks are not followed.
    fn path_metadata(&self, path: &Path) -> RuntimeResult<PathMetadata>;

    fn file_copy(&self, src: &Path, dst: &Path) -> RuntimeResult<()>;

    fn file_remove(&self, path: &Path) -> RuntimeResult<()>;

    // ═══════════════════════════════════════════════════════════════════════
    // FOLDERS
    // ═══════════════════════════════════════════════════════════════════════

    fn dir_create(&self, path: &Path, recursive: bool) -> RuntimeResult<()>;

    fn dir_remove(&self, path: &Path, recursive: bool) -> RuntimeResult<()>;

    /// Entries of `path`, sorted by name.
    fn dir_list(&self, path: &Path) -> RuntimeResult<Vec<PathBuf>>;

    fn cwd(&self) -> RuntimeResult<PathBuf>;

    /// A new, uniquely named temporary folder whose name starts with `prefix`.
    fn temp_dir(&self, prefix: &str) -> RuntimeResult<TempDir>;

    // ═══════════════════════════════════════════════════════════════════════
    // EXTERNAL TOOLS
    // ═══════════════════════════════════════════════════════════════════════

    /// Run `command` with `stdin` as its input and return its stdout.
    ///
    /// A non-zero exit is `RuntimeError::ProcessFailed`.
    async fn exec_pipe(&self, command: &str, args: &[&str], stdin: &[u8]) -> RuntimeResult<Vec<u8>>;

    /// Run a shell command string with `cwd` as working directory.
    ///
    /// A non-zero exit is reported through [`CommandOutput::code`], not as an
    /// error; only a failure to start the shell is an `Err`.
    async fn exec_shell(&self, command: &str, cwd: &Path) -> RuntimeResult<CommandOutput>;

    // ═══════════════════════════════════════════════════════════════════════
    // ENVIRONMENT
    // ═══════════════════════════════════════════════════════════════════════

    fn env_get(&self, name: &str) -> RuntimeResult<Option<String>>;

    /// Locate a tool through the file named by `env_var`.
    ///
    /// Runtimes that can search `PATH` for `name` override this.
    fn find_binary(&self, name: &str, env_var: &str) -> Option<PathBuf> {
        let _ = name;
        let path = PathBuf::from(self.env_get(env_var).ok().flatten()?);
        self.is_file(&path).unwrap_or(false).then_some(path)
    }
}
