/*
 * native.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * NativeRuntime implementation with full system access.
 */

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::traits::{
    CommandOutput, PathKind, PathMetadata, RuntimeError, RuntimeResult, SystemRuntime, TempDir,
};

/// Runtime backed by the host operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRuntime;

impl NativeRuntime {
    pub fn new() -> Self {
        Self
    }
}

fn shell_command(command: &str) -> Command {
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command);
        cmd
    }
    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }
}

#[async_trait]
impl SystemRuntime for NativeRuntime {
    fn file_read(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        Ok(std::fs::read(path)?)
    }

    fn file_write(&self, path: &Path, contents: &[u8]) -> RuntimeResult<()> {
        Ok(std::fs::write(path, contents)?)
    }

    fn path_exists(&self, path: &Path, kind: Option<PathKind>) -> RuntimeResult<bool> {
        let exists = match kind {
            None => path.exists(),
            Some(PathKind::File) => path.is_file(),
            Some(PathKind::Directory) => path.is_dir(),
            Some(PathKind::Symlink) => path.is_symlink(),
        };
        Ok(exists)
    }

    fn path_metadata(&self, path: &Path) -> RuntimeResult<PathMetadata> {
        let file_type = std::fs::symlink_metadata(path)?.file_type();
        let kind = if file_type.is_symlink() {
            PathKind::Symlink
        } else if file_type.is_dir() {
            PathKind::Directory
        } else {
            PathKind::File
        };
        Ok(PathMetadata { kind })
    }

    fn file_copy(&self, src: &Path, dst: &Path) -> RuntimeResult<()> {
        std::fs::copy(src, dst)?;
        Ok(())
    }

    fn file_remove(&self, path: &Path) -> RuntimeResult<()> {
        Ok(std::fs::remove_file(path)?)
    }

    fn dir_create(&self, path: &Path, recursive: bool) -> RuntimeResult<()> {
        if recursive {
            std::fs::create_dir_all(path)?;
        } else {
            std::fs::create_dir(path)?;
        }
        Ok(())
    }

    fn dir_remove(&self, path: &Path, recursive: bool) -> RuntimeResult<()> {
        if recursive {
            std::fs::remove_dir_all(path)?;
        } else {
            std::fs::remove_dir(path)?;
        }
        Ok(())
    }

    fn dir_list(&self, path: &Path) -> RuntimeResult<Vec<PathBuf>> {
        let mut entries = std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort();
        Ok(entries)
    }

    fn cwd(&self) -> RuntimeResult<PathBuf> {
        Ok(std::env::current_dir()?)
    }

    fn temp_dir(&self, prefix: &str) -> RuntimeResult<TempDir> {
        let dir = tempfile::Builder::new().prefix(prefix).tempdir()?;
        Ok(TempDir::new(dir.keep()))
    }

    async fn exec_pipe(&self, command: &str, args: &[&str], stdin: &[u8]) -> RuntimeResult<Vec<u8>> {
        tracing::trace!(command, ?args, "spawning");
        let mut child = Command::new(command)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let mut input = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("stdin pipe unavailable"))?;
        // Feed stdin while draining stdout, then close it so the tool sees EOF
        let feed = async move {
            let written = input.write_all(stdin).await;
            drop(input);
            written
        };
        let (written, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;

        if !output.status.success() {
            return Err(RuntimeError::ProcessFailed {
                code: output.status.code().unwrap_or(-1),
                message: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        // A tool may exit cleanly without reading all of its input
        if let Err(e) = written
            && e.kind() != io::ErrorKind::BrokenPipe
        {
            return Err(e.into());
        }
        Ok(output.stdout)
    }

    async fn exec_shell(&self, command: &str, cwd: &Path) -> RuntimeResult<CommandOutput> {
        tracing::trace!(command, cwd = %cwd.display(), "spawning shell");
        let output = shell_command(command)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .await?;
        Ok(CommandOutput {
            code: output.status.code().unwrap_or(-1),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    fn env_get(&self, name: &str) -> RuntimeResult<Option<String>> {
        Ok(std::env::var(name).ok())
    }

    fn find_binary(&self, name: &str, env_var: &str) -> Option<PathBuf> {
        if let Some(path) = self.env_get(env_var).ok().flatten().map(PathBuf::from)
            && path.is_file()
        {
            return Some(path);
        }
        which::which(name).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_list_is_sorted() {
        let rt = NativeRuntime::new();
        let temp = rt.temp_dir("folio-list").unwrap();
        rt.file_write(&temp.path().join("b.txt"), b"b").unwrap();
        rt.file_write(&temp.path().join("a.txt"), b"a").unwrap();

        let entries = rt.dir_list(temp.path()).unwrap();
        let names: Vec<_> = entries
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_path_metadata_kinds() {
        let rt = NativeRuntime::new();
        let temp = rt.temp_dir("folio-meta").unwrap();
        let file = temp.path().join("f.txt");
        rt.file_write(&file, b"12345").unwrap();

        assert_eq!(rt.path_metadata(&file).unwrap().kind, PathKind::File);
        assert_eq!(rt.path_metadata(temp.path()).unwrap().kind, PathKind::Directory);
    }

    #[test]
    fn test_temp_dirs_are_unique() {
        let rt = NativeRuntime::new();
        let a = rt.temp_dir("folio-unique").unwrap();
        let b = rt.temp_dir("folio-unique").unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exec_shell_runs_in_cwd() {
        let rt = NativeRuntime::new();
        let temp = rt.temp_dir("folio-shell").unwrap();
        let output = rt
            .exec_shell("echo built > out.txt", temp.path())
            .await
            .unwrap();
        assert!(output.success());
        assert_eq!(
            rt.file_read_string(&temp.path().join("out.txt")).unwrap(),
            "built\n"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exec_shell_reports_non_zero_exit() {
        let rt = NativeRuntime::new();
        let temp = rt.temp_dir("folio-shell-fail").unwrap();
        let output = rt.exec_shell("exit 3", temp.path()).await.unwrap();
        assert!(!output.success());
        assert_eq!(output.code, 3);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exec_pipe_round_trips_stdin() {
        let rt = NativeRuntime::new();
        let out = rt.exec_pipe("cat", &[], b"hello").await.unwrap();
        assert_eq!(out, b"hello");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exec_pipe_handles_large_input() {
        let rt = NativeRuntime::new();
        let input = vec![b'x'; 1 << 20];
        let out = rt.exec_pipe("cat", &[], &input).await.unwrap();
        assert_eq!(out.len(), input.len());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exec_pipe_failure() {
        let rt = NativeRuntime::new();
        let err = rt.exec_pipe("sh", &["-c", "exit 2"], b"").await.unwrap_err();
        assert!(matches!(err, RuntimeError::ProcessFailed { code: 2, .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exec_pipe_overlaps_on_one_thread() {
        let rt = NativeRuntime::new();
        let start = std::time::Instant::now();
        let (a, b) = tokio::join!(
            rt.exec_pipe("sh", &["-c", "sleep 1"], b""),
            rt.exec_pipe("sh", &["-c", "sleep 1"], b""),
        );
        a.unwrap();
        b.unwrap();
        assert!(start.elapsed() < std::time::Duration::from_millis(1900));
    }
}
