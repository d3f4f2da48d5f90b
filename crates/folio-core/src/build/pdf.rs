/*
 * pdf.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * PDF builds from an exported tex folder.
 */

//! Building a PDF from an exported tex source.
//!
//! The folder holding the tex file is mirrored into a fresh
//! [`BuildWorkspace`], the compile command runs there, and the PDF (plus
//! optional logs) is copied back next to the requested output. A failing
//! compile is only logged: whether the export succeeded is decided by
//! whether the PDF exists at its destination afterwards.

use std::path::{Path, PathBuf};

use folio_system_runtime::SystemRuntime;
use folio_tex::{TexTemplate, pdf_export_command};
use tracing::{debug, error, info};

use crate::build::clean::clean_output;
use crate::build::workspace::BuildWorkspace;
use crate::error::{ExportError, Result};

/// Environment variable locating the latexmk binary
pub const LATEXMK_ENV: &str = "FOLIO_LATEXMK";

const TEX_PLACEHOLDER: &str = "{tex}";
const LOG_PLACEHOLDER: &str = "{log}";

/// Options for a single PDF build
#[derive(Debug, Clone, Default)]
pub struct PdfBuildOptions {
    /// Copy compiler logs to `<name>_pdf_logs/` beside the PDF
    pub copy_logs: bool,
    /// Remove a previous PDF and log folder first
    pub clean: bool,
    /// Replaces the latexmk invocation; `{tex}` and `{log}` are substituted
    pub command: Option<String>,
}

/// Files of one build, inside the workspace and at their destinations
#[derive(Debug)]
struct PdfBuildPaths {
    pdf_build: PathBuf,
    log_build: PathBuf,
    shell_log_build: PathBuf,
    log_output_folder: PathBuf,
    log_file: String,
    shell_log_file: String,
}

impl PdfBuildPaths {
    fn new(workspace: &Path, pdf_output: &Path) -> Self {
        let basename = pdf_output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let log_file = format!("{basename}.log");
        let shell_log_file = format!("{basename}.shell.log");
        let output_dir = pdf_output.parent().unwrap_or(Path::new(""));

        Self {
            pdf_build: workspace.join(format!("{basename}.pdf")),
            log_build: workspace.join(&log_file),
            shell_log_build: workspace.join(&shell_log_file),
            log_output_folder: output_dir.join(format!("{basename}_pdf_logs")),
            log_file,
            shell_log_file,
        }
    }
}

/// Shell command compiling `tex_file`, with compiler output sent to `log_file`.
pub fn build_command(
    runtime: &dyn SystemRuntime,
    tex_file: &str,
    log_file: &str,
    template: Option<&TexTemplate>,
    custom: Option<&str>,
) -> String {
    if let Some(custom) = custom {
        return custom
            .replace(TEX_PLACEHOLDER, tex_file)
            .replace(LOG_PLACEHOLDER, log_file);
    }
    let command = match template {
        Some(template) => template.pdf_export_command(tex_file, log_file),
        None => pdf_export_command(tex_file, log_file, None),
    };
    match (
        runtime.find_binary("latexmk", LATEXMK_ENV),
        command.strip_prefix("latexmk "),
    ) {
        (Some(latexmk), Some(rest)) => format!("\"{}\" {rest}", latexmk.display()),
        _ => command,
    }
}

/// Compile the tex export at `tex_output` and place the PDF at `pdf_output`.
///
/// Fails with [`ExportError::MissingTexFile`] when the tex file did not make
/// it into the workspace, and with [`ExportError::PdfExportFailed`] when no
/// PDF exists at `pdf_output` once everything has been copied back.
pub async fn create_pdf_given_tex_export(
    runtime: &dyn SystemRuntime,
    tex_output: &Path,
    pdf_output: &Path,
    template: Option<&TexTemplate>,
    options: &PdfBuildOptions,
) -> Result<()> {
    if options.clean {
        clean_output(runtime, pdf_output)?;
    }

    let mut workspace = BuildWorkspace::create(runtime)?;
    let tex_dir = tex_output.parent().unwrap_or(Path::new(""));
    workspace.mirror(runtime, tex_dir)?;

    let tex_file = tex_output
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    if tex_file.is_empty() || !runtime.is_file(&workspace.path().join(&tex_file))? {
        error!("Could not find tex file: {}", tex_output.display());
        return Err(ExportError::MissingTexFile(tex_output.to_path_buf()));
    }

    let paths = PdfBuildPaths::new(workspace.path(), pdf_output);
    if options.clean {
        clean_output(runtime, &paths.log_output_folder)?;
    }

    let command = build_command(
        runtime,
        &tex_file,
        &paths.shell_log_file,
        template,
        options.command.as_deref(),
    );
    info!("Rendering pdf to {}", paths.pdf_build.display());
    debug!("Running command:\n> {command}");

    let failure = match runtime.exec_shell(&command, workspace.path()).await {
        Ok(output) if output.success() => {
            debug!("Done building LaTeX.");
            None
        }
        Ok(output) => Some(format!(
            "command exited with code {}\n{}",
            output.code,
            output.stderr_string().trim_end()
        )),
        Err(err) => Some(err.to_string()),
    };
    if let Some(failure) = failure {
        let logs_at = if options.copy_logs {
            paths.log_output_folder.clone()
        } else {
            // Nothing else would preserve the logs
            workspace.keep();
            workspace.path().to_path_buf()
        };
        error!(
            "Error while invoking latexmk - logs available at: {}\n{failure}",
            logs_at.display()
        );
    }

    let pdf_build_exists = runtime.is_file(&paths.pdf_build)?;
    let log_build_exists = runtime.is_file(&paths.log_build)?;
    let shell_log_build_exists = runtime.is_file(&paths.shell_log_build)?;

    if pdf_build_exists {
        if let Some(parent) = pdf_output.parent()
            && !runtime.is_dir(parent)?
        {
            runtime.dir_create(parent, true)?;
        }
        info!("Copying pdf to {}", pdf_output.display());
        runtime.file_copy(&paths.pdf_build, pdf_output)?;
        debug!("Copied PDF file to {}", pdf_output.display());
    } else {
        error!("Could not find {} as expected", paths.pdf_build.display());
    }

    if options.copy_logs {
        copy_logs(runtime, &paths, log_build_exists, shell_log_build_exists)?;
    }

    if !runtime.is_file(pdf_output)? {
        return Err(ExportError::PdfExportFailed(pdf_output.to_path_buf()));
    }
    Ok(())
}

fn copy_logs(
    runtime: &dyn SystemRuntime,
    paths: &PdfBuildPaths,
    log_exists: bool,
    shell_log_exists: bool,
) -> Result<()> {
    if (log_exists || shell_log_exists) && !runtime.is_dir(&paths.log_output_folder)? {
        runtime.dir_create(&paths.log_output_folder, true)?;
    }
    let copies = [
        (log_exists, &paths.log_build, &paths.log_file),
        (shell_log_exists, &paths.shell_log_build, &paths.shell_log_file),
    ];
    for (exists, src, name) in copies {
        if exists {
            let dest = paths.log_output_folder.join(name);
            debug!("Copying log file: {}", dest.display());
            runtime.file_copy(src, &dest)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_system_runtime::NativeRuntime;

    #[test]
    fn test_build_paths() {
        let paths = PdfBuildPaths::new(Path::new("/ws"), Path::new("/out/dist/paper.pdf"));
        assert_eq!(paths.pdf_build, PathBuf::from("/ws/paper.pdf"));
        assert_eq!(paths.log_build, PathBuf::from("/ws/paper.log"));
        assert_eq!(paths.shell_log_build, PathBuf::from("/ws/paper.shell.log"));
        assert_eq!(paths.log_output_folder, PathBuf::from("/out/dist/paper_pdf_logs"));
    }

    #[test]
    fn test_custom_command_placeholders() {
        let rt = NativeRuntime::new();
        let cmd = build_command(&rt, "main.tex", "main.shell.log", None, Some("tectonic {tex} > {log}"));
        assert_eq!(cmd, "tectonic main.tex > main.shell.log");
    }

    #[test]
    fn test_default_command_targets_tex_and_log() {
        let rt = NativeRuntime::new();
        let cmd = build_command(&rt, "main.tex", "main.shell.log", None, None);
        assert!(cmd.contains("latexmk"));
        assert!(cmd.contains("-xelatex"));
        assert!(cmd.contains(" main.tex"));
        assert!(cmd.contains("main.shell.log"));
    }

    #[tokio::test]
    async fn test_missing_tex_file_is_fatal() {
        let rt = NativeRuntime::new();
        let temp = tempfile::TempDir::new().unwrap();
        let tex_dir = temp.path().join("tex");
        std::fs::create_dir(&tex_dir).unwrap();

        let err = create_pdf_given_tex_export(
            &rt,
            &tex_dir.join("main.tex"),
            &temp.path().join("main.pdf"),
            None,
            &PdfBuildOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ExportError::MissingTexFile(_)));
    }
}
