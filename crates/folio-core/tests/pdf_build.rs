/*
 * tests/pdf_build.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Integration tests for building PDFs from tex exports.
 */

//! The compiler is replaced by small `sh` commands, so these tests run
//! without a LaTeX installation.

#![cfg(unix)]

use folio_core::{ExportError, PdfBuildOptions, create_pdf_given_tex_export, resolve_and_log_errors};
use folio_system_runtime::NativeRuntime;

mod common;
use common::write;

fn options(command: &str, copy_logs: bool) -> PdfBuildOptions {
    PdfBuildOptions {
        copy_logs,
        clean: false,
        command: Some(command.to_string()),
    }
}

#[tokio::test]
async fn test_no_compiler_raises_export_failure() {
    let rt = NativeRuntime::new();
    let temp = tempfile::TempDir::new().unwrap();
    let tex = write(temp.path(), "tex/main.tex", "\\documentclass{article}");
    let pdf = temp.path().join("out/main.pdf");

    let err = create_pdf_given_tex_export(&rt, &tex, &pdf, None, &options("exit 127", false))
        .await
        .unwrap_err();
    assert!(matches!(err, ExportError::PdfExportFailed(ref p) if *p == pdf));
    assert!(!pdf.exists());
}

#[tokio::test]
async fn test_successful_build_copies_pdf_and_primary_log() {
    let rt = NativeRuntime::new();
    let temp = tempfile::TempDir::new().unwrap();
    let tex = write(temp.path(), "tex/out.tex", "\\documentclass{article}");
    let pdf = temp.path().join("dist/out.pdf");

    // Produces the PDF and the primary log, but no shell log
    let command = "printf '%%PDF' > out.pdf && printf 'latex log' > out.log";
    create_pdf_given_tex_export(&rt, &tex, &pdf, None, &options(command, true))
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&pdf).unwrap(), "%PDF");
    let logs = temp.path().join("dist/out_pdf_logs");
    assert_eq!(std::fs::read_to_string(logs.join("out.log")).unwrap(), "latex log");
    assert!(!logs.join("out.shell.log").exists());
}

#[tokio::test]
async fn test_shell_log_is_captured() {
    let rt = NativeRuntime::new();
    let temp = tempfile::TempDir::new().unwrap();
    let tex = write(temp.path(), "tex/paper.tex", "body");
    let pdf = temp.path().join("paper.pdf");

    let command = "echo compiling {tex} > {log} && cp {tex} paper.pdf";
    create_pdf_given_tex_export(&rt, &tex, &pdf, None, &options(command, true))
        .await
        .unwrap();

    let shell_log = temp.path().join("paper_pdf_logs/paper.shell.log");
    assert_eq!(std::fs::read_to_string(shell_log).unwrap(), "compiling paper.tex\n");
    assert_eq!(std::fs::read_to_string(&pdf).unwrap(), "body");
}

#[tokio::test]
async fn test_failing_compiler_with_artifact_still_succeeds() {
    let rt = NativeRuntime::new();
    let temp = tempfile::TempDir::new().unwrap();
    let tex = write(temp.path(), "tex/main.tex", "x");
    let pdf = temp.path().join("main.pdf");

    // Success is judged by the artifact, not the exit code
    let command = "printf pdf > main.pdf; exit 1";
    create_pdf_given_tex_export(&rt, &tex, &pdf, None, &options(command, true))
        .await
        .unwrap();
    assert!(pdf.is_file());
}

#[tokio::test]
async fn test_supporting_files_are_mirrored() {
    let rt = NativeRuntime::new();
    let temp = tempfile::TempDir::new().unwrap();
    let tex = write(temp.path(), "tex/main.tex", "x");
    write(temp.path(), "tex/figures/plot.txt", "plot");
    let pdf = temp.path().join("main.pdf");

    let command = "cat figures/plot.txt > main.pdf";
    create_pdf_given_tex_export(&rt, &tex, &pdf, None, &options(command, false))
        .await
        .unwrap();
    assert_eq!(std::fs::read_to_string(&pdf).unwrap(), "plot");
}

#[tokio::test]
async fn test_clean_removes_stale_output() {
    let rt = NativeRuntime::new();
    let temp = tempfile::TempDir::new().unwrap();
    let tex = write(temp.path(), "tex/main.tex", "x");
    let pdf = write(temp.path(), "main.pdf", "stale");
    write(temp.path(), "main_pdf_logs/main.log", "stale log");

    let opts = PdfBuildOptions {
        clean: true,
        ..options("exit 1", false)
    };
    let err = create_pdf_given_tex_export(&rt, &tex, &pdf, None, &opts)
        .await
        .unwrap_err();
    assert!(matches!(err, ExportError::PdfExportFailed(_)));
    assert!(!pdf.exists());
    assert!(!temp.path().join("main_pdf_logs").exists());
}

#[tokio::test]
async fn test_failure_does_not_block_sibling_build() {
    let rt = NativeRuntime::new();
    let temp = tempfile::TempDir::new().unwrap();
    let good_tex = write(temp.path(), "good/good.tex", "x");
    let missing_tex = temp.path().join("missing/gone.tex");
    std::fs::create_dir_all(missing_tex.parent().unwrap()).unwrap();

    let good_pdf = temp.path().join("good.pdf");
    let bad_pdf = temp.path().join("bad.pdf");
    let good_opts = options("printf ok > good.pdf", false);
    let bad_opts = options("printf ok > bad.pdf", false);

    let report = resolve_and_log_errors(vec![
        create_pdf_given_tex_export(&rt, &missing_tex, &bad_pdf, None, &bad_opts),
        create_pdf_given_tex_export(&rt, &good_tex, &good_pdf, None, &good_opts),
    ])
    .await;

    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].starts_with("Could not find tex file"));
    assert!(good_pdf.is_file());
    assert!(!bad_pdf.exists());
}

#[tokio::test]
async fn test_failed_build_without_logs_keeps_workspace() {
    let rt = NativeRuntime::new();
    let temp = tempfile::TempDir::new().unwrap();
    let tex = write(temp.path(), "tex/main.tex", "x");
    let pdf = temp.path().join("main.pdf");
    let marker = temp.path().join("workspace.txt");

    let command = format!("pwd > '{}'; exit 1", marker.display());
    let err = create_pdf_given_tex_export(&rt, &tex, &pdf, None, &options(&command, false))
        .await
        .unwrap_err();
    assert!(matches!(err, ExportError::PdfExportFailed(_)));

    // The logged location must still be there to inspect
    let workspace = std::path::PathBuf::from(std::fs::read_to_string(&marker).unwrap().trim_end());
    assert!(workspace.join("main.tex").is_file());
    std::fs::remove_dir_all(workspace).unwrap();
}

#[tokio::test]
async fn test_failed_build_with_logs_removes_workspace() {
    let rt = NativeRuntime::new();
    let temp = tempfile::TempDir::new().unwrap();
    let tex = write(temp.path(), "tex/main.tex", "x");
    let pdf = temp.path().join("main.pdf");
    let marker = temp.path().join("workspace.txt");

    let command = format!("pwd > '{}'; echo failed > main.log; exit 1", marker.display());
    create_pdf_given_tex_export(&rt, &tex, &pdf, None, &options(&command, true))
        .await
        .unwrap_err();

    let workspace = std::path::PathBuf::from(std::fs::read_to_string(&marker).unwrap().trim_end());
    assert!(!workspace.exists());
    let log = temp.path().join("main_pdf_logs/main.log");
    assert_eq!(std::fs::read_to_string(log).unwrap(), "failed\n");
}
