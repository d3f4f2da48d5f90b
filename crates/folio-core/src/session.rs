/*
 * session.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Shared state for an export run.
 */

use std::path::PathBuf;
use std::sync::Arc;

use folio_system_runtime::SystemRuntime;

use crate::collaborators::{ContentLoader, DocxSerializer, TexRenderer};
use crate::error::Result;
use crate::pandoc::PandocContent;

/// Runtime and collaborators shared by every export of a run.
///
/// Everything is behind `Arc`, so a session can be cloned into each task.
#[derive(Clone)]
pub struct ExportSession {
    pub runtime: Arc<dyn SystemRuntime>,
    pub loader: Arc<dyn ContentLoader>,
    pub docx: Arc<dyn DocxSerializer>,
    pub tex: Arc<dyn TexRenderer>,

    /// Base for filenames given on the command line
    pub cwd: PathBuf,
}

impl ExportSession {
    /// Session using one engine for loading, Word and LaTeX output.
    pub fn new<E>(runtime: Arc<dyn SystemRuntime>, engine: Arc<E>) -> Result<Self>
    where
        E: ContentLoader + DocxSerializer + TexRenderer + 'static,
    {
        let cwd = runtime.cwd()?;
        Ok(Self {
            runtime,
            loader: engine.clone(),
            docx: engine.clone(),
            tex: engine,
            cwd,
        })
    }

    /// Session backed by the pandoc found on this system
    pub fn with_pandoc(runtime: Arc<dyn SystemRuntime>) -> Result<Self> {
        let pandoc = PandocContent::discover(runtime.as_ref())?;
        Self::new(runtime, Arc::new(pandoc))
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }
}
