//! Folio CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Export documents to Word, LaTeX and PDF", long_about = None)]
struct Cli {
    /// Show debug output
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a document to Word (.docx)
    Docx {
        /// Document to export
        file: PathBuf,

        /// Write a single export to FILE (relative to the current directory)
        #[arg(long)]
        filename: Option<String>,

        /// Remove existing outputs first
        #[arg(long)]
        clean: bool,
    },

    /// Export a document to LaTeX (.tex)
    Tex {
        /// Document to export
        file: PathBuf,

        /// Write a single export to FILE (relative to the current directory)
        #[arg(long)]
        filename: Option<String>,

        /// Remove existing outputs first
        #[arg(long)]
        clean: bool,

        /// Directory holding LaTeX templates
        #[arg(long)]
        template_dir: Option<PathBuf>,
    },

    /// Export a document to PDF via LaTeX
    Pdf {
        /// Document to export
        file: PathBuf,

        /// Write a single export to FILE (relative to the current directory)
        #[arg(long)]
        filename: Option<String>,

        /// Remove existing outputs first
        #[arg(long)]
        clean: bool,

        /// Copy LaTeX logs next to the PDF
        #[arg(long)]
        logs: bool,

        /// Directory holding LaTeX templates
        #[arg(long)]
        template_dir: Option<PathBuf>,

        /// Compile command replacing latexmk ({tex} and {log} are substituted)
        #[arg(long)]
        pdf_command: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.debug {
        "folio=debug,folio_core=debug,folio_tex=debug"
    } else {
        "folio=info,folio_core=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Docx {
            file,
            filename,
            clean,
        } => commands::docx::execute(commands::docx::DocxArgs {
            file,
            filename,
            clean,
        }),
        Commands::Tex {
            file,
            filename,
            clean,
            template_dir,
        } => commands::tex::execute(commands::tex::TexArgs {
            file,
            filename,
            clean,
            template_dir,
        }),
        Commands::Pdf {
            file,
            filename,
            clean,
            logs,
            template_dir,
            pdf_command,
        } => commands::pdf::execute(commands::pdf::PdfArgs {
            file,
            filename,
            clean,
            logs,
            template_dir,
            pdf_command,
        }),
    }
}
