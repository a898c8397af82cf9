//! folder2pdf CLI tool
//!
//! Converts the images in `img/` into one PDF, or each document in `DOC/`
//! into its own PDF, writing the results to `PDF/`.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use folder2pdf::config::{
    base_name_or, Settings, DEFAULT_DOCUMENT_BASE_NAME, DEFAULT_IMAGE_BASE_NAME,
};
use folder2pdf::layout::TextLayout;
use folder2pdf::pipeline::{collect_documents, collect_images, documents_to_pdf, images_to_pdf};
use folder2pdf::viewer::open_in_viewer;

/// folder2pdf - Turn a folder of images or documents into PDFs
#[derive(Parser)]
#[command(name = "folder2pdf")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Pick a mode interactively
    folder2pdf

    # All images in img/ into one PDF named vacation[<n>]_<timestamp>.pdf
    folder2pdf images --name vacation

    # Each document in ./notes into its own PDF, without opening a viewer
    folder2pdf docs --doc-dir notes --no-open")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory that relative folders resolve against (default: the executable's directory)
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Image source folder
    #[arg(long, global = true, value_name = "DIR")]
    img_dir: Option<PathBuf>,

    /// Document source folder
    #[arg(long, global = true, value_name = "DIR")]
    doc_dir: Option<PathBuf>,

    /// Output folder for generated PDFs
    #[arg(long, global = true, value_name = "DIR")]
    pdf_dir: Option<PathBuf>,

    /// Do not open generated PDFs in the system viewer
    #[arg(long, global = true)]
    no_open: bool,

    /// Show progress logging (-v for info, -vv for debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine every image in the image folder into one PDF
    Images {
        /// Base name for the PDF (prompted for when omitted)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Convert each document in the document folder into its own PDF
    Docs {
        /// Base name for the PDFs (prompted for when omitted)
        #[arg(short, long)]
        name: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("folder2pdf={}", level)))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = settings_from(&cli)?;

    let command = match cli.command {
        Some(command) => command,
        None => choose_mode()?,
    };

    match command {
        Commands::Images { name } => cmd_images(&settings, name),
        Commands::Docs { name } => cmd_docs(&settings, name),
    }
}

/// Build run settings from the command line
fn settings_from(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = match &cli.root {
        Some(root) => Settings {
            root: root.clone(),
            ..Settings::default()
        },
        None => Settings::beside_executable().context("Could not locate the program directory")?,
    };

    settings.open_viewer = !cli.no_open;
    if let Some(dir) = &cli.img_dir {
        settings.image_dir = dir.clone();
    }
    if let Some(dir) = &cli.doc_dir {
        settings.document_dir = dir.clone();
    }
    if let Some(dir) = &cli.pdf_dir {
        settings.output_dir = dir.clone();
    }

    Ok(settings)
}

/// Print a question and read one line of input (empty on end of input)
fn prompt(question: &str) -> io::Result<String> {
    print!("{}", question);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Interactive mode menu
fn choose_mode() -> anyhow::Result<Commands> {
    println!("Choose conversion type:");
    println!("  1  Images to PDF");
    println!("  2  Documents to PDF");

    let choice = prompt("Enter 1 or 2: ")?;
    match choice.as_str() {
        "1" => Ok(Commands::Images { name: None }),
        "2" => Ok(Commands::Docs { name: None }),
        _ => bail!("Invalid choice: '{}'", choice),
    }
}

/// Use `--name` when given, otherwise ask
fn resolve_base_name(name: Option<String>, question: &str, default: &str) -> anyhow::Result<String> {
    let input = match name {
        Some(name) => name,
        None => prompt(question)?,
    };
    Ok(base_name_or(&input, default))
}

fn open_if_requested(settings: &Settings, path: &Path) {
    if !settings.open_viewer {
        return;
    }
    if let Err(e) = open_in_viewer(path) {
        eprintln!("Warning: could not open {}: {}", path.display(), e);
    }
}

/// Combine all images into one PDF
fn cmd_images(settings: &Settings, name: Option<String>) -> anyhow::Result<()> {
    let images = collect_images(&settings.image_path())?;

    let base_name = resolve_base_name(
        name,
        "Enter a name for your PDF file (e.g. vacation, report): ",
        DEFAULT_IMAGE_BASE_NAME,
    )?;

    eprintln!("Converting {} images...", images.len());
    let output = images_to_pdf(&images, &settings.output_path(), &base_name)?;

    println!("PDF created: {}", output.display());
    open_if_requested(settings, &output);

    Ok(())
}

/// Convert each document into its own PDF
fn cmd_docs(settings: &Settings, name: Option<String>) -> anyhow::Result<()> {
    let documents = collect_documents(&settings.document_path())?;

    let base_name = resolve_base_name(
        name,
        "Enter a base name for your document PDF(s) (e.g. report, notes): ",
        DEFAULT_DOCUMENT_BASE_NAME,
    )?;

    eprintln!("Converting {} documents...", documents.len());
    let report = documents_to_pdf(
        &documents,
        &settings.output_path(),
        &base_name,
        &TextLayout::default(),
    )?;

    for skipped in &report.skipped {
        let file = skipped
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        eprintln!("Warning: could not convert {}: {}", file, skipped.reason);
    }

    for output in &report.written {
        println!("PDF created: {}", output.display());
        open_if_requested(settings, output);
    }

    eprintln!(
        "{} converted, {} skipped",
        report.written.len(),
        report.skipped.len()
    );

    Ok(())
}
