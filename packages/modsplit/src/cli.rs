//! Command-line interface for modsplit.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::config::{default_output_dir, DEFAULT_UNIT_EXTENSION};
use crate::error::{Result, SplitError};
use crate::spec::SplitSpec;
use crate::splitting::{extract, locate, BlockKind, SplitEngine};
use crate::types::SourceDocument;
use crate::writer::{commit, ensure_source_preserved, retire_source};

/// modsplit - Split one source file into a module directory along declared markers.
#[derive(Parser)]
#[command(name = "modsplit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a document into units and write them as a module directory.
    Split {
        /// Document to split (e.g., src/core/preview.rs)
        document: PathBuf,

        /// Split specification (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        spec: PathBuf,

        /// Output directory (default: next to the document, named after its stem)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File extension for the written units
        #[arg(short, long, default_value = DEFAULT_UNIT_EXTENSION)]
        extension: String,

        /// Print the units instead of writing them
        #[arg(long)]
        dry_run: bool,

        /// Delete the document after the units were written
        #[arg(long, conflicts_with = "dry_run")]
        remove_source: bool,
    },

    /// Resolve markers and list the blocks without composing anything.
    Check {
        /// Document to inspect
        document: PathBuf,

        /// Split specification (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        spec: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            document,
            spec,
            output,
            extension,
            dry_run,
            remove_source,
        } => split_command(
            &document,
            &spec,
            output.as_deref(),
            &extension,
            dry_run,
            remove_source,
        ),
        Commands::Check { document, spec } => check_command(&document, &spec),
    }
}

/// Read a document from disk, naming it after its path.
fn load_document(path: &Path) -> Result<SourceDocument> {
    if !path.is_file() {
        return Err(SplitError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Document does not exist: {}", path.display()),
        )));
    }
    let text = std::fs::read_to_string(path)?;
    Ok(SourceDocument::new(path.display().to_string(), text))
}

/// Execute the split command.
fn split_command(
    document_path: &Path,
    spec_path: &Path,
    output: Option<&Path>,
    extension: &str,
    dry_run: bool,
    remove_source: bool,
) -> Result<()> {
    let spec = SplitSpec::load(spec_path)?;
    let document = load_document(document_path)?;

    println!(
        "{} {} with {}",
        style("Splitting").bold(),
        style(document.name()).cyan(),
        style(spec_path.display()).green()
    );

    let result = SplitEngine::new().run(&document, &spec)?;

    if dry_run {
        for unit in &result.units {
            println!();
            println!(
                "{} {}",
                style("==>").dim(),
                style(unit.file_name(extension)).cyan().bold()
            );
            print!("{}", unit.body);
        }
        return Ok(());
    }

    let output_dir = output.map_or_else(|| default_output_dir(document_path), Path::to_path_buf);
    ensure_source_preserved(&result, &output_dir, extension, document_path)?;
    let written = commit(&result, &output_dir, extension)?;

    println!("  Units: {}", written.len());
    for path in &written {
        println!("    {}", path.display());
    }

    if remove_source {
        retire_source(document_path)?;
        println!(
            "  {} {}",
            style("Removed").yellow(),
            document_path.display()
        );
    }

    println!();
    println!(
        "{} {}",
        style("Written to:").green().bold(),
        output_dir.display()
    );

    Ok(())
}

/// Execute the check command.
fn check_command(document_path: &Path, spec_path: &Path) -> Result<()> {
    let spec = SplitSpec::load(spec_path)?;
    let document = load_document(document_path)?;

    let boundaries = locate(&document, &spec.markers)?;
    let blocks = extract(&document, &boundaries)?;

    println!(
        "{} {} ({} bytes)",
        style("Document").bold(),
        style(document.name()).cyan(),
        document.len()
    );

    println!();
    println!("{}", style("Boundaries").bold());
    for boundary in &boundaries {
        println!(
            "  {:>8}  {:<6} {}",
            boundary.offset(),
            format!("{:?}", boundary.role).to_lowercase(),
            style(&boundary.marker).cyan()
        );
    }

    println!();
    println!("{}", style("Blocks").bold());
    for block in &blocks {
        let range = format!("{}..{}", block.range.start, block.range.end);
        let labels = block.labels.join(", ");
        match block.kind {
            BlockKind::Content => println!("  {range:>16}  content  {}", style(labels).green()),
            BlockKind::Discard => println!("  {range:>16}  discard  {}", style(labels).dim()),
        }
    }

    println!();
    println!("{} {} blocks", style("OK").green().bold(), blocks.len());
    Ok(())
}
