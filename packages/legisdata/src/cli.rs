//! Command-line interface for the parser.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Datelike;
use clap::{Args, Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::batch::{collect_inputs, run_batch, BatchOptions, BatchReport, CancelToken};
use crate::config::{
    data_get_path, path_generate, validate_session, validate_year, ListingClass, ListingType,
    ParseOptions, DEFAULT_DATA_ROOT, DEFAULT_DUN,
};
use crate::error::{ParserError, Result};

/// Legisdata - Rebuild Hansard and inquiry records from partitioned PDFs.
#[derive(Parser)]
#[command(name = "legisdata")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse partitioned Hansard transcripts.
    Hansard(ParseArgs),

    /// Parse partitioned inquiry documents.
    Inquiry(ParseArgs),

    /// Parse both listings of one session in the data directory.
    Session(SessionArgs),
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Assembly identifier written into the metadata
    #[arg(long, default_value = DEFAULT_DUN)]
    pub dun: String,

    /// List every element no rule claimed in the summary
    #[arg(long, env = "DEBUG")]
    pub debug: bool,

    /// Only accept officer entries inside the officer section
    #[arg(long)]
    pub strict_officers: bool,

    /// Worker threads (default: available parallelism)
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    /// Partitioned JSON files or directories containing them
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory the parsed JSON documents are written to
    #[arg(short, long)]
    pub output: PathBuf,

    /// Sitting year (default: current year)
    #[arg(short, long)]
    pub year: Option<String>,

    /// Session number
    #[arg(short, long, default_value = "1")]
    pub session: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Sitting year
    #[arg(short, long)]
    pub year: String,

    /// Session number
    #[arg(short, long)]
    pub session: String,

    /// Root of the data directory
    #[arg(long, default_value = DEFAULT_DATA_ROOT)]
    pub data_root: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl CommonArgs {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions::default()
            .with_debug(self.debug)
            .with_strict_officer_section(self.strict_officers)
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Hansard(args) => parse_command(ListingType::Hansard, &args),
        Commands::Inquiry(args) => parse_command(ListingType::Inquiry, &args),
        Commands::Session(args) => session_command(&args),
    }
}

/// Execute the hansard or inquiry command.
fn parse_command(listing: ListingType, args: &ParseArgs) -> Result<()> {
    let year = match &args.year {
        Some(year) => validate_year(year)?,
        None => validate_year(&chrono::Local::now().year().to_string())?,
    };
    let session = validate_session(&args.session)?;

    // Validate output directory before parsing anything
    if !args.output.exists() {
        return Err(ParserError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Output directory does not exist: {}", args.output.display()),
        )));
    }
    if !args.output.is_dir() {
        return Err(ParserError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Output path is not a directory: {}", args.output.display()),
        )));
    }

    let files = collect_inputs(&args.inputs)?;
    check_output_dir(&args.output, &files)?;
    let options = BatchOptions {
        listing,
        output_dir: args.output.clone(),
        year,
        session,
        dun: args.common.dun.clone(),
        parse: args.common.parse_options(),
        jobs: args.common.jobs,
    };

    let report = run_with_progress(&files, &options)?;
    print_summary(&report, &args.output);

    Ok(())
}

/// Refuse an output directory that also holds one of the inputs.
///
/// Hansard output keeps the input's file name, so writing next to the input
/// would replace it.
fn check_output_dir(output: &Path, files: &[PathBuf]) -> Result<()> {
    let output_dir = fs::canonicalize(output)?;

    for file in files {
        let parent = match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if fs::canonicalize(parent)? == output_dir {
            return Err(ParserError::OutputIsInputDir {
                output: output.to_path_buf(),
                input: file.clone(),
            });
        }
    }

    Ok(())
}

/// Execute the session command.
fn session_command(args: &SessionArgs) -> Result<()> {
    let year = validate_year(&args.year)?;
    let session = validate_session(&args.session)?;
    let base = path_generate(&args.data_root, year, session);

    for listing in [ListingType::Hansard, ListingType::Inquiry] {
        let input = data_get_path(&base, listing, ListingClass::Extract);
        if !input.is_dir() {
            println!(
                "{} {} (no {})",
                style("Skipping").yellow().bold(),
                style(listing).cyan(),
                input.display()
            );
            continue;
        }

        let output = data_get_path(&base, listing, ListingClass::Parse);
        fs::create_dir_all(&output)?;

        let files = collect_inputs(&[input])?;
        let options = BatchOptions {
            listing,
            output_dir: output.clone(),
            year,
            session,
            dun: args.common.dun.clone(),
            parse: args.common.parse_options(),
            jobs: args.common.jobs,
        };

        let report = run_with_progress(&files, &options)?;
        print_summary(&report, &output);
    }

    Ok(())
}

fn run_with_progress(files: &[PathBuf], options: &BatchOptions) -> Result<BatchReport> {
    println!(
        "{} {} {} for {} session {}",
        style("Parsing").bold(),
        style(files.len()).cyan(),
        style(options.listing).cyan(),
        style(options.year).green(),
        style(options.session).green()
    );

    let pb = ProgressBar::new(files.len() as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars("#>-"),
    );

    let result = run_batch(files, options, &CancelToken::new(), |path| {
        pb.set_message(
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
        pb.inc(1);
    });

    pb.finish_and_clear();
    result
}

fn print_summary(report: &BatchReport, output: &Path) {
    println!(
        "  Written: {}",
        style(report.written.len()).green().bold()
    );
    if !report.skipped.is_empty() {
        println!("  Skipped: {}", style(report.skipped.len()).yellow().bold());
        for skipped in &report.skipped {
            println!(
                "    {} {}",
                style(skipped.path.display()).dim(),
                skipped.reason
            );
        }
    }
    if !report.unclaimed.is_empty() {
        println!(
            "  Unclaimed elements: {}",
            style(report.unclaimed.len()).yellow()
        );
        for unclaimed in &report.unclaimed {
            let diagnostic = &unclaimed.diagnostic;
            println!(
                "    {} #{} [{}] {}",
                style(unclaimed.path.display()).dim(),
                diagnostic.index,
                diagnostic.section.map_or("-", |section| section.as_str()),
                diagnostic.text
            );
        }
    }
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output.display()
    );
    println!();
}
