//! pdf-outline CLI - heading outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf_outline::render::{self, JsonFormat};
use pdf_outline::{
    run_batch, BatchOptions, BatchReporter, BatchSummary, DocumentResult, Error, OutlineOptions,
    OutlineExtractor, ParseOptions, PdfOutline, PdfReader,
};

const DEFAULT_INPUT_DIR: &str = "/app/input";
const DEFAULT_OUTPUT_DIR: &str = "/app/output";

#[derive(Parser)]
#[command(name = "pdf-outline")]
#[command(version)]
#[command(about = "Extract titles and H1-H3 heading outlines from PDF files", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Directory containing PDF files
    #[arg(value_name = "INPUT_DIR", env = "PDF_OUTLINE_INPUT", default_value = DEFAULT_INPUT_DIR)]
    input: PathBuf,

    /// Directory receiving one JSON file per PDF
    #[arg(value_name = "OUTPUT_DIR", env = "PDF_OUTLINE_OUTPUT", default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every PDF in a directory
    Batch {
        /// Directory containing PDF files
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Directory receiving one JSON file per PDF
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        #[command(flatten)]
        tuning: Tuning,

        /// Process files one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Extract the outline of a single PDF
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        tuning: Tuning,
    },

    /// Show the intermediate products of outline extraction
    Inspect {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        tuning: Tuning,
    },

    /// Dump every text run the reader produces as JSON
    Runs {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Compact JSON output
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

/// Options shared by the commands that run the outline pipeline.
#[derive(Args, Clone, Default)]
struct Tuning {
    /// Compact JSON output
    #[arg(long)]
    compact: bool,

    /// Skip pages whose content cannot be decoded instead of failing
    #[arg(long)]
    lenient: bool,

    /// Seed for k-means clustering
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Use exhaustive clustering instead of k-means
    #[arg(long)]
    exhaustive: bool,
}

impl Tuning {
    fn json_format(&self) -> JsonFormat {
        if self.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        }
    }

    fn parse_options(&self) -> ParseOptions {
        let options = ParseOptions::new();
        if self.lenient {
            options.lenient()
        } else {
            options
        }
    }

    fn outline_options(&self) -> OutlineOptions {
        let mut options = OutlineOptions::new();
        if let Some(seed) = self.seed {
            options = options.with_seed(seed);
        }
        if self.exhaustive {
            options = options.exhaustive();
        }
        options
    }

    fn builder(&self) -> PdfOutline {
        PdfOutline::new()
            .with_parse_options(self.parse_options())
            .with_outline_options(self.outline_options())
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Batch {
            input,
            output,
            tuning,
            sequential,
        }) => cmd_batch(&input, &output, &tuning, sequential),
        Some(Commands::Extract {
            input,
            output,
            tuning,
        }) => cmd_extract(&input, output.as_deref(), &tuning),
        Some(Commands::Inspect { input, tuning }) => cmd_inspect(&input, &tuning),
        Some(Commands::Runs {
            input,
            output,
            compact,
        }) => cmd_runs(&input, output.as_deref(), compact),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_batch(&cli.input, &cli.output, &Tuning::default(), false),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Progress bar reporter for batch runs.
struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    fn new() -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        Self { bar }
    }
}

impl BatchReporter for ProgressReporter {
    fn on_start(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_message("Extracting outlines...");
    }

    fn on_success(&self, input: &Path, _output: &Path, result: &DocumentResult) {
        log::info!("{}: {} headings", input.display(), result.outline.len());
        self.bar.inc(1);
    }

    fn on_failure(&self, input: &Path, error: &Error) {
        self.bar.println(format!(
            "{} {}: {}",
            "Failed".red(),
            input.display(),
            error
        ));
        self.bar.inc(1);
    }

    fn on_finish(&self, _summary: &BatchSummary) {
        self.bar.finish_with_message("Done!");
    }
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    tuning: &Tuning,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = BatchOptions::new()
        .with_parallel(!sequential)
        .with_json_format(tuning.json_format())
        .with_parse_options(tuning.parse_options())
        .with_outline_options(tuning.outline_options());

    let reporter = ProgressReporter::new();
    let summary = run_batch(input, output, &options, &reporter)?;

    println!(
        "\n{} {} processed, {} written to {}",
        "Summary:".green().bold(),
        summary.processed,
        summary.succeeded.len(),
        output.display()
    );
    if !summary.failed.is_empty() {
        println!("{}", "Failures:".yellow().bold());
        let last = summary.failed.len() - 1;
        for (i, (path, reason)) in summary.failed.iter().enumerate() {
            let branch = if i == last { "└─" } else { "├─" };
            println!("  {} {}: {}", branch.dimmed(), path.display(), reason);
        }
    }

    // Per-file failures are not a process failure.
    Ok(())
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    tuning: &Tuning,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = tuning.builder().extract(input)?;

    if let Some(output_path) = output {
        render::write_json(&result, output_path, tuning.json_format())?;
        println!("{} {}", "Written to".green(), output_path.display());
    } else {
        println!("{}", render::to_json(&result, tuning.json_format())?);
    }

    Ok(())
}

fn cmd_inspect(input: &Path, tuning: &Tuning) -> Result<(), Box<dyn std::error::Error>> {
    let reader = PdfReader::open_with_options(input, tuning.parse_options())?;
    let doc = reader.read()?;
    let analysis = OutlineExtractor::new(tuning.outline_options()).analyze(&doc)?;

    println!("{}", "Document".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {}", "Runs".bold(), doc.run_count());
    println!("{}: {}", "Candidates".bold(), analysis.candidates.len());

    println!();
    println!("{}", "Size Histogram".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    let max_sizes = tuning.outline_options().max_sizes;
    for (i, (size, count)) in analysis.histogram.iter().enumerate() {
        let marker = if i < max_sizes { "*" } else { " " };
        println!("  {} {:>8}pt  {}", marker.green(), size.to_string(), count);
    }

    println!();
    println!("{}", "Levels".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    if analysis.levels.is_empty() {
        println!("  {}", "(no heading hierarchy)".dimmed());
    }
    for (size, level) in analysis.levels.iter() {
        println!("  {:>8}pt  {}", size.to_string(), level.to_string().bold());
    }

    println!();
    println!("{}: {}", "Title".bold(), analysis.result.title);
    println!("{}: {}", "Headings".bold(), analysis.result.outline.len());

    Ok(())
}

fn cmd_runs(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = PdfReader::open(input)?.read()?;
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    if let Some(output_path) = output {
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        render::write_json(&doc, output_path, format)?;
        println!("{} {}", "Written to".green(), output_path.display());
    } else {
        println!("{}", render::to_json(&doc, format)?);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdf-outline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF heading outline extraction tool");
    println!();
    println!("License: MIT");
}
