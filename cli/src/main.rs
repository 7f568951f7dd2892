//! pdfoutline CLI - document outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::{
    process_dir, BatchOptions, FragmentSource, JsonFormat, OutlineExtractor, PdfFragmentSource,
};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract document outlines (title + H1-H3 headings) from PDFs as JSON", long_about = None)]
struct Cli {
    /// Input PDF file or directory of PDFs
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output directory (single-file mode prints to stdout if omitted)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Process documents one at a time
    #[arg(long)]
    sequential: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = if cli.input.is_dir() {
        run_batch(&cli)
    } else {
        run_single(&cli)
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(cli: &Cli) -> JsonFormat {
    if cli.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn run_single(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = OutlineExtractor::new();
    let outline = extractor.extract_file(&cli.input)?;
    let json = pdfoutline::render::to_json(&outline, json_format(cli))?;

    match &cli.output {
        Some(output_dir) => {
            fs::create_dir_all(output_dir)?;
            let stem = cli
                .input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "output".to_string());
            let path = output_dir.join(format!("{}.json", stem));
            fs::write(&path, json)?;
            println!(
                "{} {} ({} headings)",
                "Wrote".green().bold(),
                path.display(),
                outline.headings.len()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn run_batch(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("output"));

    let source = PdfFragmentSource::new();
    let extractor = OutlineExtractor::new();
    let mut options = BatchOptions::new().with_format(json_format(cli));
    if cli.sequential {
        options = options.sequential();
    }

    let count = count_inputs(&cli.input, &source)?;
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Processing {} document(s)...", count));

    let summary = process_dir(&cli.input, &output_dir, &source, &extractor, &options)?;
    pb.finish_and_clear();

    println!(
        "{} {} of {} document(s) -> {}",
        "Processed".green().bold(),
        summary.written.len(),
        summary.total(),
        output_dir.display()
    );

    if !summary.failures.is_empty() {
        println!("{}", "Skipped:".yellow().bold());
        for failure in &summary.failures {
            println!(
                "  {} {} ({})",
                "✗".red(),
                failure.path.display(),
                failure.error
            );
        }
    }
    Ok(())
}

fn count_inputs(
    dir: &Path,
    source: &PdfFragmentSource,
) -> Result<usize, Box<dyn std::error::Error>> {
    let count = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && source.supports(path))
        .count();
    Ok(count)
}
