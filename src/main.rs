//! Command-line interface for vachan.

use clap::{Parser, ValueEnum};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, BufRead, BufReader, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use std::{fs, time};
use thiserror::Error;
use unicode_width::UnicodeWidthStr;
use vachan::{NormFormat, NormalizeError, Vachan};

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum CliFormat {
    #[default]
    Plain,
    Sentences,
    Records,
}

impl From<CliFormat> for NormFormat {
    fn from(cli_format: CliFormat) -> Self {
        match cli_format {
            CliFormat::Plain => NormFormat::Plain,
            CliFormat::Sentences => NormFormat::Sentences,
            CliFormat::Records => NormFormat::Records,
        }
    }
}

#[derive(Error, Debug)]
enum VachanError {
    #[error("Failed to open input file '{path}': {source}")]
    InputFileOpen { path: PathBuf, source: io::Error },

    #[error("Failed to create output file '{path}': {source}")]
    OutputFileCreate { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("REPL error: {0}")]
    Repl(#[from] ReadlineError),

    #[error("Normalization failed: {0}")]
    Normalize(#[from] NormalizeError),
}

#[derive(Parser, Debug)]
#[command(author, version)]
struct Cli {
    /// Direct text input to be normalized.
    #[arg(value_name = "DIRECT_INPUT")]
    direct_input: Vec<String>,

    /// Input file path (default: stdin).
    #[arg(short, long, value_name = "FILE")]
    input_filename: Option<PathBuf>,

    /// Output file path (default: stdout).
    #[arg(short, long, value_name = "FILE")]
    output_filename: Option<PathBuf>,

    /// Default domain tag for records output; a `::domain <name> ` line
    /// directive overrides it per line.
    #[arg(short, long)]
    domain: Option<String>,

    /// Output format. 'records' emits one JSON object per sentence.
    #[arg(short = 'f', long, value_enum, default_value_t = CliFormat::default())]
    format: CliFormat,

    /// Limit processing to the first n lines of a file.
    #[arg(long)]
    max_lines: Option<usize>,

    /// Enable parallel file processing.
    #[arg(short = 'p', long = "use-parallel", action = clap::ArgAction::SetTrue)]
    use_parallel: bool,

    /// Run and display a few samples.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    sample: bool,

    /// Suppress progress indicators.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    silent: bool,
}

fn main() {
    if let Err(err) = run() {
        if let VachanError::Io(e) = &err
            && e.kind() == io::ErrorKind::BrokenPipe
        {
            return;
        }

        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), VachanError> {
    let cli = Cli::parse();
    let vachan = Vachan::new();

    if cli.direct_input.is_empty()
        && cli.input_filename.is_none()
        && !cli.sample
        && std::io::stdin().is_terminal()
    {
        run_repl(&vachan, &cli)?;
        return Ok(());
    }

    if cli.sample
        && cli.direct_input.is_empty()
        && cli.input_filename.is_none()
        && cli.output_filename.is_none()
        && !cli.silent
    {
        show_samples(&vachan)?;
        return Ok(());
    }

    let mut writer = get_writer(&cli.output_filename)?;

    if !cli.direct_input.is_empty() {
        process_direct_input(&vachan, &cli, &mut writer)?;
    }

    if cli.input_filename.is_some() || cli.direct_input.is_empty() {
        process_stream(&vachan, &cli, &mut writer)?;
    }

    writer.flush()?;

    if cli.sample {
        println!(
            "Note: The --sample option was ignored because input was provided via other flags."
        );
    }

    Ok(())
}

fn process_direct_input(
    vachan: &Vachan,
    cli: &Cli,
    writer: &mut dyn Write,
) -> Result<(), VachanError> {
    let domain = cli.domain.as_deref();
    for s in &cli.direct_input {
        let output = vachan.normalize_with_format(s, domain, cli.format.into())?;
        writeln!(writer, "{output}")?;
    }
    Ok(())
}

fn process_stream(vachan: &Vachan, cli: &Cli, writer: &mut dyn Write) -> Result<(), VachanError> {
    let reader = get_reader(&cli.input_filename)?;

    if cli.use_parallel {
        vachan.normalize_file_parallel(
            reader,
            writer,
            cli.domain.as_deref(),
            cli.format.into(),
            cli.max_lines,
            cli.silent,
        )?;
    } else {
        vachan.normalize_file(
            reader,
            writer,
            cli.domain.as_deref(),
            cli.format.into(),
            cli.max_lines,
            cli.silent,
        )?;
    }
    Ok(())
}

fn get_reader(path: &Option<PathBuf>) -> Result<Box<dyn BufRead>, VachanError> {
    match path {
        Some(p) => {
            let file = fs::File::open(p).map_err(|e| VachanError::InputFileOpen {
                path: p.clone(),
                source: e,
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn get_writer(path: &Option<PathBuf>) -> Result<Box<dyn Write>, VachanError> {
    match path {
        Some(p) => {
            let file = fs::File::create(p).map_err(|e| VachanError::OutputFileCreate {
                path: p.clone(),
                source: e,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

fn run_repl(vachan: &Vachan, cli: &Cli) -> Result<(), VachanError> {
    let mut rl = DefaultEditor::new()?;

    let history_path = || -> Option<std::path::PathBuf> {
        let mut path = dirs::cache_dir()?;
        path.push("vachan");
        std::fs::create_dir_all(&path).ok()?;
        path.push("history.txt");
        Some(path)
    };

    if let Some(path) = history_path()
        && rl.load_history(&path).is_err()
    {}

    let domain = cli.domain.as_deref();

    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                rl.add_history_entry(&line)?;

                if line.trim() == ":exit" || line.trim() == ":quit" {
                    break;
                }

                if line.trim().is_empty() {
                    continue;
                }

                match vachan.normalize_with_format(&line, domain, cli.format.into()) {
                    Ok(output) => println!("{output}"),
                    Err(e) => eprintln!("Error formatting output: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Interrupted. To exit, press Ctrl-D or type :exit.");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Exiting.");
                break;
            }
            Err(err) => {
                eprintln!("REPL Error: {err}");
                break;
            }
        }
    }

    if let Some(path) = history_path()
        && let Err(err) = rl.save_history(&path)
    {
        eprintln!("Warning: could not save history to {path:?}: {err}");
    }

    Ok(())
}

fn show_samples(vachan: &Vachan) -> Result<(), VachanError> {
    println!("Running sample conversions with vachan:");
    println!("---------------------------------------");

    let samples = [
        "Mr. Sharma paid Rs. 250000 for the flat",
        "Govt.of India approved the 7th plan",
        "Henry VIII ruled for 38 years",
        "The temperature fell to -3°C overnight",
        "Q3 revenue grew 12.5% in FY 2024-25",
        "She bought 3.5kg of rice & 2l of oil",
        "Pope Benedict XVI retired in 2013 AD",
        "Ch5 covers sections 10m² to 45m²",
        "₹99.99 per unit, terms apply",
        "The XIV summit opened on Jan. 26",
    ];

    let max_width = samples
        .iter()
        .map(|s| UnicodeWidthStr::width(*s))
        .max()
        .unwrap_or(0);
    let mut total_duration_ns: u128 = 0;

    for text in samples.iter() {
        let start = time::Instant::now();
        let normalized = vachan.normalize_string(text);
        let duration = start.elapsed();
        total_duration_ns += duration.as_nanos();

        let current_width = UnicodeWidthStr::width(*text);
        let padding = " ".repeat(max_width - current_width);
        println!("{text}{padding} -> {normalized}");
    }

    println!("---------------------------------------");

    let num_samples = samples.len() as u128;
    if num_samples > 0 {
        let avg_duration_ns = total_duration_ns / num_samples;
        let avg_duration_us = avg_duration_ns as f64 / 1_000.0;
        let avg_duration_ms = avg_duration_us / 1_000.0;

        println!(
            "Avg. processing time: {avg_duration_ms:.3} ms ({avg_duration_us:.1} μs) per sample"
        );
    }

    Ok(())
}
