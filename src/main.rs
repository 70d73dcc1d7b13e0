use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use loglab::config_file::{validate_config, ConfigFile};
use loglab::{LogRecord, PiEstimator, RecordParser, ScanSummary};

mod cli;
mod platform;

use cli::{CheckConfigArgs, Cli, Command, OutputFormat, ParseArgs, PiArgs, ScanArgs};
use platform::ExitCode;

fn main() {
    let cli = process_args_with_config();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        ExitCode::InvalidUsage.exit();
    };

    if let Err(e) = run(command) {
        let code = ExitCode::for_error(&e);
        if code != ExitCode::SignalPipe {
            eprintln!("loglab: Error: {:#}", e);
        }
        code.exit();
    }
}

fn run(command: Command) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match command {
        Command::Parse(args) => run_parse(&args, &mut out)?,
        Command::Scan(args) => run_scan(&args, &mut out)?,
        Command::Pi(args) => run_pi(&args, &mut out)?,
        Command::CheckConfig(args) => run_check_config(&args, &mut out)?,
    }

    out.flush()?;
    Ok(())
}

fn run_parse<W: Write>(args: &ParseArgs, out: &mut W) -> Result<()> {
    let parser = args.parser.build();
    let mut totals = ScanSummary::default();

    if args.files.is_empty() {
        let records = parser
            .parse_lines(&mut io::stdin().lock())
            .context("Failed to read stdin")?;
        write_records(&records, args, out, &mut totals)?;
    } else {
        for path in &args.files {
            let records = parser.parse_file(path)?;
            write_records(&records, args, out, &mut totals)?;
        }
    }

    if args.stats {
        out.flush()?;
        eprintln!(
            "Lines processed: {} total, {} matched, {} unmatched",
            totals.lines,
            totals.matched,
            totals.unmatched()
        );
    }
    Ok(())
}

fn write_records<W: Write>(
    records: &[Option<LogRecord>],
    args: &ParseArgs,
    out: &mut W,
    totals: &mut ScanSummary,
) -> Result<()> {
    for record in records {
        totals.lines += 1;
        match record {
            Some(record) => {
                totals.matched += 1;
                match args.output_format {
                    OutputFormat::Default => writeln!(out, "{}", record)?,
                    OutputFormat::Jsonl => writeln!(out, "{}", serde_json::to_string(record)?)?,
                }
            }
            None if args.matched_only => {}
            None => match args.output_format {
                OutputFormat::Default => writeln!(out, "-")?,
                OutputFormat::Jsonl => writeln!(out, "null")?,
            },
        }
    }
    Ok(())
}

fn run_scan<W: Write>(args: &ScanArgs, out: &mut W) -> Result<()> {
    let parser = args.parser.build();
    let started = Instant::now();
    let summary = parser.scan_file(&args.file)?;

    tracing::info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "scan finished"
    );
    writeln!(
        out,
        "{} lines, {} matched, {} unmatched",
        summary.lines,
        summary.matched,
        summary.unmatched()
    )?;
    Ok(())
}

fn run_pi<W: Write>(args: &PiArgs, out: &mut W) -> Result<()> {
    let mut estimator = PiEstimator::new().with_workers(args.workers);
    if let Some(seed) = args.seed {
        estimator = estimator.with_seed(seed);
    }

    let started = Instant::now();
    let estimate = if args.serial {
        estimator.estimate(args.samples)
    } else {
        estimator.estimate_parallel(args.samples)
    }
    .context("pi estimation failed")?;

    tracing::info!(
        samples = args.samples,
        serial = args.serial,
        workers = estimator.config().effective_workers(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "pi estimate finished"
    );
    writeln!(out, "{}", estimate)?;
    Ok(())
}

fn run_check_config<W: Write>(args: &CheckConfigArgs, out: &mut W) -> Result<()> {
    let path: &Path = &args.file;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    validate_config(&content).with_context(|| format!("{} is not valid", path.display()))?;

    writeln!(out, "{}: OK", path.display())?;
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("loglab={}", level))),
        )
        .init();
}

/// Extract --config-file argument from raw args
fn extract_config_file_arg(args: &[String]) -> Option<PathBuf> {
    args.iter().enumerate().find_map(|(i, arg)| {
        if arg == "--config-file" {
            args.get(i + 1).map(PathBuf::from)
        } else {
            arg.strip_prefix("--config-file=").map(PathBuf::from)
        }
    })
}

fn exit_config_error(e: anyhow::Error) -> ! {
    eprintln!("loglab: Config file error: {:#}", e);
    ExitCode::GeneralError.exit();
}

/// Process command line arguments with config file support
fn process_args_with_config() -> Cli {
    let raw_args: Vec<String> = std::env::args().collect();
    let config_file_path = extract_config_file_arg(&raw_args);

    if raw_args.iter().any(|arg| arg == "--show-config") {
        let stdout = io::stdout();
        if let Err(e) = ConfigFile::show(config_file_path.as_deref(), &mut stdout.lock()) {
            exit_config_error(e);
        }
        ExitCode::Success.exit();
    }

    let processed_args = if raw_args.iter().any(|arg| arg == "--ignore-config") {
        raw_args
    } else {
        match ConfigFile::load(config_file_path.as_deref())
            .and_then(|config_file| config_file.process_args(raw_args))
        {
            Ok(processed) => processed,
            Err(e) => exit_config_error(e),
        }
    };

    Cli::parse_from(processed_args)
}
