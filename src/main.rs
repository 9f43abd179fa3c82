use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use std::process;

use parquet_inspect::config::Config;
use parquet_inspect::display::DisplayManager;
use parquet_inspect::logging;
use parquet_inspect::report::InspectionReport;
use parquet_inspect::DatasetInspector;

#[derive(Parser)]
#[command(name = "parquet-inspect")]
#[command(about = "Print row count, schema and first rows of a Parquet file")]
#[command(version)]
struct Cli {
    /// Parquet file to inspect
    path: PathBuf,

    /// Number of leading rows to show
    #[arg(short = 'n', long)]
    rows: Option<usize>,

    /// Rows decoded per chunk
    #[arg(long)]
    batch_size: Option<usize>,

    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(e) = run(cli) {
        handle_error(e, json);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(rows) = cli.rows {
        config.preview.rows = rows;
    }
    if let Some(batch_size) = cli.batch_size {
        config.preview.batch_size = batch_size;
    }
    config.validate()?;

    // Held until exit so buffered file logs are flushed.
    let _guard = logging::init_logging(&config.logging, &config.paths.log_directory)?;
    config.log_summary();

    let span = logging::run_span(&cli.path);
    let _enter = span.enter();

    let inspector = DatasetInspector::from_config(&config.preview);
    let report = InspectionReport::collect(&inspector, &cli.path, config.preview.rows)
        .with_context(|| format!("Failed to inspect {}", cli.path.display()))?;

    let display = DisplayManager::new();
    let rendered = display.render(&report, cli.json)?;

    let mut stdout = std::io::stdout().lock();
    if let Err(err) = stdout.write_all(rendered.as_bytes()).and_then(|()| stdout.flush()) {
        if err.kind() == std::io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err).context("Failed to write report");
    }

    Ok(())
}

fn handle_error(e: anyhow::Error, json: bool) -> ! {
    if json {
        println!("{}", DisplayManager::new().render_json_error(&e));
    }
    eprintln!("{} {:#}", "Error:".red().bold(), e);
    process::exit(1);
}
