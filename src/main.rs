//! CLI entry point for the bikeshare statistics explorer.
//!
//! Runs an interactive session on stdin/stdout. All flags are optional and
//! can also be set through the environment or a `.env` file.

use std::ffi::OsStr;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::Result;
use bikeshare_stats::config::{BadRowPolicy, CityTable, Config, DEFAULT_BATCH_SIZE};
use bikeshare_stats::session::Session;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore US bikeshare trip data interactively", long_about = None)]
struct Cli {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// What to do with rows whose start time or duration cannot be parsed
    #[arg(long, env = "BIKESHARE_BAD_ROWS", value_enum, default_value_t = BadRowPolicy::Abort)]
    bad_rows: BadRowPolicy,

    /// Number of raw rows shown per page
    #[arg(long, env = "BIKESHARE_BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: NonZeroUsize,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: quiet stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    // stderr shares the terminal with the prompts, keep it to warnings
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let config = Config::new(CityTable::new(&cli.data_dir))
        .with_bad_rows(cli.bad_rows)
        .with_batch_size(cli.batch_size);
    for (city, path) in config.cities.iter() {
        debug!(city = %city, path = %path.display(), "City data file");
    }
    info!(
        data_dir = %cli.data_dir.display(),
        bad_rows = ?cli.bad_rows,
        batch_size = cli.batch_size.get(),
        "Starting session"
    );

    let stdin = io::stdin();
    let mut session = Session::new(config, stdin.lock(), io::stdout().lock());
    session.run()?;

    info!("Session finished");
    Ok(())
}
