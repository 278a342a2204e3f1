use eprints_xml::report::TracingReporter;
use eprints_xml::{cli, errors};
use errors::{AppError, AppResult};
use tracing_subscriber::EnvFilter;

fn main() -> AppResult<()> {
    let matches = cli::command().get_matches();
    let log_level = matches
        .get_one::<String>("log_level")
        .map(String::as_str)
        .unwrap_or("info");
    init_tracing(log_level)?;

    cli::run(&matches, &mut TracingReporter)
}

fn init_tracing(level: &str) -> AppResult<()> {
    let filter = EnvFilter::try_new(level)
        .map_err(|e| AppError::InvalidInput(format!("Invalid log level '{level}': {e}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::IoError(format!("Failed to initialize logging: {e}")))
}
