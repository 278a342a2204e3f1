use crate::config::{ResolvedConfig, ResolvedConfigFile};
use crate::constants::{
    DEFAULT_BASE_FILE_NAME, DEFAULT_CHUNK_SIZE, DEFAULT_OUTPUT_DIR, DEFAULT_STRIP_INPUT,
    DEFAULT_STRIP_OUTPUT,
};
use crate::errors::{AppError, AppResult};
use crate::filter::filter_tags;
use crate::mapper::transform;
use crate::records::load_records;
use crate::report::Reporter;
use crate::utils::format_duration;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Builds the command-line definition.
///
/// Three subcommands are available:
/// - `transform`: convert a JSON records file into chunked EPrints XML files
/// - `toml`: the same conversion, parameters read from a TOML file
/// - `strip`: remove every record field not named on the command line
///
/// The global `--log-level` option is read by the binary before dispatching.
pub fn command() -> Command<'static> {
    Command::new("eprints-xml")
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .arg(
            Arg::new("log_level")
                .long("log-level")
                .help("Log level filter (error, warn, info, debug, trace)")
                .global(true)
                .default_value("info")
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("transform")
                .about("Convert JSON records into EPrints XML files")
                .after_help("Writes <output-dir>/<base-name><n>.xml for n = 1, 2, ...\nExample:\n  eprints-xml transform -i export.json -o out -b edoc-data- -c 500")
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .help("JSON file with the records (array or one object per line)")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("output_dir")
                        .short('o')
                        .long("output-dir")
                        .help("Directory receiving the XML files")
                        .default_value(DEFAULT_OUTPUT_DIR)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("base_file_name")
                        .short('b')
                        .long("base-name")
                        .help("Output file name prefix, followed by the chunk index")
                        .default_value(DEFAULT_BASE_FILE_NAME)
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("chunk_size")
                        .short('c')
                        .long("chunk-size")
                        .help("Maximum number of records per output file")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("toml")
                .about("Run a transform using a TOML configuration file")
                .arg(
                    Arg::new("config")
                        .help("Path to the TOML config file")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("strip")
                .about("Remove all fields not given as argument from an XML data file")
                .arg(
                    Arg::new("tags")
                        .help("EPrints elements to keep")
                        .required(true)
                        .multiple_values(true)
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("input")
                        .short('f')
                        .long("input")
                        .help("The XML file which should be cleaned")
                        .default_value(DEFAULT_STRIP_INPUT)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("output")
                        .short('d')
                        .long("output")
                        .help("The file the result should be stored in")
                        .default_value(DEFAULT_STRIP_OUTPUT)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
}

/// Executes the subcommand selected in `matches`, sending progress to `reporter`.
///
/// Prints the help text when no subcommand was given.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, a record holds an
/// unsupported value shape, or an output file cannot be written.
pub fn run(matches: &ArgMatches, reporter: &mut dyn Reporter) -> AppResult<()> {
    match matches.subcommand() {
        Some(("transform", sub)) => {
            let input = sub
                .get_one::<PathBuf>("input")
                .expect("input is required");
            let resolved = ResolvedConfig {
                output_dir: sub
                    .get_one::<PathBuf>("output_dir")
                    .expect("output_dir has default_value")
                    .clone(),
                base_file_name: sub
                    .get_one::<String>("base_file_name")
                    .expect("base_file_name has default_value")
                    .clone(),
                chunk_size: sub
                    .get_one::<usize>("chunk_size")
                    .copied()
                    .unwrap_or(DEFAULT_CHUNK_SIZE),
            };
            run_transform(input, &resolved, reporter)?;
        }
        Some(("toml", sub)) => {
            let config_path = sub
                .get_one::<PathBuf>("config")
                .expect("config is required");
            let file_config = ResolvedConfigFile::from_toml_file(config_path)?;
            run_transform(&file_config.input, &file_config.resolved, reporter)?;
        }
        Some(("strip", sub)) => {
            let kept: BTreeSet<String> = sub
                .get_many::<String>("tags")
                .map(|tags| tags.cloned().collect())
                .unwrap_or_default();
            let input = sub
                .get_one::<PathBuf>("input")
                .expect("input has default_value");
            let output = sub
                .get_one::<PathBuf>("output")
                .expect("output has default_value");

            let removed = filter_tags(&kept, input, output)?;
            reporter.tags_stripped(&kept, &removed, output);
        }
        _ => {
            command()
                .print_help()
                .map_err(|e| AppError::IoError(format!("Failed to print help: {e}")))?;
        }
    }

    Ok(())
}

fn run_transform(
    input: &Path,
    resolved: &ResolvedConfig,
    reporter: &mut dyn Reporter,
) -> AppResult<()> {
    let start = Instant::now();
    let records = load_records(input)?;
    info!(
        input = %input.display(),
        records = records.len(),
        chunk_size = resolved.chunk_size,
        "Starting transformation"
    );

    let paths = transform(
        &resolved.output_dir,
        &resolved.base_file_name,
        &records,
        Some(resolved.chunk_size),
        reporter,
    )?;

    info!(
        files = paths.len(),
        elapsed = %format_duration(start.elapsed()),
        "All operations completed successfully"
    );
    Ok(())
}
