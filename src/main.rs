// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::app_controller::{Controller, Direction};

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod srt_processor;
mod text_processor;
mod timecode;

/// CLI Wrapper for Direction to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliDirection {
    /// SRT in, annotated text out
    SrtToText,
    /// Annotated text in, SRT out
    TextToSrt,
}

impl From<CliDirection> for Direction {
    fn from(cli_direction: CliDirection) -> Self {
        match cli_direction {
            CliDirection::SrtToText => Direction::SrtToText,
            CliDirection::TextToSrt => Direction::TextToSrt,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert between SRT and annotated text (default command)
    Convert(ConvertArgs),

    /// Generate shell completions for srtext
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Conversion direction (inferred from the input extension when omitted)
    #[arg(short, long, value_enum)]
    direction: Option<CliDirection>,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Start time for synthesized timecodes (HH:MM:SS,mmm)
    #[arg(long)]
    start_time: Option<String>,

    /// Duration in milliseconds per entry for synthesized timecodes
    #[arg(long)]
    duration_ms: Option<u64>,

    /// Do not synthesize timecodes for entries lacking them
    #[arg(long)]
    no_timecode_synthesis: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// srtext - SRT / annotated text interconversion
///
/// Converts SubRip subtitle files into a human-readable labeled text form
/// and back, synthesizing plausible timecodes when the text carries none.
#[derive(Parser, Debug)]
#[command(name = "srtext")]
#[command(version = "1.0.0")]
#[command(about = "SRT / annotated text conversion tool")]
#[command(long_about = "srtext converts SubRip subtitle files into an annotated, labeled text
form and converts such text (with English or Chinese labels) back into
valid SRT, filling in missing timecodes with a fixed-duration timeline.

EXAMPLES:
    srtext movie.srt                        # SRT to annotated text
    srtext transcript.txt                   # Annotated text to SRT
    srtext -f movie.srt                     # Force overwrite existing output
    srtext --duration-ms 2000 notes.txt     # 2s per entry when synthesizing
    srtext /subtitles/                      # Convert a whole directory
    srtext completions bash > srtext.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Conversion direction (inferred from the input extension when omitted)
    #[arg(short, long, value_enum)]
    direction: Option<CliDirection>,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Start time for synthesized timecodes (HH:MM:SS,mmm)
    #[arg(long)]
    start_time: Option<String>,

    /// Duration in milliseconds per entry for synthesized timecodes
    #[arg(long)]
    duration_ms: Option<u64>,

    /// Do not synthesize timecodes for entries lacking them
    #[arg(long)]
    no_timecode_synthesis: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "srtext", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Convert(args)) => run_convert(args),
        None => {
            // Default behavior - use top-level args
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let convert_args = ConvertArgs {
                input_path,
                force_overwrite: cli.force_overwrite,
                direction: cli.direction,
                output_dir: cli.output_dir,
                start_time: cli.start_time,
                duration_ms: cli.duration_ms,
                no_timecode_synthesis: cli.no_timecode_synthesis,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_convert(convert_args)
        }
    }
}

fn run_convert(options: ConvertArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)
            .context(format!("Failed to load config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        config
            .save_to_file(config_path)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    // Override config with CLI options if provided
    if let Some(start_time) = &options.start_time {
        config.start_time = start_time.clone();
    }
    if let Some(duration_ms) = options.duration_ms {
        config.duration_per_entry_ms = duration_ms;
    }
    if options.no_timecode_synthesis {
        config.synthesize_timecodes = false;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    // Create controller
    let controller = Controller::with_config(config)?;

    let direction = options.direction.map(Direction::from);

    if options.input_path.is_file() {
        // Process a single file
        controller.run(
            &options.input_path,
            options.output_dir.as_deref(),
            direction,
            options.force_overwrite,
        )?;
    } else if options.input_path.is_dir() {
        // Process a directory
        controller.run_folder(&options.input_path, options.force_overwrite)?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}
