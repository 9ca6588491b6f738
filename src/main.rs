// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod encoding;
mod errors;
mod language_utils;
mod providers;
mod rewriter;
mod scanner;
mod translation_service;

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

fn level_filter_for(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate Cyrillic content in the tree (default command)
    #[command(alias = "translate")]
    Run(RunArgs),

    /// Generate shell completions for ruslate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Root directory to scan (defaults to the current directory)
    #[arg(value_name = "ROOT_PATH")]
    root_path: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// ruslate - translate embedded Russian text in shell scripts and READMEs
///
/// Walks a directory tree, finds shell-like scripts and README files, and
/// rewrites Cyrillic comments, echoed strings and prose lines with
/// machine-translated English, in place.
#[derive(Parser, Debug)]
#[command(name = "ruslate")]
#[command(version = "0.3.0")]
#[command(about = "In-place translation of Cyrillic text in shell scripts and READMEs")]
#[command(long_about = "ruslate walks a directory tree, finds shell-like scripts (.sh, .cfg, .conf)
and README files, and rewrites embedded Cyrillic text with machine-translated
English while preserving quoting, comment markers, markdown structure,
shebangs and code fences.

EXAMPLES:
    ruslate                                 # Translate the current directory
    ruslate /opt/router-scripts             # Translate a specific tree
    ruslate -c mytool.json                  # Use a different config file
    ruslate --log-level debug               # Show per-span decisions
    ruslate completions bash > ruslate.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Root directory to scan (defaults to the current directory)
    #[arg(value_name = "ROOT_PATH")]
    root_path: Option<PathBuf>,

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

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "ruslate", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Run(args)) => run_translate(args).await,
        None => {
            // Default behavior - use top-level args; a bare invocation scans
            // the current directory
            let run_args = RunArgs {
                root_path: cli.root_path,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_translate(run_args).await
        }
    }
}

async fn run_translate(options: RunArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter_for(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Update log level in config if specified via command line
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter_for(&config.log_level));
    }

    let root = options
        .root_path
        .unwrap_or_else(|| PathBuf::from("."));
    if !root.exists() {
        return Err(anyhow!("Input path does not exist: {:?}", root));
    }

    // Create controller and run the pass
    let controller = Controller::with_config(config)?;
    controller.run(&root).await?;

    Ok(())
}
