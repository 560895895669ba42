//! CLI argument parsing and command dispatch

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{Level, LevelFilter};

use gilt::defaults::DEFAULT_MANIFEST;
use gilt::output::OutputConfig;

use crate::commands;

/// Environment variable that overrides the log filter.
const LOG_ENV: &str = "GILT_LOG";

/// gilt - A Git layering command line tool
#[derive(Parser, Debug)]
#[command(name = "gilt")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Path to the manifest file
    #[arg(
        short,
        long,
        global = true,
        value_name = "PATH",
        env = "GILT_FILENAME",
        default_value = DEFAULT_MANIFEST
    )]
    filename: PathBuf,

    /// Path to gilt's clone directory [default: ~/.gilt/clone]
    #[arg(
        short = 'c',
        long,
        global = true,
        value_name = "DIR",
        env = "GILT_CACHE_DIRECTORY"
    )]
    giltdir: Option<PathBuf>,

    /// Stream git output and echo each git command
    #[arg(long, global = true)]
    debug: bool,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Install gilt dependencies into the project tree
    Overlay,

    /// Validate the manifest without cloning or copying anything
    Validate,

    /// Display the version of gilt
    Version,
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub filename: PathBuf,
    pub giltdir: Option<PathBuf>,
    pub debug: bool,
    pub output: OutputConfig,
}

impl Cli {
    /// The output configuration selected by `--color`.
    pub fn output(&self) -> OutputConfig {
        OutputConfig::from_env_and_flag(&self.color)
    }

    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let output = self.output();
        init_logging(&self.log_level, self.debug, output);

        let globals = GlobalArgs {
            filename: self.filename,
            giltdir: self.giltdir,
            debug: self.debug,
            output,
        };

        match self.command {
            Commands::Overlay => commands::overlay::execute(&globals),
            Commands::Validate => commands::validate::execute(&globals),
            Commands::Version => commands::version::execute(),
        }
    }
}

/// Parse a `--log-level` value, defaulting to `info` for unknown input.
fn parse_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::Info)
}

/// Install the global logger.
///
/// `--debug` raises the level to at least `debug`; `GILT_LOG` overrides both.
/// Progress lines at `info` are printed bare; other levels get a prefix.
fn init_logging(log_level: &str, debug: bool, output: OutputConfig) {
    let mut level = parse_level(log_level);
    if debug && level < LevelFilter::Debug {
        level = LevelFilter::Debug;
    }

    let write_style = if output.use_color {
        env_logger::WriteStyle::Always
    } else {
        env_logger::WriteStyle::Never
    };

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_env(env_logger::Env::new().filter(LOG_ENV))
        .write_style(write_style)
        .format(|buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            level => {
                let style = buf.default_level_style(level);
                writeln!(buf, "{style}{level}{style:#}: {}", record.args())
            }
        })
        .try_init();
}
