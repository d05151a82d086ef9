// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use log::{error, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use submerger::app_config::{self, Config, Customization, MergeMode};
use submerger::app_controller::Controller;
use submerger::prompt::TerminalPrompter;

/// CLI Wrapper for MergeMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliMergeMode {
    /// First track bottom-left, second bottom-right
    Side,
    /// Both tracks bottom-center
    Consecutive,
}

impl From<CliMergeMode> for MergeMode {
    fn from(cli_mode: CliMergeMode) -> Self {
        match cli_mode {
            CliMergeMode::Side => MergeMode::SideBySide,
            CliMergeMode::Consecutive => MergeMode::Consecutive,
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
    /// Generate shell completions for submerger
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// submerger - merge two subtitle tracks for language learning
#[derive(Parser, Debug)]
#[command(name = "submerger")]
#[command(version)]
#[command(about = "Merge two subtitle files for language learning")]
#[command(long_about = "submerger combines two subtitle tracks (.srt or .ass) into one styled .ass file.

EXAMPLES:
    submerger en.srt ja.srt -o merged.ass                 # Side-by-side merge
    submerger en.srt ja.ass -m consecutive -o out.ass     # Stack both tracks at the bottom
    submerger --lang1 English --lang2 French a.srt b.srt  # Custom language labels
    submerger english/ japanese/ -o merged/               # Batch mode over two folders
    submerger completions bash > submerger.bash           # Generate bash completions

CUSTOMIZATION:
    default_style.txt and script_info.txt in the current directory override the
    built-in style and script info (key=value lines, # for comments). Batch mode
    asks whether to use them; --customize uses them without asking.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// First subtitle file or folder (.srt or .ass)
    #[arg(value_name = "SUB1")]
    sub1: Option<PathBuf>,

    /// Second subtitle file or folder (.srt or .ass)
    #[arg(value_name = "SUB2")]
    sub2: Option<PathBuf>,

    /// Output file or folder path
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Merge mode
    #[arg(short, long, value_enum, default_value = "side")]
    mode: CliMergeMode,

    /// Language label for the first subtitle
    #[arg(long, default_value = "English")]
    lang1: String,

    /// Language label for the second subtitle
    #[arg(long, default_value = "Japanese")]
    lang2: String,

    /// Default font size for subtitles
    #[arg(long, default_value_t = 24)]
    fontsize: u32,

    /// Use default_style.txt and script_info.txt without asking
    #[arg(short, long)]
    customize: bool,

    /// Keep going when a pair fails in batch mode
    #[arg(long)]
    continue_on_error: bool,

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
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
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

fn main() {
    // Initialize the logger once with info level by default
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "submerger", &mut std::io::stdout());
        return;
    }

    if let Err(e) = run_merge(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run_merge(options: CommandLineOptions) -> Result<()> {
    let log_level: app_config::LogLevel = options.log_level.map(Into::into).unwrap_or_default();
    log::set_max_level(log_level.to_level_filter());

    let config = Config {
        mode: options.mode.into(),
        lang1: options.lang1,
        lang2: options.lang2,
        font_size: options.fontsize,
        customization: if options.customize { Customization::all() } else { Customization::none() },
        continue_on_error: options.continue_on_error,
        log_level,
        ..Config::default()
    };

    let controller = Controller::with_config(config)?;
    controller.announce_override_files();

    let (Some(sub1), Some(sub2)) = (options.sub1, options.sub2) else {
        return Err(submerger::AppError::Argument(
            "Please provide two subtitle files or folders to merge".to_string(),
        ).into());
    };

    let summary = controller.run(&sub1, &sub2, &options.output, &mut TerminalPrompter)?;

    if !summary.failed.is_empty() {
        for (pair, reason) in &summary.failed {
            error!("Skipped {} + {}: {}", pair.first.display(), pair.second.display(), reason);
        }
        std::process::exit(2);
    }

    Ok(())
}
