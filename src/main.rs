//! LazyCount - counting lessons in the terminal
//!
//! Without a subcommand this starts the interactive lesson player. The
//! subcommands give headless access to the layout and counting engine.

use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lazycount::cli::{CliResult, ConfigArgs, LayoutArgs, LessonsArgs, PlayArgs};
use lazycount::config::Config;
use lazycount::constants::{DEFAULT_LOG_FILTER, VERBOSE_LOG_FILTER};

/// LazyCount - counting lessons in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Lesson to open directly in the lesson player
    #[arg(short, long, value_name = "SLUG")]
    lesson: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print item positions for an arrangement
    Layout(LayoutArgs),
    /// List the built-in lessons
    Lessons(LessonsArgs),
    /// Replay taps against a lesson card
    Play(PlayArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

impl Commands {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Layout(args) => args.execute(),
            Self::Lessons(args) => args.execute(),
            Self::Play(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn log_filter(verbose: bool) -> tracing_subscriber::EnvFilter {
    let filter = if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into())
}

/// Logs to stderr; stdout stays clean for `--json` output.
fn init_stderr_tracing(verbose: bool) {
    tracing_subscriber::registry()
        .with(log_filter(verbose))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Logs to `lazycount.log` in the config directory while the terminal is in raw mode.
fn init_file_tracing(verbose: bool) -> Result<()> {
    let config_dir = Config::config_dir()?;
    std::fs::create_dir_all(&config_dir).context(format!(
        "Failed to create config directory: {}",
        config_dir.display()
    ))?;

    let log_path = Config::log_file_path()?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context(format!("Failed to open log file: {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(log_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

#[cfg(feature = "ratatui")]
fn run_player(lesson: Option<&str>, verbose: bool) -> Result<()> {
    use lazycount::lessons::LessonCatalog;
    use lazycount::tui;

    init_file_tracing(verbose)?;

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {e:#}");
        Config::default()
    });
    let catalog = LessonCatalog::load()?;
    let mut state = tui::AppState::new(config, catalog, lesson)?;

    let mut terminal = tui::setup_terminal()?;
    let result = tui::run_tui(&mut state, &mut terminal);
    tui::restore_terminal(terminal)?;

    result
}

#[cfg(not(feature = "ratatui"))]
fn run_player(_lesson: Option<&str>, verbose: bool) -> Result<()> {
    use lazycount::constants::APP_BINARY_NAME;

    init_file_tracing(verbose)?;
    anyhow::bail!(
        "This build has no lesson player. Try `{APP_BINARY_NAME} lessons` or `{APP_BINARY_NAME} --help`."
    )
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(command) = &cli.command {
        init_stderr_tracing(cli.verbose);
        if let Err(err) = command.execute() {
            eprintln!("Error: {err}");
            std::process::exit(err.exit_code.code());
        }
        return Ok(());
    }

    run_player(cli.lesson.as_deref(), cli.verbose)
}
