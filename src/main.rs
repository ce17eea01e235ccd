//! Lingle - CLI
//!
//! Daily word puzzle with TUI and line-based modes.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lingle::{
    commands::{GameChoice, run_simple, score_guess, today_report},
    config::{Settings, default_data_dir, load_settings, save_settings, settings_path},
    game::{DateKey, Engine},
    interactive::{App, run_tui},
    logging::{LogConfig, LogFormat, init_logging},
    output::{print_guess_result, print_stats, print_today},
    storage::JsonStore,
};
use std::path::{Path, PathBuf};

const LOG_FILE: &str = "lingle.log";

#[derive(Parser)]
#[command(
    name = "lingle",
    about = "Guess the daily five-letter word in six tries",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Where settings, stats and saved games live
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Number of guesses allowed (overrides settings.json)
    #[arg(long, global = true, value_name = "N")]
    max_guesses: Option<usize>,

    /// Hard mode: revealed hints must be used in later guesses
    #[arg(long, global = true)]
    hard: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

#[derive(Args, Clone, Copy)]
struct GameArgs {
    /// Play a random practice word instead of the daily puzzle
    #[arg(short, long)]
    practice: bool,

    /// Play the daily puzzle of another day (YYYY-MM-DD)
    #[arg(short, long, conflicts_with = "practice")]
    date: Option<DateKey>,
}

impl GameArgs {
    fn choice(self) -> GameChoice {
        GameChoice::from_flags(self.practice, self.date)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play(GameArgs),

    /// Simple line-based mode (no TUI)
    Simple(GameArgs),

    /// Show your statistics
    Stats,

    /// Show the puzzle number and your progress for a day
    Today {
        /// Day to show (YYYY-MM-DD), today if omitted
        #[arg(short, long)]
        date: Option<DateKey>,
    },

    /// Score a guess against any secret word
    Score {
        /// The secret word
        secret: String,

        /// The guess to score
        guess: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play(GameArgs {
        practice: false,
        date: None,
    }));

    // The TUI owns the terminal, so its logs go to a file
    let log_file = matches!(command, Commands::Play(_)).then(|| data_dir.join(LOG_FILE));
    let log_config = LogConfig::from_verbosity(cli.verbose)
        .with_format(cli.log_format)
        .with_log_file(log_file);
    init_logging(&log_config).context("failed to open the log file")?;

    let settings = settings_with_overrides(&data_dir, cli.max_guesses, cli.hard)?;

    match command {
        Commands::Play(args) => run_play_command(&data_dir, &settings, args),
        Commands::Simple(args) => run_simple_command(&data_dir, &settings, args),
        Commands::Stats => run_stats_command(&data_dir, &settings),
        Commands::Today { date } => run_today_command(&data_dir, &settings, date),
        Commands::Score { secret, guess } => run_score_command(&secret, &guess),
    }
}

/// Settings from the data directory, with command-line overrides applied
fn settings_with_overrides(
    data_dir: &Path,
    max_guesses: Option<usize>,
    hard: bool,
) -> Result<Settings> {
    let mut settings = load_settings(data_dir);
    if let Some(max_guesses) = max_guesses {
        settings.max_guesses = max_guesses;
    }
    settings.hard_mode |= hard;
    settings.validate()?;
    Ok(settings)
}

fn open_engine(data_dir: &Path, settings: &Settings) -> Result<Engine<JsonStore>> {
    // First run: leave an editable settings file behind
    if !settings_path(data_dir).exists()
        && let Err(e) = save_settings(data_dir, &Settings::default())
    {
        tracing::warn!("Could not write default settings: {e}");
    }

    Engine::open(JsonStore::new(data_dir), settings)
        .with_context(|| format!("failed to load game data from {}", data_dir.display()))
}

fn run_play_command(data_dir: &Path, settings: &Settings, args: GameArgs) -> Result<()> {
    let engine = open_engine(data_dir, settings)?;
    let app = App::new(engine, args.choice())?;
    run_tui(app)
}

fn run_simple_command(data_dir: &Path, settings: &Settings, args: GameArgs) -> Result<()> {
    let mut engine = open_engine(data_dir, settings)?;
    run_simple(&mut engine, args.choice())
}

fn run_stats_command(data_dir: &Path, settings: &Settings) -> Result<()> {
    let mut engine = open_engine(data_dir, settings)?;
    for error in engine.drain_storage_errors() {
        eprintln!("warning: {}", error.user_message());
    }
    print_stats(engine.stats(), settings.max_guesses);
    Ok(())
}

fn run_today_command(data_dir: &Path, settings: &Settings, date: Option<DateKey>) -> Result<()> {
    let engine = open_engine(data_dir, settings)?;
    let report = today_report(&engine, date.unwrap_or_else(DateKey::today))?;
    print_today(&report);
    Ok(())
}

fn run_score_command(secret: &str, guess: &str) -> Result<()> {
    let result = score_guess(secret, guess)?;
    print_guess_result(&result);
    Ok(())
}
