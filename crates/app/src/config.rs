use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use practice_core::model::PracticeCategory;

pub const DEFAULT_DB_URL: &str = "sqlite://practice.sqlite3";

#[derive(Debug, Parser)]
#[command(name = "practice", version, about = "Track daily language practice")]
pub struct Cli {
    /// SQLite URL or file path for the progress store
    #[arg(long = "db", env = "PRACTICE_DB_URL", default_value = DEFAULT_DB_URL, global = true)]
    pub db: String,

    /// Log filter directive, e.g. `info` or `services=debug`
    #[arg(long = "log", env = "PRACTICE_LOG", default_value = "info", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show today's rings, streak and the weekly chart
    Status,
    /// Start a practice session, replacing any active one
    Start { category: PracticeCategory },
    /// Record an answer in the active session
    Answer { answer: Answer },
    /// End the active session and credit it to today
    End {
        /// Final accuracy in percent; defaults to the session's own score
        #[arg(long)]
        score: Option<u32>,
    },
    /// Drop the active session without credit
    Abandon,
    /// Set the daily goal in minutes
    Goal { minutes: u32 },
    /// Show the seven-day history
    Week,
    /// Record today in the weekly history and push it to the sync target
    Sync,
    /// Replace the stored progress with a demo streak
    Seed {
        /// Streak length, ending yesterday
        #[arg(long, default_value_t = 5)]
        days: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Answer {
    Correct,
    Wrong,
}

impl Answer {
    #[must_use]
    pub fn is_correct(self) -> bool {
        self == Self::Correct
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_url: String,
    pub log_filter: String,
}

impl AppConfig {
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            db_url: normalize_sqlite_url(&cli.db),
            log_filter: cli.log.clone(),
        }
    }
}

/// Turn a bare path or relative `sqlite:` URL into an absolute `sqlite://` URL.
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" {
        return trimmed.to_string();
    }

    let path_str = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Create the database file and its parent directories if missing.
///
/// # Errors
///
/// Returns an error if the URL has no path or the file cannot be created.
pub fn prepare_sqlite_file(db_url: &str) -> anyhow::Result<()> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow::anyhow!("invalid --db value: {db_url}"))?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        anyhow::bail!("invalid --db value: {db_url}");
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}
