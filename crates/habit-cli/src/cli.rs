//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Personal habit tracker.
///
/// Log timestamped entries against the habits you track and read back
/// counts, streaks, trends, and per-day charts.
#[derive(Debug, Parser)]
#[command(name = "habit", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in, creating the account on first use.
    Login {
        /// Email address, the unique account key.
        email: String,

        /// Display name for a newly created account.
        #[arg(long)]
        name: Option<String>,
    },

    /// Clear the current session.
    Logout,

    /// Manage tracked habits.
    Habit {
        #[command(subcommand)]
        action: HabitAction,
    },

    /// Log an entry against a habit.
    Log {
        /// The habit name.
        habit: String,

        /// Free-text note for this entry.
        #[arg(long)]
        note: Option<String>,

        /// Intensity on the 1-10 scale.
        #[arg(long)]
        intensity: Option<i64>,

        /// Entry timestamp as RFC 3339 (defaults to now).
        #[arg(long)]
        at: Option<String>,
    },

    /// Remove a habit's most recent entry.
    Unlog {
        /// The habit name.
        habit: String,
    },

    /// List a habit's entries, newest first.
    Entries {
        /// The habit name.
        habit: String,

        /// Maximum number of entries to show.
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Show statistics for one habit, or an overview of all habits.
    Stats {
        /// The habit name (omit for the all-habits overview).
        habit: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show a per-day entry chart for a habit.
    Chart {
        /// The habit name.
        habit: String,

        /// Trailing window length in days (defaults to the configured
        /// `chart_days`).
        #[arg(long)]
        days: Option<u32>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the signed-in user and last entry per habit.
    Status,
}

/// Habit management actions.
#[derive(Debug, Subcommand)]
pub enum HabitAction {
    /// Create a new habit.
    Add {
        /// The habit name, unique per user.
        name: String,

        /// Optional description.
        #[arg(long)]
        description: Option<String>,

        /// Display color as a hex token (e.g., #FF3B30).
        #[arg(long)]
        color: Option<String>,
    },

    /// List your habits.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Delete a habit and all its entries.
    Delete {
        /// The habit name.
        name: String,
    },
}
