//! Configuration for the habit CLI.
//!
//! Settings come from four layers, later ones winning: built-in defaults,
//! `config.toml` in the platform config directory, an explicit `--config`
//! file, and `HABIT_`-prefixed environment variables (so
//! `HABIT_DATABASE_PATH=/tmp/x.db habit status` works without a file).

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Chart window used when `habit chart` is run without `--days`.
const DEFAULT_CHART_DAYS: u32 = 30;

/// Resolved application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Default trailing window for `habit chart`, in days.
    pub chart_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: data_dir().join("habit.db"),
            chart_days: DEFAULT_CHART_DAYS,
        }
    }
}

impl Config {
    /// Loads configuration, optionally merging an explicit `--config` file
    /// on top of the default one.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(default_file) = default_config_file() {
            figment = figment.merge(Toml::file(default_file));
        }
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed("HABIT_")).extract()
    }
}

/// Where `config.toml` lives when `--config` is not given.
fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("habit").join("config.toml"))
}

/// Per-app data directory, for the database.
///
/// Falls back to the working directory when the platform reports no data
/// dir, so the tool still runs in stripped-down environments.
pub fn data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from("."), |dir| dir.join("habit"))
}

/// Per-app state directory, for the session file.
pub fn state_dir() -> Option<PathBuf> {
    dirs::state_dir().map(|dir| dir.join("habit"))
}
