use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use habit_cli::commands::{self, chart, entries, habit, log, login, stats, status, unlog};
use habit_cli::{Cli, Commands, Config, HabitAction, session};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(habit_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = habit_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

fn session_path() -> Result<PathBuf> {
    let Some(path) = session::session_file() else {
        bail!("no state directory available for the session file");
    };
    Ok(path)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut stdout = std::io::stdout();
    let now = Utc::now();

    match &cli.command {
        Some(Commands::Login { email, name }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            login::run(
                &mut stdout,
                &db,
                &session_path()?,
                email,
                name.as_deref(),
                now,
            )?;
        }
        Some(Commands::Logout) => {
            login::logout(&mut stdout, &session_path()?)?;
        }
        Some(Commands::Habit { action }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            let user = commands::current_user(&db, session::load()?.as_deref())?;
            match action {
                HabitAction::Add {
                    name,
                    description,
                    color,
                } => habit::add(
                    &mut stdout,
                    &db,
                    &user,
                    name,
                    description.clone(),
                    color.clone(),
                    now,
                )?,
                HabitAction::List { json } => habit::list(&mut stdout, &db, &user, *json)?,
                HabitAction::Delete { name } => habit::delete(&mut stdout, &mut db, &user, name)?,
            }
        }
        Some(Commands::Log {
            habit,
            note,
            intensity,
            at,
        }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            let user = commands::current_user(&db, session::load()?.as_deref())?;
            log::run(
                &mut stdout,
                &db,
                &user,
                habit,
                note.clone(),
                *intensity,
                at.as_deref(),
                now,
            )?;
        }
        Some(Commands::Unlog { habit }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            let user = commands::current_user(&db, session::load()?.as_deref())?;
            unlog::run(&mut stdout, &db, &user, habit)?;
        }
        Some(Commands::Entries { habit, limit }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            let user = commands::current_user(&db, session::load()?.as_deref())?;
            entries::run(&mut stdout, &db, &user, habit, *limit)?;
        }
        Some(Commands::Stats { habit, json }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            let user = commands::current_user(&db, session::load()?.as_deref())?;
            stats::run(&mut stdout, &db, &user, habit.as_deref(), *json, now)?;
        }
        Some(Commands::Chart { habit, days, json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let user = commands::current_user(&db, session::load()?.as_deref())?;
            let days = days.unwrap_or(config.chart_days);
            chart::run(&mut stdout, &db, &user, habit, days, *json, now)?;
        }
        Some(Commands::Status) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            status::run(
                &mut stdout,
                &db,
                &config.database_path,
                session::load()?.as_deref(),
                now,
            )?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
