//! Habit tracker CLI library.
//!
//! This crate provides the CLI interface for the habit tracker.

mod cli;
pub mod commands;
mod config;
pub mod session;

pub use cli::{Cli, Commands, HabitAction};
pub use config::Config;
