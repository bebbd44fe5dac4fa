//! Core domain logic for the habit tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Entities: users, habits, and the entries logged against habits
//! - Statistics: counts, weekly averages, streaks, and trend direction
//! - Time series: dense per-day entry counts for charting
//!
//! Everything here is a pure computation over an in-memory snapshot. The
//! reference clock is always an explicit argument, never read globally, so
//! results are deterministic and testable.

pub mod model;
pub mod stats;
pub mod timeseries;
pub mod types;

pub use model::{Entry, Habit, User};
pub use stats::{HabitStats, compute_stats, count_since};
pub use timeseries::{DayCount, bin_by_day};
pub use types::{EntryId, HabitId, Intensity, TrendDirection, UserId, ValidationError};
