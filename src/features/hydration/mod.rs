//! # Feature: Hydration Tracking
//!
//! Running daily intake totals per user, goal detection, and the
//! time-proportional target used by reminders.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Calendar-day rollover
//! - 1.0.0: Initial release

pub mod target;
pub mod tracker;

pub use target::proportional_target_at;
pub use tracker::{
    encouragement_for, HydrationTracker, Outcome, Progress, UserHydrationState,
    ENCOURAGING_MESSAGES,
};
