//! Error taxonomy for the hydration and reminder core
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial taxonomy (invalid amount, invalid interval, delivery failure)

use thiserror::Error;

/// Recoverable failures produced by the tracker and the reminder scheduler.
///
/// None of these are fatal. Input errors are answered by re-prompting the same
/// dialog step; delivery failures are logged and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HydrationError {
    /// Intake text did not parse as a non-negative whole number of milliliters
    #[error("invalid water amount: {0:?}")]
    InvalidAmount(String),

    /// Reminder text had no leading count or no minute/hour unit
    #[error("invalid reminder interval: {0:?}")]
    InvalidInterval(String),

    /// The notifier could not deliver a fired reminder
    #[error("failed to deliver reminder to {user_id}: {reason}")]
    DeliveryFailure { user_id: String, reason: String },
}
