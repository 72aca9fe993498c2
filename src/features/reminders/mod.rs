//! # Reminders Feature
//!
//! Recurring per-user hydration reminders with progress-aware delivery.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: true
//!
//! ## Changelog
//! - 1.1.0: Proportional target in reminder text, legacy hours grammar
//! - 1.0.0: Initial release

pub mod interval;
pub mod notifier;
pub mod scheduler;
pub mod timer;

pub use interval::ReminderInterval;
pub use notifier::Notifier;
pub use scheduler::{
    CancelOutcome, ReminderFirer, ReminderRegistration, ReminderScheduler, ScheduleOutcome,
};
pub use timer::{ReminderCallback, TimerSubstrate, TokioTimer};
