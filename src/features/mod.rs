//! # Features
//!
//! - **hydration**: running daily totals and the proportional target
//! - **reminders**: recurring per-user reminders

pub mod hydration;
pub mod reminders;

pub use hydration::HydrationTracker;
pub use reminders::ReminderScheduler;
