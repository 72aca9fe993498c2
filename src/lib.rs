// Core layer - shared types and configuration
pub mod core;

// Features layer - hydration tracking and reminders
pub mod features;

// Application layer
pub mod commands;

// Re-export core items
pub use crate::core::{Config, HydrationError};

// Re-export feature items
pub use features::{
    // Hydration
    hydration::{proportional_target_at, HydrationTracker, Outcome, Progress},
    // Reminders
    reminders::{
        CancelOutcome, Notifier, ReminderFirer, ReminderInterval, ReminderScheduler,
        ScheduleOutcome, TimerSubstrate, TokioTimer,
    },
};

// Re-export command items
pub use commands::{CommandContext, CommandRouter, DialogState, Reply};
