//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Tracker and reminder scheduler handles

use std::sync::Arc;

use crate::features::hydration::HydrationTracker;
use crate::features::reminders::ReminderScheduler;

/// Shared context for all command handlers
///
/// Contains the services command handlers act on:
/// - HydrationTracker for intake totals
/// - ReminderScheduler for recurring reminders
#[derive(Clone)]
pub struct CommandContext {
    pub tracker: HydrationTracker,
    pub scheduler: Arc<ReminderScheduler>,
}

impl CommandContext {
    pub fn new(tracker: HydrationTracker, scheduler: Arc<ReminderScheduler>) -> Self {
        Self { tracker, scheduler }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_context_clone() {
        // CommandContext should be Clone for sharing across handlers
        fn assert_clone<T: Clone>() {}
        assert_clone::<CommandContext>();
    }
}
