//! Reminder command handlers
//!
//! Handles: setreminder, reminder, cancel
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Free-text intervals on /setreminder; /reminder kept for bare hours
//! - 1.0.0: Hourly reminders and cancel

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::ChatCommandHandler;
use crate::commands::session::{DialogState, IntervalGrammar, Reply};
use crate::features::reminders::{CancelOutcome, ReminderInterval};

pub const INTERVAL_PROMPT: &str =
    "How often would you like to be reminded to drink water? (e.g. \"30 minutes\" or \"2 hours\")";
pub const LEGACY_INTERVAL_PROMPT: &str =
    "How often would you like to be reminded to drink water (in hours)?";
pub const INVALID_INTERVAL_TEXT: &str =
    "Please enter a reminder interval like \"30 minutes\" or \"2 hours\".";
pub const INVALID_LEGACY_INTERVAL_TEXT: &str =
    "Please enter a valid number for reminder interval (in hours).";
pub const CANCELLED_TEXT: &str = "Your reminder has been canceled.";
pub const NOTHING_TO_CANCEL_TEXT: &str = "You don't have any active reminders.";

/// Handler for reminder-related commands
pub struct RemindHandler;

#[async_trait]
impl ChatCommandHandler for RemindHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["setreminder", "reminder", "cancel"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        command: &str,
        user_id: &str,
        args: &str,
    ) -> Result<Reply> {
        let grammar = match command {
            "cancel" => return Ok(Self::cancel_reminder(&ctx, user_id).await),
            "reminder" => IntervalGrammar::LegacyHours,
            _ => IntervalGrammar::FreeText,
        };

        if args.trim().is_empty() {
            Ok(Self::begin_reminder_dialog(grammar))
        } else {
            Ok(Self::configure_with(&ctx, user_id, grammar, args).await)
        }
    }

    async fn handle_input(
        &self,
        ctx: Arc<CommandContext>,
        state: DialogState,
        user_id: &str,
        text: &str,
    ) -> Result<Reply> {
        let grammar = match state {
            DialogState::AwaitingInterval(grammar) => grammar,
            other => anyhow::bail!("reminder input received in state {other:?}"),
        };
        Ok(Self::configure_with(&ctx, user_id, grammar, text).await)
    }
}

impl RemindHandler {
    pub fn begin_reminder_dialog(grammar: IntervalGrammar) -> Reply {
        let prompt = match grammar {
            IntervalGrammar::FreeText => INTERVAL_PROMPT,
            IntervalGrammar::LegacyHours => LEGACY_INTERVAL_PROMPT,
        };
        Reply::new(prompt, DialogState::AwaitingInterval(grammar))
    }

    /// Set or replace the reminder from free text such as "30 minutes"
    pub async fn configure_reminder(ctx: &CommandContext, user_id: &str, text: &str) -> Reply {
        Self::configure_with(ctx, user_id, IntervalGrammar::FreeText, text).await
    }

    async fn configure_with(
        ctx: &CommandContext,
        user_id: &str,
        grammar: IntervalGrammar,
        text: &str,
    ) -> Reply {
        let parsed = match grammar {
            IntervalGrammar::FreeText => ReminderInterval::parse(text),
            IntervalGrammar::LegacyHours => {
                debug!("User {user_id} used the deprecated /reminder grammar");
                ReminderInterval::parse_legacy_hours(text)
            }
        };

        let interval = match parsed {
            Ok(interval) => interval,
            Err(e) => {
                debug!("Re-prompting user {user_id}: {e}");
                let text = match grammar {
                    IntervalGrammar::FreeText => INVALID_INTERVAL_TEXT,
                    IntervalGrammar::LegacyHours => INVALID_LEGACY_INTERVAL_TEXT,
                };
                return Reply::new(text, DialogState::AwaitingInterval(grammar));
            }
        };

        let outcome = ctx.scheduler.schedule_interval(user_id, interval).await;
        info!("User {user_id} reminder: {outcome:?}");

        Reply::done(format!(
            "Reminder set! I'll remind you every {interval} to drink water."
        ))
    }

    pub async fn cancel_reminder(ctx: &CommandContext, user_id: &str) -> Reply {
        match ctx.scheduler.cancel(user_id).await {
            CancelOutcome::Cancelled => Reply::done(CANCELLED_TEXT),
            CancelOutcome::NothingToCancel => Reply::done(NOTHING_TO_CANCEL_TEXT),
        }
    }
}
