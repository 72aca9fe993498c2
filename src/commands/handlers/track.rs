//! Intake command handlers
//!
//! Handles: track

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::ChatCommandHandler;
use crate::commands::session::{DialogState, Reply};
use crate::features::hydration::Outcome;

pub const AMOUNT_PROMPT: &str = "How much water did you drink today (in milliliters)?";
pub const INVALID_AMOUNT_TEXT: &str = "Please input a valid number (in milliliters). Try again.";

/// Handler for /track and the amount the user answers with
pub struct TrackHandler;

#[async_trait]
impl ChatCommandHandler for TrackHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["track"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        _command: &str,
        user_id: &str,
        args: &str,
    ) -> Result<Reply> {
        // `/track 250` records straight away
        if args.trim().is_empty() {
            Ok(Self::begin_intake_dialog())
        } else {
            Ok(Self::record_intake(&ctx, user_id, args))
        }
    }

    async fn handle_input(
        &self,
        ctx: Arc<CommandContext>,
        _state: DialogState,
        user_id: &str,
        text: &str,
    ) -> Result<Reply> {
        Ok(Self::record_intake(&ctx, user_id, text))
    }
}

impl TrackHandler {
    pub fn begin_intake_dialog() -> Reply {
        Reply::new(AMOUNT_PROMPT, DialogState::AwaitingAmount)
    }

    /// Record the amount in `text`; a bad number keeps the dialog open
    pub fn record_intake(ctx: &CommandContext, user_id: &str, text: &str) -> Reply {
        match ctx.tracker.record_intake(user_id, text) {
            Ok(Outcome::GoalReached { target }) => Reply::done(format!(
                "🎉 Congratulations! You've reached your daily water goal of {target}ml! Well done!"
            )),
            Ok(Outcome::Progress {
                cumulative_ml,
                daily_target_ml,
                encouragement,
            }) => Reply::done(format!(
                "Nice! You've drunk {cumulative_ml}ml out of {daily_target_ml}ml today. {encouragement}"
            )),
            Err(e) => {
                debug!("Re-prompting user {user_id}: {e}");
                Reply::new(INVALID_AMOUNT_TEXT, DialogState::AwaitingAmount)
            }
        }
    }
}
