//! Progress command handler
//!
//! Handles: show

use anyhow::Result;
use async_trait::async_trait;
use chrono::Local;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::ChatCommandHandler;
use crate::commands::session::Reply;

pub const NOT_TRACKED_TEXT: &str =
    "You haven't tracked your water intake yet! Use /track to start.";

/// Handler for /show
pub struct ShowHandler;

#[async_trait]
impl ChatCommandHandler for ShowHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["show"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        _command: &str,
        user_id: &str,
        _args: &str,
    ) -> Result<Reply> {
        Ok(Self::show_progress(&ctx, user_id).await)
    }
}

impl ShowHandler {
    /// Progress summary; an open dialog stays open
    pub async fn show_progress(ctx: &CommandContext, user_id: &str) -> Reply {
        let Some(progress) = ctx.tracker.current_progress(user_id) else {
            return Reply::keep(NOT_TRACKED_TEXT);
        };

        let mut text = format!(
            "Your current progress: {}ml out of {}ml today. Keep it up!",
            progress.cumulative_ml, progress.daily_target_ml
        );
        if let Some(registration) = ctx.scheduler.registration(user_id).await {
            text.push_str(&format!(
                "\nReminder active: every {} (set at {}).",
                registration.interval,
                registration.created_at.with_timezone(&Local).format("%H:%M")
            ));
        }
        Reply::keep(text)
    }
}
