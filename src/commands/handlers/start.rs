//! Greeting command handlers
//!
//! Handles: start, help

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::ChatCommandHandler;
use crate::commands::session::Reply;

pub const WELCOME_TEXT: &str =
    "Welcome to the Drinking Water Tracker Bot! Type /help to see available commands.";

pub const HELP_TEXT: &str = r#"Available commands:
/track - Log how much water you just drank (in milliliters)
/show - Check today's progress
/setreminder - Get reminded every so often, e.g. "30 minutes" or "2 hours"
/cancel - Stop your reminder
/reminder - Older form of /setreminder that takes a number of hours"#;

/// Handler for start and help
pub struct StartHandler;

#[async_trait]
impl ChatCommandHandler for StartHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["start", "help"]
    }

    async fn handle(
        &self,
        _ctx: Arc<CommandContext>,
        command: &str,
        _user_id: &str,
        _args: &str,
    ) -> Result<Reply> {
        match command {
            "help" => Ok(Reply::keep(HELP_TEXT)),
            _ => Ok(Reply::keep(WELCOME_TEXT)),
        }
    }
}
