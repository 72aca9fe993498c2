//! Text message routing
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: `/command` dispatch plus dialog follow-ups by session state

use anyhow::Result;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::context::CommandContext;
use super::handler::ChatCommandHandler;
use super::handlers::create_all_handlers;
use super::session::{Reply, SessionStore};

pub const UNKNOWN_COMMAND_TEXT: &str = "Unknown command. Type /help to see available commands.";

/// Split `/name@bot rest` into a lower-cased command name and its arguments
pub fn parse_command(text: &str) -> Option<(String, &str)> {
    let rest = text.trim().strip_prefix('/')?;
    let (head, args) = match rest.split_once(char::is_whitespace) {
        Some((head, args)) => (head, args.trim()),
        None => (rest, ""),
    };
    let name = head.split('@').next().unwrap_or_default().to_lowercase();
    Some((name, args))
}

/// Routes inbound text to command handlers and tracks each user's dialog
pub struct CommandRouter {
    /// Command name → handler; a handler appears once per name it declares
    handlers: HashMap<&'static str, Arc<dyn ChatCommandHandler>>,
    ctx: Arc<CommandContext>,
    sessions: SessionStore,
}

impl CommandRouter {
    /// Router with every built-in handler registered
    pub fn new(ctx: CommandContext) -> Self {
        let mut handlers = HashMap::new();
        for handler in create_all_handlers() {
            for name in handler.command_names() {
                handlers.insert(*name, Arc::clone(&handler));
            }
        }
        CommandRouter {
            handlers,
            ctx: Arc::new(ctx),
            sessions: SessionStore::new(),
        }
    }

    fn handler(&self, name: &str) -> Option<Arc<dyn ChatCommandHandler>> {
        self.handlers.get(name).cloned()
    }

    pub fn context(&self) -> &Arc<CommandContext> {
        &self.ctx
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handle one inbound message. `Ok(None)` means nothing should be sent back.
    pub async fn handle_text(&self, user_id: &str, text: &str) -> Result<Option<String>> {
        let request_id = Uuid::new_v4();
        let preview = text.chars().take(100).collect::<String>();

        let reply = match parse_command(text) {
            Some((name, args)) => {
                info!("[{request_id}] 📥 Command /{name} | User: {user_id} | Content: '{preview}'");
                let Some(handler) = self.handler(&name) else {
                    debug!("[{request_id}] Unknown command /{name}");
                    return Ok(Some(UNKNOWN_COMMAND_TEXT.to_string()));
                };
                debug!("[{request_id}] Dispatching /{name}");
                handler.handle(self.ctx.clone(), &name, user_id, args).await?
            }
            None => {
                let state = self.sessions.get(user_id);
                let Some(owner) = state.owner_command() else {
                    debug!("[{request_id}] No open dialog for {user_id}, ignoring '{preview}'");
                    return Ok(None);
                };
                info!("[{request_id}] 📥 Dialog input | User: {user_id} | Content: '{preview}'");
                let Some(handler) = self.handler(owner) else {
                    warn!("[{request_id}] No handler for /{owner}, closing dialog {state:?}");
                    self.sessions.set(user_id, Default::default());
                    return Ok(None);
                };
                debug!("[{request_id}] Dialog input for /{owner} in {state:?}");
                handler
                    .handle_input(self.ctx.clone(), state, user_id, text)
                    .await?
            }
        };

        let Reply { text, next_state } = reply;
        match next_state {
            Some(state) => {
                self.sessions.set(user_id, state);
                debug!("[{request_id}] ✅ Replying, next state {state:?}");
            }
            None => debug!("[{request_id}] ✅ Replying, dialog unchanged"),
        }

        Ok(Some(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::handlers::remind::{
        CANCELLED_TEXT, INTERVAL_PROMPT, INVALID_INTERVAL_TEXT, NOTHING_TO_CANCEL_TEXT,
    };
    use crate::commands::handlers::show::NOT_TRACKED_TEXT;
    use crate::commands::handlers::track::{AMOUNT_PROMPT, INVALID_AMOUNT_TEXT};
    use crate::commands::session::{DialogState, IntervalGrammar};
    use crate::commands::test_support::test_context;
    use crate::features::reminders::ReminderInterval;

    fn router() -> CommandRouter {
        let (ctx, _) = test_context();
        CommandRouter::new((*ctx).clone())
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("/track"), Some(("track".to_string(), "")));
        assert_eq!(
            parse_command("  /SetReminder  30 minutes "),
            Some(("setreminder".to_string(), "30 minutes"))
        );
        assert_eq!(
            parse_command("/show@glugglug_bot"),
            Some(("show".to_string(), ""))
        );
        assert_eq!(parse_command("250"), None);
        assert_eq!(parse_command("/"), Some((String::new(), "")));
    }

    #[tokio::test]
    async fn test_intake_dialog() {
        let router = router();

        let prompt = router.handle_text("u1", "/track").await.unwrap();
        assert_eq!(prompt.as_deref(), Some(AMOUNT_PROMPT));
        assert_eq!(router.sessions().get("u1"), DialogState::AwaitingAmount);

        let retry = router.handle_text("u1", "a glass").await.unwrap();
        assert_eq!(retry.as_deref(), Some(INVALID_AMOUNT_TEXT));
        assert_eq!(router.sessions().get("u1"), DialogState::AwaitingAmount);

        let done = router.handle_text("u1", "400").await.unwrap().unwrap();
        assert!(done.starts_with("Nice! You've drunk 400ml out of 2000ml today."));
        assert_eq!(router.sessions().get("u1"), DialogState::Done);
    }

    #[tokio::test]
    async fn test_plain_text_outside_dialog_is_ignored() {
        let router = router();
        assert_eq!(router.handle_text("u1", "hello").await.unwrap(), None);
        assert_eq!(router.handle_text("u1", "250").await.unwrap(), None);
        assert!(router.context().tracker.state("u1").is_none());
    }

    #[tokio::test]
    async fn test_reminder_dialog() {
        let router = router();

        let prompt = router.handle_text("u1", "/setreminder").await.unwrap();
        assert_eq!(prompt.as_deref(), Some(INTERVAL_PROMPT));

        let retry = router.handle_text("u1", "often").await.unwrap();
        assert_eq!(retry.as_deref(), Some(INVALID_INTERVAL_TEXT));
        assert_eq!(
            router.sessions().get("u1"),
            DialogState::AwaitingInterval(IntervalGrammar::FreeText)
        );

        let done = router.handle_text("u1", "2 hours").await.unwrap();
        assert_eq!(
            done.as_deref(),
            Some("Reminder set! I'll remind you every 2 hours to drink water.")
        );
        assert_eq!(router.sessions().get("u1"), DialogState::Done);
        assert_eq!(
            router
                .context()
                .scheduler
                .registration("u1")
                .await
                .unwrap()
                .interval,
            ReminderInterval::Hours(2)
        );
    }

    #[tokio::test]
    async fn test_cancel_closes_open_dialog() {
        let router = router();
        router.handle_text("u1", "/track").await.unwrap();

        let reply = router.handle_text("u1", "/cancel").await.unwrap();
        assert_eq!(reply.as_deref(), Some(NOTHING_TO_CANCEL_TEXT));
        assert_eq!(router.sessions().get("u1"), DialogState::Done);
        assert_eq!(router.handle_text("u1", "300").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_cancel_after_setting_reminder() {
        let router = router();
        router.handle_text("u1", "/setreminder 45 minutes").await.unwrap();

        let first = router.handle_text("u1", "/cancel").await.unwrap();
        let second = router.handle_text("u1", "/cancel").await.unwrap();
        assert_eq!(first.as_deref(), Some(CANCELLED_TEXT));
        assert_eq!(second.as_deref(), Some(NOTHING_TO_CANCEL_TEXT));
    }

    #[tokio::test]
    async fn test_show_for_new_user() {
        let router = router();
        let reply = router.handle_text("u1", "/show").await.unwrap();
        assert_eq!(reply.as_deref(), Some(NOT_TRACKED_TEXT));
    }

    #[test]
    fn test_reminder_aliases_share_handler() {
        let router = router();
        let canonical = router.handler("setreminder").unwrap();
        let legacy = router.handler("reminder").unwrap();
        assert!(Arc::ptr_eq(&canonical, &legacy));
        assert!(Arc::ptr_eq(&canonical, &router.handler("cancel").unwrap()));
        assert!(router.handler("remind").is_none());
    }

    #[test]
    fn test_every_handler_name_is_routed() {
        let router = router();
        for name in ["start", "help", "track", "show", "setreminder", "reminder", "cancel"] {
            assert!(router.handler(name).is_some(), "/{name} is not routed");
        }
    }

    #[tokio::test]
    async fn test_show_during_intake_keeps_dialog() {
        let router = router();
        router.handle_text("u1", "/track").await.unwrap();

        let shown = router.handle_text("u1", "/show").await.unwrap();
        assert_eq!(shown.as_deref(), Some(NOT_TRACKED_TEXT));
        assert_eq!(router.sessions().get("u1"), DialogState::AwaitingAmount);

        let recorded = router.handle_text("u1", "250").await.unwrap().unwrap();
        assert!(recorded.starts_with("Nice! You've drunk 250ml out of 2000ml today."));
        assert_eq!(router.context().tracker.state("u1").unwrap().cumulative_ml, 250);
        assert_eq!(router.sessions().get("u1"), DialogState::Done);
    }

    #[tokio::test]
    async fn test_help_during_reminder_dialog_keeps_dialog() {
        let router = router();
        router.handle_text("u1", "/setreminder").await.unwrap();
        router.handle_text("u1", "/help").await.unwrap();
        router.handle_text("u1", "/start").await.unwrap();

        assert_eq!(
            router.sessions().get("u1"),
            DialogState::AwaitingInterval(IntervalGrammar::FreeText)
        );
        let done = router.handle_text("u1", "20 minutes").await.unwrap();
        assert_eq!(
            done.as_deref(),
            Some("Reminder set! I'll remind you every 20 minutes to drink water.")
        );
    }

    #[tokio::test]
    async fn test_unknown_command_keeps_dialog() {
        let router = router();
        router.handle_text("u1", "/track").await.unwrap();

        let reply = router.handle_text("u1", "/dance").await.unwrap();
        assert_eq!(reply.as_deref(), Some(UNKNOWN_COMMAND_TEXT));
        assert_eq!(router.sessions().get("u1"), DialogState::AwaitingAmount);
    }

    #[tokio::test]
    async fn test_sessions_are_per_user() {
        let router = router();
        router.handle_text("u1", "/track").await.unwrap();
        router.handle_text("u2", "/reminder").await.unwrap();

        assert_eq!(router.sessions().get("u1"), DialogState::AwaitingAmount);
        assert_eq!(
            router.sessions().get("u2"),
            DialogState::AwaitingInterval(IntervalGrammar::LegacyHours)
        );

        router.handle_text("u2", "4").await.unwrap();
        assert_eq!(router.sessions().get("u1"), DialogState::AwaitingAmount);
        assert_eq!(router.sessions().get("u2"), DialogState::Done);
    }
}
