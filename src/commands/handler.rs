//! Chat command handler trait
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Text command handlers with dialog input

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::context::CommandContext;
use super::session::{DialogState, Reply};

/// Trait for chat command handlers
///
/// Each handler processes one or more `/commands`. Handlers that open a dialog
/// also receive the user's follow-up text through [`handle_input`].
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler;
///
/// #[async_trait]
/// impl ChatCommandHandler for PingHandler {
///     fn command_names(&self) -> &'static [&'static str] {
///         &["ping"]
///     }
///
///     async fn handle(
///         &self,
///         _ctx: Arc<CommandContext>,
///         _command: &str,
///         _user_id: &str,
///         _args: &str,
///     ) -> Result<Reply> {
///         Ok(Reply::done("Pong!"))
///     }
/// }
/// ```
///
/// [`handle_input`]: ChatCommandHandler::handle_input
#[async_trait]
pub trait ChatCommandHandler: Send + Sync {
    /// Command name(s) this handler processes, without the leading slash
    fn command_names(&self) -> &'static [&'static str];

    /// Handle `/command args`
    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        command: &str,
        user_id: &str,
        args: &str,
    ) -> Result<Reply>;

    /// Handle plain text from a user whose dialog this handler opened
    async fn handle_input(
        &self,
        _ctx: Arc<CommandContext>,
        state: DialogState,
        _user_id: &str,
        _text: &str,
    ) -> Result<Reply> {
        anyhow::bail!(
            "/{} does not take dialog input (state {state:?})",
            self.command_names().first().copied().unwrap_or("?")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test that the trait is object-safe (can be used with dyn)
    fn _assert_object_safe(_: &dyn ChatCommandHandler) {}
}
