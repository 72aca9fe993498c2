//! Outbound delivery seam
//!
//! The core never talks to a chat transport directly. Whatever sends messages
//! (the Discord client in `bin/bot.rs`, a test double) implements [`Notifier`].

use anyhow::Result;
use async_trait::async_trait;

/// Delivers a text message to a user
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, user_id: &str, text: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test that the trait is object-safe (can be used with dyn)
    fn _assert_object_safe(_: &dyn Notifier) {}
}
