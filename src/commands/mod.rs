//! # Command System
//!
//! Text command (`/track`, `/show`, ...) handling and per-user dialogs.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Handler trait, router, dialog sessions

pub mod context;
pub mod handler;
pub mod handlers;
pub mod router;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export handler infrastructure
pub use context::CommandContext;
pub use handler::ChatCommandHandler;
pub use router::CommandRouter;
pub use session::{DialogState, IntervalGrammar, Reply, SessionStore};
