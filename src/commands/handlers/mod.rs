//! Per-command handler implementations
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: start/help, track, show, setreminder/reminder/cancel

pub mod remind;
pub mod show;
pub mod start;
pub mod track;

use std::sync::Arc;

use super::handler::ChatCommandHandler;

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be routed by CommandRouter.
pub fn create_all_handlers() -> Vec<Arc<dyn ChatCommandHandler>> {
    vec![
        Arc::new(start::StartHandler),
        Arc::new(track::TrackHandler),
        Arc::new(show::ShowHandler),
        Arc::new(remind::RemindHandler),
    ]
}
