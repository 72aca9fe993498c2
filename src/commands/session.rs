//! Per-user dialog sessions
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Tagged dialog state per user, replacing numbered conversation steps

use dashmap::DashMap;

/// How a pending reminder answer is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntervalGrammar {
    /// `30 minutes`, `2 hours`
    #[default]
    FreeText,
    /// Bare count of hours (deprecated `/reminder`)
    LegacyHours,
}

/// The step a user's conversation is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    AwaitingAmount,
    AwaitingInterval(IntervalGrammar),
    #[default]
    Done,
}

impl DialogState {
    /// Command whose handler interprets plain text in this state
    pub fn owner_command(&self) -> Option<&'static str> {
        match self {
            DialogState::AwaitingAmount => Some("track"),
            DialogState::AwaitingInterval(_) => Some("setreminder"),
            DialogState::Done => None,
        }
    }
}

/// Text to send back plus the dialog state to move to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// `None` leaves whatever dialog the user is in untouched
    pub next_state: Option<DialogState>,
}

impl Reply {
    pub fn new(text: impl Into<String>, next_state: DialogState) -> Self {
        Reply {
            text: text.into(),
            next_state: Some(next_state),
        }
    }

    /// Reply that closes the dialog
    pub fn done(text: impl Into<String>) -> Self {
        Self::new(text, DialogState::Done)
    }

    /// Reply from a command that does not take part in dialogs
    pub fn keep(text: impl Into<String>) -> Self {
        Reply {
            text: text.into(),
            next_state: None,
        }
    }
}

/// Dialog state for every user mid-conversation. Users in `Done` have no entry.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<String, DialogState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user_id: &str) -> DialogState {
        self.sessions
            .get(user_id)
            .map(|state| *state)
            .unwrap_or_default()
    }

    pub fn set(&self, user_id: &str, state: DialogState) {
        if state == DialogState::Done {
            self.sessions.remove(user_id);
        } else {
            self.sessions.insert(user_id.to_string(), state);
        }
    }

    /// Number of users with an open dialog
    pub fn open_count(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_done() {
        let store = SessionStore::new();
        assert_eq!(store.get("u1"), DialogState::Done);
    }

    #[test]
    fn test_set_and_clear() {
        let store = SessionStore::new();
        store.set("u1", DialogState::AwaitingAmount);
        store.set("u2", DialogState::AwaitingInterval(IntervalGrammar::LegacyHours));
        assert_eq!(store.get("u1"), DialogState::AwaitingAmount);
        assert_eq!(store.open_count(), 2);

        store.set("u1", DialogState::Done);
        assert_eq!(store.get("u1"), DialogState::Done);
        assert_eq!(store.open_count(), 1);
    }

    #[test]
    fn test_owner_command() {
        assert_eq!(DialogState::AwaitingAmount.owner_command(), Some("track"));
        assert_eq!(
            DialogState::AwaitingInterval(IntervalGrammar::FreeText).owner_command(),
            Some("setreminder")
        );
        assert_eq!(DialogState::Done.owner_command(), None);
    }

    #[test]
    fn test_reply_done() {
        let reply = Reply::done("ok");
        assert_eq!(reply.text, "ok");
        assert_eq!(reply.next_state, Some(DialogState::Done));
    }

    #[test]
    fn test_reply_keep() {
        let reply = Reply::keep("still here");
        assert_eq!(reply.text, "still here");
        assert_eq!(reply.next_state, None);
    }
}
