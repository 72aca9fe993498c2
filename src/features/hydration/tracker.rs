//! Per-user daily intake tracking
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Calendar-day rollover reset
//! - 1.0.0: Running totals, goal detection, encouragement rotation

use chrono::{Local, NaiveDate};
use dashmap::DashMap;
use log::{debug, info};
use std::sync::Arc;

use crate::core::config::DEFAULT_DAILY_TARGET_ML;
use crate::core::HydrationError;

/// Encouragement lines, picked by `cumulative_ml % len`
pub const ENCOURAGING_MESSAGES: [&str; 5] = [
    "Great job, keep going!",
    "You're doing awesome!",
    "Keep it up, you're almost there!",
    "Drink up, stay hydrated!",
    "Hydration is key! You're doing well!",
];

/// Deterministic rotation through `messages` keyed on the running total
pub fn encouragement_for<'a>(cumulative_ml: i64, messages: &[&'a str]) -> &'a str {
    if messages.is_empty() {
        return "";
    }
    messages[cumulative_ml.rem_euclid(messages.len() as i64) as usize]
}

/// Tracking state for one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserHydrationState {
    pub user_id: String,
    pub cumulative_ml: i64,
    pub daily_target_ml: i64,
    /// Calendar day the running total belongs to
    pub tracking_day: NaiveDate,
}

/// Snapshot returned by progress queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub cumulative_ml: i64,
    pub daily_target_ml: i64,
}

/// Result of a successful intake record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Target met or exceeded; the running total has been reset to zero
    GoalReached { target: i64 },
    /// Still below target
    Progress {
        cumulative_ml: i64,
        daily_target_ml: i64,
        encouragement: &'static str,
    },
}

/// Owns every user's running total.
///
/// Cloning is cheap and shares the same underlying map, so the message path
/// and the reminder timer can hold their own handles.
#[derive(Clone)]
pub struct HydrationTracker {
    users: Arc<DashMap<String, UserHydrationState>>,
    default_target_ml: i64,
    day_rollover: bool,
}

impl Default for HydrationTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DAILY_TARGET_ML, true)
    }
}

impl HydrationTracker {
    pub fn new(default_target_ml: i64, day_rollover: bool) -> Self {
        HydrationTracker {
            users: Arc::new(DashMap::new()),
            default_target_ml,
            day_rollover,
        }
    }

    /// Target assigned to users on their first record
    pub fn default_target_ml(&self) -> i64 {
        self.default_target_ml
    }

    /// Parse `amount_text` as milliliters and add it to today's total
    pub fn record_intake(&self, user_id: &str, amount_text: &str) -> Result<Outcome, HydrationError> {
        self.record_intake_on(user_id, amount_text, Local::now().date_naive())
    }

    /// Same as [`record_intake`](Self::record_intake) with an explicit calendar day
    pub fn record_intake_on(
        &self,
        user_id: &str,
        amount_text: &str,
        today: NaiveDate,
    ) -> Result<Outcome, HydrationError> {
        let amount_ml = parse_amount(amount_text)?;

        let mut state = self
            .users
            .entry(user_id.to_string())
            .or_insert_with(|| UserHydrationState {
                user_id: user_id.to_string(),
                cumulative_ml: 0,
                daily_target_ml: self.default_target_ml,
                tracking_day: today,
            });

        if self.day_rollover && state.tracking_day != today {
            debug!(
                "New day for user {user_id}: dropping {}ml from {}",
                state.cumulative_ml, state.tracking_day
            );
            state.cumulative_ml = 0;
            state.tracking_day = today;
        }

        state.cumulative_ml = state.cumulative_ml.saturating_add(amount_ml);
        let cumulative_ml = state.cumulative_ml;
        let daily_target_ml = state.daily_target_ml;

        if cumulative_ml >= daily_target_ml {
            state.cumulative_ml = 0;
            info!("User {user_id} reached daily goal of {daily_target_ml}ml");
            return Ok(Outcome::GoalReached {
                target: daily_target_ml,
            });
        }

        debug!("User {user_id} at {cumulative_ml}/{daily_target_ml}ml after +{amount_ml}ml");

        Ok(Outcome::Progress {
            cumulative_ml,
            daily_target_ml,
            encouragement: encouragement_for(cumulative_ml, &ENCOURAGING_MESSAGES),
        })
    }

    /// Today's progress, or `None` when nothing is being tracked.
    ///
    /// A total of exactly zero (including right after a goal reset) also
    /// reports `None`.
    pub fn current_progress(&self, user_id: &str) -> Option<Progress> {
        self.current_progress_on(user_id, Local::now().date_naive())
    }

    /// Same as [`current_progress`](Self::current_progress) with an explicit calendar day
    pub fn current_progress_on(&self, user_id: &str, today: NaiveDate) -> Option<Progress> {
        let state = self.users.get(user_id)?;

        if self.day_rollover && state.tracking_day != today {
            return None;
        }
        if state.cumulative_ml == 0 {
            return None;
        }

        Some(Progress {
            cumulative_ml: state.cumulative_ml,
            daily_target_ml: state.daily_target_ml,
        })
    }

    /// Raw state for a user, if one has been created
    pub fn state(&self, user_id: &str) -> Option<UserHydrationState> {
        self.users.get(user_id).map(|s| s.clone())
    }

    /// Number of users with tracking state
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

fn parse_amount(text: &str) -> Result<i64, HydrationError> {
    match text.trim().parse::<i64>() {
        Ok(amount) if amount >= 0 => Ok(amount),
        _ => Err(HydrationError::InvalidAmount(text.trim().to_string())),
    }
}
