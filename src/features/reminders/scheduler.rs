//! Per-user reminder registrations
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Progress-aware reminder text with the proportional target
//! - 1.0.0: Set/replace/cancel with one registration per user

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDateTime, NaiveTime, Utc};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::interval::ReminderInterval;
use super::notifier::Notifier;
use super::timer::{ReminderCallback, TimerSubstrate};
use crate::core::HydrationError;
use crate::features::hydration::{proportional_target_at, HydrationTracker};

/// The single live reminder for a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRegistration {
    pub user_id: String,
    pub interval: ReminderInterval,
    /// Fresh for every set/replace, used to correlate log lines
    pub registration_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    Created(ReminderInterval),
    Replaced {
        previous: ReminderInterval,
        interval: ReminderInterval,
    },
}

impl ScheduleOutcome {
    /// Cadence now in effect
    pub fn interval(&self) -> ReminderInterval {
        match *self {
            ScheduleOutcome::Created(interval) => interval,
            ScheduleOutcome::Replaced { interval, .. } => interval,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled,
    /// No reminder was active; not an error
    NothingToCancel,
}

/// Builds and delivers the message sent when a reminder fires.
///
/// Holds its notifier and tracker from construction so the timer only needs to
/// hand it a user id.
pub struct ReminderFirer {
    tracker: HydrationTracker,
    notifier: Arc<dyn Notifier>,
    wake_time: NaiveTime,
    sleep_time: NaiveTime,
}

impl ReminderFirer {
    pub fn new(
        tracker: HydrationTracker,
        notifier: Arc<dyn Notifier>,
        wake_time: NaiveTime,
        sleep_time: NaiveTime,
    ) -> Self {
        ReminderFirer {
            tracker,
            notifier,
            wake_time,
            sleep_time,
        }
    }

    /// Reminder text for a user at a given local time
    pub fn reminder_text_at(&self, user_id: &str, now: NaiveDateTime) -> String {
        let progress = self.tracker.current_progress_on(user_id, now.date());
        let daily_target_ml = progress
            .map(|p| p.daily_target_ml)
            .unwrap_or_else(|| self.tracker.default_target_ml());
        let expected_ml =
            proportional_target_at(now.time(), self.wake_time, self.sleep_time, daily_target_ml);

        match progress {
            Some(p) => format!(
                "⏰ Time to drink some water! You've had {}ml of {}ml today; by now you should be at about {}ml. Stay hydrated!",
                p.cumulative_ml, p.daily_target_ml, expected_ml
            ),
            None => format!(
                "⏰ Time to drink some water! By now you should be at about {expected_ml}ml of {daily_target_ml}ml. Use /track to log what you've had."
            ),
        }
    }

    /// Send the reminder, mapping transport errors to [`HydrationError::DeliveryFailure`]
    pub async fn deliver_at(&self, user_id: &str, now: NaiveDateTime) -> Result<(), HydrationError> {
        let text = self.reminder_text_at(user_id, now);
        self.notifier
            .send(user_id, &text)
            .await
            .map_err(|e| HydrationError::DeliveryFailure {
                user_id: user_id.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl ReminderCallback for ReminderFirer {
    async fn fire(&self, user_id: &str) {
        match self.deliver_at(user_id, Local::now().naive_local()).await {
            Ok(()) => debug!("Delivered reminder to user {user_id}"),
            // Best effort: the next tick is the retry
            Err(e) => warn!("{e}"),
        }
    }
}

/// Owns the user → registration map and keeps the timer substrate in step with it
pub struct ReminderScheduler {
    registrations: Mutex<HashMap<String, ReminderRegistration>>,
    timer: Arc<dyn TimerSubstrate>,
    firer: Arc<ReminderFirer>,
}

impl ReminderScheduler {
    pub fn new(timer: Arc<dyn TimerSubstrate>, firer: Arc<ReminderFirer>) -> Self {
        ReminderScheduler {
            registrations: Mutex::new(HashMap::new()),
            timer,
            firer,
        }
    }

    fn job_id(user_id: &str) -> String {
        format!("reminder_{user_id}")
    }

    /// Parse free-text `interval_text` and set or replace the user's reminder
    pub async fn schedule(
        &self,
        user_id: &str,
        interval_text: &str,
    ) -> Result<ScheduleOutcome, HydrationError> {
        let interval = ReminderInterval::parse(interval_text)?;
        Ok(self.schedule_interval(user_id, interval).await)
    }

    /// Set or replace the user's reminder with an already parsed interval
    pub async fn schedule_interval(
        &self,
        user_id: &str,
        interval: ReminderInterval,
    ) -> ScheduleOutcome {
        let registration = ReminderRegistration {
            user_id: user_id.to_string(),
            interval,
            registration_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };

        // Lock spans the substrate call so no other command sees the two views disagree
        let mut registrations = self.registrations.lock().await;

        self.timer.register(
            &Self::job_id(user_id),
            interval.as_duration(),
            self.firer.clone(),
            user_id,
        );

        info!(
            "Reminder {} for user {user_id}: every {interval} from {}",
            registration.registration_id,
            registration.created_at.format("%Y-%m-%d %H:%M:%S")
        );

        match registrations.insert(user_id.to_string(), registration) {
            Some(previous) => ScheduleOutcome::Replaced {
                previous: previous.interval,
                interval,
            },
            None => ScheduleOutcome::Created(interval),
        }
    }

    /// Remove the user's reminder. Calling this again is harmless.
    pub async fn cancel(&self, user_id: &str) -> CancelOutcome {
        let mut registrations = self.registrations.lock().await;

        let Some(registration) = registrations.remove(user_id) else {
            return CancelOutcome::NothingToCancel;
        };

        if self.timer.unregister(&Self::job_id(user_id)) {
            info!(
                "Cancelled reminder {} for user {user_id} (active since {})",
                registration.registration_id,
                registration.created_at.format("%Y-%m-%d %H:%M:%S")
            );
            CancelOutcome::Cancelled
        } else {
            debug!(
                "Reminder {} for user {user_id} was already gone from the timer",
                registration.registration_id
            );
            CancelOutcome::NothingToCancel
        }
    }

    /// The user's live registration, dropping it if the timer no longer has the job
    pub async fn registration(&self, user_id: &str) -> Option<ReminderRegistration> {
        let mut registrations = self.registrations.lock().await;

        if !registrations.contains_key(user_id) {
            return None;
        }
        if !self.timer.is_registered(&Self::job_id(user_id)) {
            debug!("Dropping stale reminder for user {user_id}");
            registrations.remove(user_id);
            return None;
        }
        registrations.get(user_id).cloned()
    }

    pub async fn active_count(&self) -> usize {
        self.registrations.lock().await.len()
    }

    /// Entry point for a fired timer
    pub async fn on_fire(&self, user_id: &str) {
        self.firer.fire(user_id).await;
    }
}
