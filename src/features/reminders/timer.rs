//! Recurring timer substrate
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Trait plus a tokio-backed implementation with replace-existing semantics

use async_trait::async_trait;
use dashmap::DashMap;
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Work performed each time a recurring timer fires.
///
/// Receives nothing but the user identity; any collaborators (notifier,
/// tracker) are captured by the implementor when it is constructed.
#[async_trait]
pub trait ReminderCallback: Send + Sync {
    async fn fire(&self, user_id: &str);
}

/// Registry of recurring jobs keyed by job id
pub trait TimerSubstrate: Send + Sync {
    /// Start a job that calls `callback` every `cadence`, first fire one
    /// cadence from now. An existing job with the same id is stopped before
    /// this returns.
    fn register(
        &self,
        id: &str,
        cadence: Duration,
        callback: Arc<dyn ReminderCallback>,
        user_id: &str,
    );

    /// Stop a job. Returns `false` if no live job had that id.
    fn unregister(&self, id: &str) -> bool;

    fn is_registered(&self, id: &str) -> bool;
}

/// One tokio task per job
#[derive(Default)]
pub struct TokioTimer {
    jobs: DashMap<String, JoinHandle<()>>,
}

impl TokioTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of jobs currently tracked
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl TimerSubstrate for TokioTimer {
    fn register(
        &self,
        id: &str,
        cadence: Duration,
        callback: Arc<dyn ReminderCallback>,
        user_id: &str,
    ) {
        let job_id = id.to_string();
        let user_id = user_id.to_string();

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + cadence, cadence);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                debug!("Timer {job_id} fired for user {user_id}");
                callback.fire(&user_id).await;
            }
        });

        if let Some(previous) = self.jobs.insert(id.to_string(), handle) {
            previous.abort();
            info!("Replaced timer {id} (every {}s)", cadence.as_secs());
        } else {
            info!("Registered timer {id} (every {}s)", cadence.as_secs());
        }
    }

    fn unregister(&self, id: &str) -> bool {
        match self.jobs.remove(id) {
            Some((_, handle)) => {
                let was_live = !handle.is_finished();
                handle.abort();
                debug!("Unregistered timer {id}");
                was_live
            }
            None => false,
        }
    }

    fn is_registered(&self, id: &str) -> bool {
        self.jobs
            .get(id)
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}
