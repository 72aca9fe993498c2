//! Fakes shared by command tests

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::commands::context::CommandContext;
use crate::features::hydration::HydrationTracker;
use crate::features::reminders::{
    Notifier, ReminderCallback, ReminderFirer, ReminderScheduler, TimerSubstrate,
};

#[derive(Default)]
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn send(&self, _user_id: &str, _text: &str) -> Result<()> {
        Ok(())
    }
}

/// Records job ids and cadences instead of spawning tasks
#[derive(Default)]
pub struct FakeTimer {
    pub jobs: Mutex<HashMap<String, Duration>>,
}

impl TimerSubstrate for FakeTimer {
    fn register(
        &self,
        id: &str,
        cadence: Duration,
        _callback: Arc<dyn ReminderCallback>,
        _user_id: &str,
    ) {
        self.jobs.lock().unwrap().insert(id.to_string(), cadence);
    }

    fn unregister(&self, id: &str) -> bool {
        self.jobs.lock().unwrap().remove(id).is_some()
    }

    fn is_registered(&self, id: &str) -> bool {
        self.jobs.lock().unwrap().contains_key(id)
    }
}

pub fn test_context() -> (Arc<CommandContext>, Arc<FakeTimer>) {
    let tracker = HydrationTracker::default();
    let timer = Arc::new(FakeTimer::default());
    let firer = Arc::new(ReminderFirer::new(
        tracker.clone(),
        Arc::new(NullNotifier),
        chrono::NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
        chrono::NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
    ));
    let scheduler = Arc::new(ReminderScheduler::new(timer.clone(), firer));
    (Arc::new(CommandContext::new(tracker, scheduler)), timer)
}
