//! Time-proportional daily target
//!
//! Linearly interpolates how much of the daily target should have been drunk
//! by a given time of day, between the configured wake and sleep times.

use chrono::NaiveTime;

/// Expected intake at `now`, floored to whole milliliters.
///
/// Time before `wake_time` counts as zero elapsed. Time after `sleep_time` is
/// not clamped, so the result can exceed `daily_target_ml` late in the evening.
/// A window that is empty or inverted yields the full target.
pub fn proportional_target_at(
    now: NaiveTime,
    wake_time: NaiveTime,
    sleep_time: NaiveTime,
    daily_target_ml: i64,
) -> i64 {
    let elapsed = (now - wake_time).num_seconds().max(0);
    let window = (sleep_time - wake_time).num_seconds();

    if window <= 0 {
        return daily_target_ml;
    }

    (elapsed as f64 / window as f64 * daily_target_ml as f64).floor() as i64
}
