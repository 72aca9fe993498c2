//! Environment-driven configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Discord token, log level, daily target, wake/sleep window, day rollover

use anyhow::{Context, Result};
use chrono::NaiveTime;
use std::env;

/// Default daily water target in milliliters
pub const DEFAULT_DAILY_TARGET_ML: i64 = 2000;
/// Default wake time used for the proportional target
pub const DEFAULT_WAKE_TIME: &str = "06:00";
/// Default sleep time used for the proportional target
pub const DEFAULT_SLEEP_TIME: &str = "23:00";

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub log_level: String,
    pub daily_target_ml: i64,
    pub wake_time: NaiveTime,
    pub sleep_time: NaiveTime,
    /// Reset a user's running total when a new calendar day is observed
    pub day_rollover: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let discord_token =
            env::var("DISCORD_TOKEN").context("DISCORD_TOKEN must be set (see .env)")?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let daily_target_ml = match env::var("DAILY_TARGET_ML") {
            Ok(raw) => parse_target(&raw)?,
            Err(_) => DEFAULT_DAILY_TARGET_ML,
        };

        let wake_time = parse_time_of_day(
            &env::var("WAKE_TIME").unwrap_or_else(|_| DEFAULT_WAKE_TIME.to_string()),
        )
        .context("WAKE_TIME")?;
        let sleep_time = parse_time_of_day(
            &env::var("SLEEP_TIME").unwrap_or_else(|_| DEFAULT_SLEEP_TIME.to_string()),
        )
        .context("SLEEP_TIME")?;

        if sleep_time <= wake_time {
            anyhow::bail!("SLEEP_TIME ({sleep_time}) must be later than WAKE_TIME ({wake_time})");
        }

        let day_rollover = match env::var("DAY_ROLLOVER") {
            Ok(raw) => parse_flag(&raw).context("DAY_ROLLOVER")?,
            Err(_) => true,
        };

        Ok(Config {
            discord_token,
            log_level,
            daily_target_ml,
            wake_time,
            sleep_time,
            day_rollover,
        })
    }
}

fn parse_target(raw: &str) -> Result<i64> {
    let target: i64 = raw
        .trim()
        .parse()
        .with_context(|| format!("DAILY_TARGET_ML is not a number: {raw:?}"))?;
    if target <= 0 {
        anyhow::bail!("DAILY_TARGET_ML must be positive, got {target}");
    }
    Ok(target)
}

/// Parse `HH:MM` or `HH:MM:SS`
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .with_context(|| format!("expected HH:MM, got {raw:?}"))
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow::anyhow!("expected true/false, got {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(
            parse_time_of_day("06:00").unwrap(),
            NaiveTime::from_hms_opt(6, 0, 0).unwrap()
        );
        assert_eq!(
            parse_time_of_day(" 23:15:30 ").unwrap(),
            NaiveTime::from_hms_opt(23, 15, 30).unwrap()
        );
        assert!(parse_time_of_day("6am").is_err());
        assert!(parse_time_of_day("25:00").is_err());
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("2500").unwrap(), 2500);
        assert!(parse_target("0").is_err());
        assert!(parse_target("-10").is_err());
        assert!(parse_target("plenty").is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true").unwrap());
        assert!(parse_flag("ON").unwrap());
        assert!(!parse_flag("0").unwrap());
        assert!(!parse_flag("no").unwrap());
        assert!(parse_flag("maybe").is_err());
    }
}
