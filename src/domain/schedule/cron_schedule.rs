//! Cron schedule - computes execution instants from a 5-field cron expression

use chrono::{DateTime, Local};
use croner::Cron;
use tracing::warn;

use crate::shared::errors::ConfigError;

/// Parsed cron expression plus the next instant it fires.
///
/// The polling loop does not block for the full cron period; it wakes on a
/// short interval and asks `is_time_for_execution`, so drift is bounded by
/// the poll interval.
pub struct CronSchedule {
    cron: Cron,
    next_execution: DateTime<Local>,
}

impl CronSchedule {
    /// Parse a standard 5-field cron expression. Malformed expressions fail
    /// here, never at runtime.
    pub fn new(expr: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidCron {
            expr: expr.to_string(),
            reason,
        };
        let cron = Cron::new(expr).parse().map_err(|e| invalid(e.to_string()))?;
        let next_execution = cron
            .find_next_occurrence(&Local::now(), false)
            .map_err(|e| invalid(e.to_string()))?;
        Ok(Self { cron, next_execution })
    }

    pub fn next_execution_time(&self) -> DateTime<Local> {
        self.next_execution
    }

    /// True exactly once per cron boundary crossing; the next target is
    /// recomputed internally so repeated calls return false until the
    /// following tick.
    pub fn is_time_for_execution(&mut self) -> bool {
        self.is_due_at(Local::now())
    }

    fn is_due_at(&mut self, now: DateTime<Local>) -> bool {
        if now < self.next_execution {
            return false;
        }
        match self.cron.find_next_occurrence(&now, false) {
            Ok(next) => self.next_execution = next,
            Err(err) => warn!(error = %err, "failed to advance cron schedule"),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_malformed_expression_fails_fast() {
        assert!(CronSchedule::new("not a cron").is_err());
        assert!(CronSchedule::new("61 * * * *").is_err());
        assert!(CronSchedule::new("").is_err());
    }

    #[test]
    fn test_valid_expression_parses() {
        let schedule = CronSchedule::new("*/5 * * * *").unwrap();
        assert!(schedule.next_execution_time() > Local::now() - Duration::seconds(1));
    }

    #[test]
    fn test_due_exactly_once_per_crossing() {
        let mut schedule = CronSchedule::new("0 * * * *").unwrap();
        let boundary = Local.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap();
        schedule.next_execution = boundary;

        assert!(!schedule.is_due_at(boundary - Duration::seconds(1)));
        assert!(schedule.is_due_at(boundary));
        // target advanced to the next hour boundary
        assert_eq!(
            schedule.next_execution_time(),
            Local.with_ymd_and_hms(2026, 1, 5, 11, 0, 0).unwrap()
        );
        // polls before the next boundary stay quiet
        assert!(!schedule.is_due_at(boundary + Duration::seconds(30)));
        assert!(!schedule.is_due_at(boundary + Duration::minutes(59)));
        assert!(schedule.is_due_at(boundary + Duration::hours(1)));
    }

    #[test]
    fn test_late_wake_still_fires_once() {
        let mut schedule = CronSchedule::new("0 * * * *").unwrap();
        let boundary = Local.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap();
        schedule.next_execution = boundary;

        // woke 40 minutes late: one fire, next target past the wake time
        let late = boundary + Duration::minutes(40);
        assert!(schedule.is_due_at(late));
        assert!(schedule.next_execution_time() > late);
        assert!(!schedule.is_due_at(late + Duration::seconds(5)));
    }
}
