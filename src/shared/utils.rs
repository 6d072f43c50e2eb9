//! Utility functions and helpers

use chrono::{DateTime, Local};

/// Clock format for per-cycle operator summaries
pub fn format_cycle_time(time: DateTime<Local>) -> String {
    time.format("%-I:%M:%S %p, %b %d").to_string()
}

/// Clock format for announcing the next scheduled execution
pub fn format_schedule_time(time: DateTime<Local>) -> String {
    time.format("%-I:%M:%S %p, %a %-d %b").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_cycle_time() {
        let time = Local.with_ymd_and_hms(2026, 8, 7, 15, 4, 5).unwrap();
        assert_eq!(format_cycle_time(time), "3:04:05 PM, Aug 07");
    }

    #[test]
    fn test_format_schedule_time() {
        let time = Local.with_ymd_and_hms(2026, 8, 7, 9, 30, 0).unwrap();
        assert_eq!(format_schedule_time(time), "9:30:00 AM, Fri 7 Aug");
    }
}
