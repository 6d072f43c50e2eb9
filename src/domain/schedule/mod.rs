//! Schedule domain - cron-driven execution timing

mod cron_schedule;

pub use cron_schedule::CronSchedule;
