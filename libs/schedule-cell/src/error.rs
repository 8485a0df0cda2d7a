use chrono::NaiveTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("start time {start} must be before end time {end}")]
    InvalidRange { start: NaiveTime, end: NaiveTime },

    #[error("weekday {0} is out of range (1 = Monday .. 7 = Sunday)")]
    InvalidWeekday(i32),

    #[error("at least one weekday is required")]
    EmptyWeekdays,

    #[error("validity range spans {days} days, exceeding the {max_days}-day limit")]
    SpanTooLarge { days: i64, max_days: i64 },

    #[error("manual exceptions require both start and end times")]
    MissingWindow,

    #[error("storage error: {0}")]
    Storage(String),
}
