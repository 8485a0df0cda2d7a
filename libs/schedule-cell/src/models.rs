use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Attention type carried by resolved entries that come from a manual
/// exception. The admin flow never assigns one to manually added days, so
/// the nil id stands in.
pub const MANUAL_ATTENTION_TYPE_ID: Uuid = Uuid::nil();

/// Recurring weekly availability rule, one row per professional × weekday.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTemplate {
    pub id: Uuid,
    pub professional_id: Uuid,
    /// 1 = Monday .. 7 = Sunday.
    pub weekday: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Inclusive range the rule generates occurrences for. The row itself
    /// never expires.
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    pub attention_type_id: Uuid,
    pub consultation_number: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExceptionStatus {
    Cancelled,
    Manual,
}

/// Per-date override: either removes a recurring occurrence or adds a day
/// with its own time window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleException {
    pub id: Uuid,
    pub professional_id: Uuid,
    pub date: NaiveDate,
    pub status: ExceptionStatus,
    /// Present only when `status` is `manual`.
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub reason: String,
    pub consultation_number: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for one template row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScheduleTemplate {
    pub professional_id: Uuid,
    pub weekday: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    pub attention_type_id: Uuid,
    pub consultation_number: i32,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for one exception row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScheduleException {
    pub professional_id: Uuid,
    pub date: NaiveDate,
    pub status: ExceptionStatus,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub reason: String,
    pub consultation_number: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// One admin action creates one row per selected weekday; all rows share
/// the window and validity range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub professional_id: Uuid,
    pub weekdays: Vec<i32>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    pub attention_type_id: Uuid,
    pub consultation_number: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExceptionRequest {
    pub professional_id: Uuid,
    pub date: NaiveDate,
    pub status: ExceptionStatus,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub reason: String,
    pub consultation_number: Option<i32>,
}

/// One bookable date with its effective time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableDay {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub attention_type_id: Uuid,
    pub consultation_number: Option<i32>,
}

/// Effective window for a single date, as rendered into booking
/// confirmations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayHours {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Merge state for one calendar date. The reduction inserts `Cancelled`
/// first, then template occurrences (which never displace a cancellation),
/// then manual entries (which displace anything).
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedDay {
    Template {
        start_time: NaiveTime,
        end_time: NaiveTime,
        attention_type_id: Uuid,
        consultation_number: i32,
    },
    Manual {
        start_time: NaiveTime,
        end_time: NaiveTime,
        consultation_number: Option<i32>,
    },
    Cancelled,
}

impl ResolvedDay {
    pub fn into_available(self, date: NaiveDate) -> Option<AvailableDay> {
        match self {
            ResolvedDay::Template {
                start_time,
                end_time,
                attention_type_id,
                consultation_number,
            } => Some(AvailableDay {
                date,
                start_time,
                end_time,
                attention_type_id,
                consultation_number: Some(consultation_number),
            }),
            ResolvedDay::Manual {
                start_time,
                end_time,
                consultation_number,
            } => Some(AvailableDay {
                date,
                start_time,
                end_time,
                attention_type_id: MANUAL_ATTENTION_TYPE_ID,
                consultation_number,
            }),
            ResolvedDay::Cancelled => None,
        }
    }
}
