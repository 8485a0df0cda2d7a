use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::ScheduleError;
use crate::models::{
    NewScheduleException, NewScheduleTemplate, ScheduleException, ScheduleTemplate,
};

pub mod supabase;

pub use supabase::{SupabaseExceptionStore, SupabaseTemplateStore};

/// Persistence seam for recurring weekly rules. `insert_batch` must be
/// all-or-nothing: a failed weekday insert leaves no rows behind.
#[async_trait]
pub trait ScheduleTemplateStore: Send + Sync {
    async fn insert_batch(
        &self,
        rows: Vec<NewScheduleTemplate>,
    ) -> Result<Vec<ScheduleTemplate>, ScheduleError>;

    /// Every row for a professional, weekday ascending, insertion order
    /// within a weekday. Validity windows are not filtered here.
    async fn list_by_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<ScheduleTemplate>, ScheduleError>;

    /// Rows for one weekday whose validity range covers `date`, newest
    /// first. The single-date lookup takes the head of this list.
    async fn list_for_weekday(
        &self,
        professional_id: Uuid,
        weekday: i32,
        date: NaiveDate,
    ) -> Result<Vec<ScheduleTemplate>, ScheduleError>;
}

/// Persistence seam for per-date overrides.
#[async_trait]
pub trait ExceptionStore: Send + Sync {
    async fn insert(
        &self,
        row: NewScheduleException,
    ) -> Result<ScheduleException, ScheduleError>;

    /// Every row for a professional, oldest first. The stable order is what
    /// makes the resolver's last-write-wins reduction repeatable.
    async fn list_by_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<ScheduleException>, ScheduleError>;

    /// Rows for one exact date, oldest first.
    async fn list_for_date(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<ScheduleException>, ScheduleError>;
}
