use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;

use crate::error::ScheduleError;
use crate::models::{DayHours, ExceptionStatus};
use crate::services::availability::weekday_number;
use crate::store::{
    ExceptionStore, ScheduleTemplateStore, SupabaseExceptionStore, SupabaseTemplateStore,
};

/// Answers "what is the bookable window for professional P on date D?"
/// without scanning a whole validity range. Used on the notification path,
/// where a single booking date needs its hours rendered.
pub struct DayHoursService {
    templates: Arc<dyn ScheduleTemplateStore>,
    exceptions: Arc<dyn ExceptionStore>,
}

impl DayHoursService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_stores(
            Arc::new(SupabaseTemplateStore::new(config)),
            Arc::new(SupabaseExceptionStore::new(config)),
        )
    }

    pub fn with_stores(
        templates: Arc<dyn ScheduleTemplateStore>,
        exceptions: Arc<dyn ExceptionStore>,
    ) -> Self {
        Self {
            templates,
            exceptions,
        }
    }

    /// `None` means "no schedule" and is a normal outcome, not an error;
    /// callers render a placeholder. Applies the same precedence as the
    /// calendar merge at single-date granularity: newest manual entry
    /// first, then cancellation, then the matching template rule.
    pub async fn hours_for_date(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<DayHours>, ScheduleError> {
        let exceptions = self
            .exceptions
            .list_for_date(professional_id, date)
            .await?;

        let manual = exceptions
            .iter()
            .rev()
            .filter(|e| e.status == ExceptionStatus::Manual)
            .find_map(|e| match (e.start_time, e.end_time) {
                (Some(start_time), Some(end_time)) => Some(DayHours {
                    start_time,
                    end_time,
                }),
                _ => None,
            });
        if let Some(hours) = manual {
            return Ok(Some(hours));
        }

        if exceptions
            .iter()
            .any(|e| e.status == ExceptionStatus::Cancelled)
        {
            debug!(
                "professional {} has a cancellation on {}, no hours",
                professional_id, date
            );
            return Ok(None);
        }

        let templates = self
            .templates
            .list_for_weekday(professional_id, weekday_number(date), date)
            .await?;

        Ok(templates.first().map(|t| DayHours {
            start_time: t.start_time,
            end_time: t.end_time,
        }))
    }
}
