use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate};
use tracing::{debug, warn};
use uuid::Uuid;

use shared_config::AppConfig;

use crate::error::ScheduleError;
use crate::models::{AvailableDay, ExceptionStatus, ResolvedDay, ScheduleTemplate};
use crate::store::{
    ExceptionStore, ScheduleTemplateStore, SupabaseExceptionStore, SupabaseTemplateStore,
};

/// ISO weekday number, 1 = Monday .. 7 = Sunday.
pub(crate) fn weekday_number(date: NaiveDate) -> i32 {
    date.weekday().number_from_monday() as i32
}

/// Merges recurring templates and per-date exceptions into the canonical
/// calendar of bookable dates for a professional.
pub struct AvailabilityService {
    templates: Arc<dyn ScheduleTemplateStore>,
    exceptions: Arc<dyn ExceptionStore>,
    max_span_days: i64,
}

impl AvailabilityService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_stores(
            Arc::new(SupabaseTemplateStore::new(config)),
            Arc::new(SupabaseExceptionStore::new(config)),
            config.max_span_days,
        )
    }

    pub fn with_stores(
        templates: Arc<dyn ScheduleTemplateStore>,
        exceptions: Arc<dyn ExceptionStore>,
        max_span_days: i64,
    ) -> Self {
        Self {
            templates,
            exceptions,
            max_span_days,
        }
    }

    /// Every date the professional can be booked on, ascending, with the
    /// window that applies. Precedence: cancellations remove template
    /// occurrences; manual entries overwrite whatever else claims the date.
    /// No data is a valid outcome and yields an empty list.
    pub async fn resolve_dates(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<AvailableDay>, ScheduleError> {
        let templates = self.templates.list_by_professional(professional_id).await?;
        let exceptions = self.exceptions.list_by_professional(professional_id).await?;

        debug!(
            "Resolving availability for {}: {} templates, {} exceptions",
            professional_id,
            templates.len(),
            exceptions.len()
        );

        let mut days: BTreeMap<NaiveDate, ResolvedDay> = BTreeMap::new();

        for exception in exceptions
            .iter()
            .filter(|e| e.status == ExceptionStatus::Cancelled)
        {
            days.insert(exception.date, ResolvedDay::Cancelled);
        }

        for template in &templates {
            self.walk_template(template, &mut days);
        }

        // Exceptions arrive oldest first, so the newest manual entry for a
        // date is the one that sticks. A manual entry also revives a
        // cancelled date: cancellations only suppress template occurrences.
        for exception in exceptions
            .iter()
            .filter(|e| e.status == ExceptionStatus::Manual)
        {
            let (start_time, end_time) = match (exception.start_time, exception.end_time) {
                (Some(start), Some(end)) => (start, end),
                _ => {
                    warn!(
                        "manual exception {} has no time window, skipping",
                        exception.id
                    );
                    continue;
                }
            };

            days.insert(
                exception.date,
                ResolvedDay::Manual {
                    start_time,
                    end_time,
                    consultation_number: exception.consultation_number,
                },
            );
        }

        Ok(days
            .into_iter()
            .filter_map(|(date, day)| day.into_available(date))
            .collect())
    }

    /// Day-by-day walk of one template's validity range. An inverted range
    /// contributes nothing; a range beyond the configured cap is truncated.
    fn walk_template(
        &self,
        template: &ScheduleTemplate,
        days: &mut BTreeMap<NaiveDate, ResolvedDay>,
    ) {
        let mut horizon = template.valid_until;
        let capped = template.valid_from + Duration::days(self.max_span_days);
        if horizon > capped {
            warn!(
                "template {} spans more than {} days, truncating walk at {}",
                template.id, self.max_span_days, capped
            );
            horizon = capped;
        }

        let mut date = template.valid_from;
        while date <= horizon {
            if weekday_number(date) == template.weekday
                && !matches!(days.get(&date), Some(ResolvedDay::Cancelled))
            {
                days.insert(
                    date,
                    ResolvedDay::Template {
                        start_time: template.start_time,
                        end_time: template.end_time,
                        attention_type_id: template.attention_type_id,
                        consultation_number: template.consultation_number,
                    },
                );
            }
            date += Duration::days(1);
        }
    }
}
