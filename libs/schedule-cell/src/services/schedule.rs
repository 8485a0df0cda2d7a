use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;

use crate::error::ScheduleError;
use crate::models::{CreateScheduleRequest, NewScheduleTemplate, ScheduleTemplate};
use crate::store::{ScheduleTemplateStore, SupabaseTemplateStore};

pub struct ScheduleService {
    templates: Arc<dyn ScheduleTemplateStore>,
    max_span_days: i64,
}

impl ScheduleService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_store(
            Arc::new(SupabaseTemplateStore::new(config)),
            config.max_span_days,
        )
    }

    pub fn with_store(templates: Arc<dyn ScheduleTemplateStore>, max_span_days: i64) -> Self {
        Self {
            templates,
            max_span_days,
        }
    }

    /// Materialize one template row per selected weekday, all sharing the
    /// same window and validity range. Validation happens before any write;
    /// the store commits the rows atomically or not at all.
    pub async fn create_schedule(
        &self,
        request: CreateScheduleRequest,
    ) -> Result<Vec<ScheduleTemplate>, ScheduleError> {
        debug!(
            "Creating schedule templates for professional {}",
            request.professional_id
        );

        if request.start_time >= request.end_time {
            return Err(ScheduleError::InvalidRange {
                start: request.start_time,
                end: request.end_time,
            });
        }

        let days = (request.valid_until - request.valid_from).num_days();
        if days > self.max_span_days {
            return Err(ScheduleError::SpanTooLarge {
                days,
                max_days: self.max_span_days,
            });
        }

        let mut weekdays = request.weekdays.clone();
        weekdays.sort_unstable();
        weekdays.dedup();

        if weekdays.is_empty() {
            return Err(ScheduleError::EmptyWeekdays);
        }
        if let Some(&bad) = weekdays.iter().find(|&&day| !(1..=7).contains(&day)) {
            return Err(ScheduleError::InvalidWeekday(bad));
        }

        let created_at = Utc::now();
        let rows: Vec<NewScheduleTemplate> = weekdays
            .into_iter()
            .map(|weekday| NewScheduleTemplate {
                professional_id: request.professional_id,
                weekday,
                start_time: request.start_time,
                end_time: request.end_time,
                valid_from: request.valid_from,
                valid_until: request.valid_until,
                attention_type_id: request.attention_type_id,
                consultation_number: request.consultation_number,
                created_at,
            })
            .collect();

        let created = self.templates.insert_batch(rows).await?;
        debug!("Created {} schedule template rows", created.len());

        Ok(created)
    }

    pub async fn list_by_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<ScheduleTemplate>, ScheduleError> {
        self.templates.list_by_professional(professional_id).await
    }
}
