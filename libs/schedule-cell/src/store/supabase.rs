use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::error::ScheduleError;
use crate::models::{
    NewScheduleException, NewScheduleTemplate, ScheduleException, ScheduleTemplate,
};
use crate::store::{ExceptionStore, ScheduleTemplateStore};

fn representation_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Prefer", HeaderValue::from_static("return=representation"));
    headers
}

pub struct SupabaseTemplateStore {
    supabase: SupabaseClient,
}

impl SupabaseTemplateStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }
}

#[async_trait]
impl ScheduleTemplateStore for SupabaseTemplateStore {
    async fn insert_batch(
        &self,
        rows: Vec<NewScheduleTemplate>,
    ) -> Result<Vec<ScheduleTemplate>, ScheduleError> {
        debug!("Inserting {} schedule template rows", rows.len());

        let body = serde_json::to_value(&rows)
            .map_err(|e| ScheduleError::Storage(e.to_string()))?;

        // PostgREST runs an array insert as one statement, so a failing
        // weekday rolls back the whole batch.
        let created: Vec<ScheduleTemplate> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/schedule_templates",
                Some(body),
                Some(representation_headers()),
            )
            .await
            .map_err(|e| ScheduleError::Storage(e.to_string()))?;

        if created.is_empty() {
            return Err(ScheduleError::Storage(
                "insert returned no rows".to_string(),
            ));
        }

        Ok(created)
    }

    async fn list_by_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<ScheduleTemplate>, ScheduleError> {
        let path = format!(
            "/rest/v1/schedule_templates?professionalId=eq.{}&order=weekday.asc,createdAt.asc",
            professional_id
        );

        self.supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| ScheduleError::Storage(e.to_string()))
    }

    async fn list_for_weekday(
        &self,
        professional_id: Uuid,
        weekday: i32,
        date: NaiveDate,
    ) -> Result<Vec<ScheduleTemplate>, ScheduleError> {
        // Newest rule first: the calendar merge lets later rows overwrite
        // earlier ones, so the head of this list is the same winner.
        let path = format!(
            "/rest/v1/schedule_templates?professionalId=eq.{}&weekday=eq.{}&validFrom=lte.{}&validUntil=gte.{}&order=createdAt.desc",
            professional_id, weekday, date, date
        );

        self.supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| ScheduleError::Storage(e.to_string()))
    }
}

pub struct SupabaseExceptionStore {
    supabase: SupabaseClient,
}

impl SupabaseExceptionStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }
}

#[async_trait]
impl ExceptionStore for SupabaseExceptionStore {
    async fn insert(
        &self,
        row: NewScheduleException,
    ) -> Result<ScheduleException, ScheduleError> {
        debug!(
            "Inserting {:?} exception for professional {} on {}",
            row.status, row.professional_id, row.date
        );

        let body = serde_json::to_value(&row)
            .map_err(|e| ScheduleError::Storage(e.to_string()))?;

        let created: Vec<ScheduleException> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/schedule_exceptions",
                Some(body),
                Some(representation_headers()),
            )
            .await
            .map_err(|e| ScheduleError::Storage(e.to_string()))?;

        created
            .into_iter()
            .next()
            .ok_or_else(|| ScheduleError::Storage("insert returned no rows".to_string()))
    }

    async fn list_by_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<ScheduleException>, ScheduleError> {
        let path = format!(
            "/rest/v1/schedule_exceptions?professionalId=eq.{}&order=createdAt.asc",
            professional_id
        );

        self.supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| ScheduleError::Storage(e.to_string()))
    }

    async fn list_for_date(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<ScheduleException>, ScheduleError> {
        let path = format!(
            "/rest/v1/schedule_exceptions?professionalId=eq.{}&date=eq.{}&order=createdAt.asc",
            professional_id, date
        );

        self.supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| ScheduleError::Storage(e.to_string()))
    }
}
