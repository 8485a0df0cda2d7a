use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;

use crate::error::ScheduleError;
use crate::models::{
    CreateExceptionRequest, ExceptionStatus, NewScheduleException, ScheduleException,
};
use crate::store::{ExceptionStore, SupabaseExceptionStore};

pub struct ExceptionService {
    exceptions: Arc<dyn ExceptionStore>,
}

impl ExceptionService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_store(Arc::new(SupabaseExceptionStore::new(config)))
    }

    pub fn with_store(exceptions: Arc<dyn ExceptionStore>) -> Self {
        Self { exceptions }
    }

    pub async fn create_exception(
        &self,
        request: CreateExceptionRequest,
    ) -> Result<ScheduleException, ScheduleError> {
        debug!(
            "Creating {:?} exception for professional {} on {}",
            request.status, request.professional_id, request.date
        );

        // Cancellations carry no window; manual entries must carry a valid one.
        let (start_time, end_time) = match request.status {
            ExceptionStatus::Cancelled => (None, None),
            ExceptionStatus::Manual => {
                let (start, end) = match (request.start_time, request.end_time) {
                    (Some(start), Some(end)) => (start, end),
                    _ => return Err(ScheduleError::MissingWindow),
                };
                if start >= end {
                    return Err(ScheduleError::InvalidRange { start, end });
                }
                (Some(start), Some(end))
            }
        };

        let row = NewScheduleException {
            professional_id: request.professional_id,
            date: request.date,
            status: request.status,
            start_time,
            end_time,
            reason: request.reason,
            consultation_number: request.consultation_number,
            created_at: Utc::now(),
        };

        self.exceptions.insert(row).await
    }

    pub async fn list_by_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<ScheduleException>, ScheduleError> {
        self.exceptions.list_by_professional(professional_id).await
    }
}
