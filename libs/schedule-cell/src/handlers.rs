use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::error::ScheduleError;
use crate::models::{CreateExceptionRequest, CreateScheduleRequest};
use crate::services::{
    availability::AvailabilityService, day_hours::DayHoursService, exception::ExceptionService,
    schedule::ScheduleService,
};

#[derive(Debug, Deserialize)]
pub struct DayHoursQuery {
    pub fecha: NaiveDate,
}

fn map_schedule_error(e: ScheduleError) -> AppError {
    match e {
        ScheduleError::Storage(_) => AppError::Database(e.to_string()),
        _ => AppError::ValidationError(e.to_string()),
    }
}

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<Json<Value>, AppError> {
    let schedule_service = ScheduleService::new(&state);

    let created = schedule_service
        .create_schedule(request)
        .await
        .map_err(map_schedule_error)?;

    Ok(Json(json!(created)))
}

#[axum::debug_handler]
pub async fn list_schedules(
    State(state): State<Arc<AppConfig>>,
    Path(professional_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let schedule_service = ScheduleService::new(&state);

    let schedules = schedule_service
        .list_by_professional(professional_id)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(json!(schedules)))
}

#[axum::debug_handler]
pub async fn available_dates(
    State(state): State<Arc<AppConfig>>,
    Path(professional_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let availability_service = AvailabilityService::new(&state);

    let days = availability_service
        .resolve_dates(professional_id)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(json!(days)))
}

#[axum::debug_handler]
pub async fn day_hours(
    State(state): State<Arc<AppConfig>>,
    Path(professional_id): Path<Uuid>,
    Query(query): Query<DayHoursQuery>,
) -> Result<Json<Value>, AppError> {
    let day_hours_service = DayHoursService::new(&state);

    let hours = day_hours_service
        .hours_for_date(professional_id, query.fecha)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    // "no schedule" renders as null hours, not as an error
    Ok(Json(json!({
        "professionalId": professional_id,
        "date": query.fecha,
        "hours": hours
    })))
}

#[axum::debug_handler]
pub async fn create_exception(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateExceptionRequest>,
) -> Result<Json<Value>, AppError> {
    let exception_service = ExceptionService::new(&state);

    let created = exception_service
        .create_exception(request)
        .await
        .map_err(map_schedule_error)?;

    Ok(Json(json!(created)))
}

#[axum::debug_handler]
pub async fn list_exceptions(
    State(state): State<Arc<AppConfig>>,
    Path(professional_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let exception_service = ExceptionService::new(&state);

    let exceptions = exception_service
        .list_by_professional(professional_id)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(json!(exceptions)))
}
