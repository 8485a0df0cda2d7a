use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn schedule_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        // Recurring weekly schedule templates
        .route("/horarios", post(handlers::create_schedule))
        .route(
            "/horarios/profesional/{professional_id}",
            get(handlers::list_schedules),
        )
        // Resolved calendar and single-date lookup
        .route(
            "/horarios/fechas/{professional_id}",
            get(handlers::available_dates),
        )
        .route("/horarios/dia/{professional_id}", get(handlers::day_hours))
        // Per-date overrides
        .route("/excepciones", post(handlers::create_exception))
        .route(
            "/excepciones/profesional/{professional_id}",
            get(handlers::list_exceptions),
        )
        .with_state(state)
}
