pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod store;

// Re-export the core types for external use
pub use error::ScheduleError;
pub use models::{
    AvailableDay, CreateExceptionRequest, CreateScheduleRequest, DayHours, ExceptionStatus,
    ResolvedDay, ScheduleException, ScheduleTemplate,
};
pub use services::{AvailabilityService, DayHoursService, ExceptionService, ScheduleService};
