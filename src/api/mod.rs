//! HTTP API for the timekeeping engine.
//!
//! The API is stateless: each request carries a snapshot of one employee's
//! records and receives an account, a shift assessment or an audit report.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AbsenceRequest, HolidayRequest, MonthRequest, RestPeriodRequest, ShiftCheckRequest,
    ShiftRequest, Snapshot, WeeklyHoursChangeRequest, YearRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
