//! HTTP request handlers for the timekeeping API.
//!
//! Each handler parses a request snapshot, loads it into an in-memory
//! store and runs one accounting or compliance operation against it.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::accounting::{monthly_summary, overtime_history, vacation_account};
use crate::clock::{Clock, FixedClock, SystemClock};
use crate::compliance::{assess_shift, compensatory_rest_report, rest_period_violations};
use crate::config::RulesConfig;
use crate::error::EngineResult;
use crate::models::{
    CompensatoryRestReport, EmployeeRestViolations, MonthlySummary, OvertimeAccount,
    ShiftAssessment, VacationAccount, YearMonth,
};

use super::request::{MonthRequest, RestPeriodRequest, ShiftCheckRequest, YearRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/accounts/monthly", post(monthly_account_handler))
        .route("/accounts/overtime", post(overtime_account_handler))
        .route("/accounts/vacation", post(vacation_account_handler))
        .route("/shifts/check", post(shift_check_handler))
        .route("/reports/rest-periods", post(rest_period_handler))
        .route("/reports/compensatory-rest", post(compensatory_rest_handler))
        .with_state(state)
}

/// Handler for POST /accounts/monthly.
async fn monthly_account_handler(payload: Result<Json<MonthRequest>, JsonRejection>) -> Response {
    handle("accounts/monthly", payload, monthly_account)
}

/// Handler for POST /accounts/overtime.
async fn overtime_account_handler(
    payload: Result<Json<MonthRequest>, JsonRejection>,
) -> Response {
    handle("accounts/overtime", payload, overtime_account)
}

/// Handler for POST /accounts/vacation.
async fn vacation_account_handler(payload: Result<Json<YearRequest>, JsonRejection>) -> Response {
    handle("accounts/vacation", payload, vacation)
}

/// Handler for POST /shifts/check.
///
/// Returns the assessment with 200, or the rejection code with 422.
async fn shift_check_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftCheckRequest>, JsonRejection>,
) -> Response {
    handle("shifts/check", payload, |req| check_shift(state.rules(), req))
}

/// Handler for POST /reports/rest-periods.
async fn rest_period_handler(
    State(state): State<AppState>,
    payload: Result<Json<RestPeriodRequest>, JsonRejection>,
) -> Response {
    handle("reports/rest-periods", payload, |req| {
        rest_periods(state.rules(), req)
    })
}

/// Handler for POST /reports/compensatory-rest.
async fn compensatory_rest_handler(
    State(state): State<AppState>,
    payload: Result<Json<YearRequest>, JsonRejection>,
) -> Response {
    handle("reports/compensatory-rest", payload, |req| {
        compensatory_rest(state.rules(), req)
    })
}

/// Parses the body, runs `operation` and renders the outcome as JSON.
fn handle<T, R, F>(
    endpoint: &'static str,
    payload: Result<Json<T>, JsonRejection>,
    operation: F,
) -> Response
where
    R: Serialize,
    F: FnOnce(T) -> EngineResult<R>,
{
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, endpoint, "Processing request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_error(correlation_id, rejection);
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let start_time = Instant::now();
    match operation(request) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                endpoint,
                duration_us = start_time.elapsed().as_micros(),
                "Request completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                endpoint,
                error = %err,
                "Request failed"
            );
            let api_error: ApiErrorResponse = err.into();
            json_response(api_error.status, api_error.error)
        }
    }
}

fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's field-level message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn clock_for(today: Option<NaiveDate>) -> Box<dyn Clock> {
    match today {
        Some(date) => Box::new(FixedClock::on(date)),
        None => Box::new(SystemClock),
    }
}

fn monthly_account(req: MonthRequest) -> EngineResult<MonthlySummary> {
    let period = YearMonth::new(req.year, req.month)?;
    let (employee, store) = req.snapshot.into_store()?;
    monthly_summary(&store, &employee, period)
}

fn overtime_account(req: MonthRequest) -> EngineResult<OvertimeAccount> {
    let up_to = YearMonth::new(req.year, req.month)?;
    let (employee, store) = req.snapshot.into_store()?;
    overtime_history(&store, &employee, up_to)
}

fn vacation(req: YearRequest) -> EngineResult<VacationAccount> {
    let clock = clock_for(req.snapshot.today);
    let (employee, store) = req.snapshot.into_store()?;
    vacation_account(&store, &employee, req.year, clock.as_ref())
}

fn check_shift(rules: &RulesConfig, req: ShiftCheckRequest) -> EngineResult<ShiftAssessment> {
    let (employee, store) = req.snapshot.into_store()?;
    let id = req
        .shift_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let candidate = req.shift.into_shift(id, employee.id.clone());
    assess_shift(&store, rules, &employee, &candidate, req.shift_id.as_deref())
}

fn rest_periods(
    rules: &RulesConfig,
    req: RestPeriodRequest,
) -> EngineResult<EmployeeRestViolations> {
    let (employee, store) = req.snapshot.into_store()?;
    let violations = rest_period_violations(
        &store,
        rules,
        &employee,
        req.year,
        req.month,
        req.min_rest_hours,
    )?;
    Ok(EmployeeRestViolations {
        employee_id: employee.id,
        violation_count: violations.len(),
        violations,
    })
}

fn compensatory_rest(
    rules: &RulesConfig,
    req: YearRequest,
) -> EngineResult<CompensatoryRestReport> {
    let (employee, store) = req.snapshot.into_store()?;
    compensatory_rest_report(&store, rules, &employee, req.year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use rust_decimal::Decimal;
    use serde_json::{Value, json};
    use std::str::FromStr;
    use tower::ServiceExt;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_state() -> AppState {
        AppState::from_rules(RulesConfig::default())
    }

    fn employee() -> Value {
        json!({ "id": "emp_001", "weekly_hours": "40", "vacation_days": 30 })
    }

    async fn post(uri: &str, body: String) -> (StatusCode, Value) {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_monthly_account_returns_summary() {
        let body = json!({
            "snapshot": {
                "employee": employee(),
                "shifts": [{
                    "id": "shift_001",
                    "date": "2026-02-02",
                    "start_time": "08:00:00",
                    "end_time": "16:30:00",
                    "break_minutes": 30
                }]
            },
            "year": 2026,
            "month": 2
        });

        let (status, result) = post("/accounts/monthly", body.to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let summary: MonthlySummary = serde_json::from_value(result).unwrap();
        assert_eq!(summary.target_hours, dec("160"));
        assert_eq!(summary.actual_hours, dec("8"));
        assert_eq!(summary.balance, dec("-152"));
    }

    #[tokio::test]
    async fn test_invalid_month_returns_400() {
        let body = json!({ "snapshot": { "employee": employee() }, "year": 2026, "month": 13 });

        let (status, result) = post("/accounts/overtime", body.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(result["code"], "INVALID_PERIOD");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let (status, result) = post("/accounts/monthly", "{invalid json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(result["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_employee_returns_validation_error() {
        let body = json!({ "snapshot": {}, "year": 2026 });

        let (status, result) = post("/accounts/vacation", body.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(result["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_vacation_account_uses_snapshot_today() {
        let body = json!({
            "snapshot": {
                "employee": employee(),
                "absences": [{ "date": "2026-03-02", "type": "vacation", "hours": "8" }],
                "weekly_hours_changes": [{ "effective_from": "2026-06-01", "weekly_hours": "20" }],
                "today": "2026-03-15"
            },
            "year": 2026
        });

        let (status, result) = post("/accounts/vacation", body.to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let account: VacationAccount = serde_json::from_value(result).unwrap();
        // Priced at 40h/week because the change is not yet in force
        assert_eq!(account.budget_hours, dec("240"));
        assert_eq!(account.used_hours, dec("8"));
        assert_eq!(account.remaining_hours, dec("232"));
    }

    #[tokio::test]
    async fn test_shift_check_rejects_short_break_with_422() {
        let body = json!({
            "snapshot": { "employee": employee() },
            "shift": {
                "date": "2026-03-02",
                "start_time": "08:00:00",
                "end_time": "15:00:00",
                "break_minutes": 15
            }
        });

        let (status, result) = post("/shifts/check", body.to_string()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(result["code"], "BREAK_TOO_SHORT");
    }

    #[tokio::test]
    async fn test_shift_check_returns_assessment() {
        let body = json!({
            "snapshot": { "employee": employee() },
            "shift": {
                "date": "2026-03-01",
                "start_time": "08:00:00",
                "end_time": "17:30:00",
                "break_minutes": 30
            }
        });

        let (status, result) = post("/shifts/check", body.to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let assessment: ShiftAssessment = serde_json::from_value(result).unwrap();
        assert_eq!(assessment.daily_hours, Some(dec("9")));
        assert!(assessment.has_warning(crate::models::WarningCode::DailyHoursWarning));
        assert!(assessment.has_warning(crate::models::WarningCode::SundayWork));
    }

    #[tokio::test]
    async fn test_rest_period_report() {
        let body = json!({
            "snapshot": {
                "employee": employee(),
                "shifts": [
                    {
                        "id": "a",
                        "date": "2026-03-02",
                        "start_time": "12:00:00",
                        "end_time": "20:00:00",
                        "break_minutes": 30
                    },
                    {
                        "id": "b",
                        "date": "2026-03-03",
                        "start_time": "06:00:00",
                        "end_time": "12:00:00"
                    }
                ]
            },
            "year": 2026,
            "month": 3
        });

        let (status, result) = post("/reports/rest-periods", body.to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let report: EmployeeRestViolations = serde_json::from_value(result).unwrap();
        assert_eq!(report.violation_count, 1);
        assert_eq!(report.violations[0].deficit_hours, dec("1"));
    }

    #[tokio::test]
    async fn test_compensatory_rest_report() {
        let body = json!({
            "snapshot": {
                "employee": employee(),
                "shifts": [
                    {
                        "id": "sun",
                        "date": "2026-03-01",
                        "start_time": "08:00:00",
                        "end_time": "12:00:00"
                    }
                ]
            },
            "year": 2026
        });

        let (status, result) = post("/reports/compensatory-rest", body.to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let report: CompensatoryRestReport = serde_json::from_value(result).unwrap();
        assert_eq!(report.checked_days, 1);
        assert!(report.compliant);
    }
}
