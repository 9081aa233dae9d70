//! HTTP request handlers for the reconciliation engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{earnings_report, payroll_summary};
use crate::models::{
    EarningsReport, NewBonus, NewObligation, NewVacation, ObligationPatch, ObligationRow,
    PayrollSummary, VacationPatch,
};

use super::principal::Principal;
use super::request::{MonthQuery, PeriodQuery};
use super::response::{Acknowledgement, ApiError, ApiErrorResponse, HealthResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/employees/:id/earnings", get(employee_earnings_handler))
        .route("/payroll/summary", get(payroll_summary_handler))
        .route(
            "/obligations",
            get(list_obligations_handler).post(create_obligation_handler),
        )
        .route("/obligations/regenerate", post(regenerate_obligations_handler))
        .route(
            "/obligations/:id",
            put(update_obligation_handler).delete(delete_obligation_handler),
        )
        .route("/bonuses", post(create_bonus_handler))
        .route("/bonuses/:id", delete(delete_bonus_handler))
        .route("/vacations", post(create_vacation_handler))
        .route(
            "/vacations/:id",
            put(update_vacation_handler).delete(delete_vacation_handler),
        )
        .route(
            "/expense-categories/:id",
            delete(delete_expense_category_handler),
        )
        .route("/frequency-types/:id", delete(delete_frequency_type_handler))
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handler for GET /employees/:id/earnings.
///
/// Returns the employee's earnings for the requested month with the lifetime
/// block nested.
async fn employee_earnings_handler(
    State(state): State<AppState>,
    principal: Principal,
    Path(employee_id): Path<u64>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Json<EarningsReport>> {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        principal = %principal.id,
        employee_id,
        "Processing earnings request"
    );

    let month = query.month_key().map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Invalid month");
        ApiErrorResponse::from(err)
    })?;

    let start_time = Instant::now();
    let today = Utc::now().date_naive();
    match earnings_report(state.store(), employee_id, month, today, state.policy()) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                employee_id,
                month = %month,
                total_earnings = %report.total_earnings,
                duration_us = start_time.elapsed().as_micros(),
                "Earnings computed successfully"
            );
            Ok(Json(report))
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Earnings computation failed"
            );
            Err(ApiErrorResponse::calculation(err))
        }
    }
}

/// Handler for GET /payroll/summary.
async fn payroll_summary_handler(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Json<PayrollSummary>> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        principal = %principal.id,
        "Processing payroll summary request"
    );

    let month = query.month_key().map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Invalid month");
        ApiErrorResponse::from(err)
    })?;

    let start_time = Instant::now();
    match payroll_summary(state.store(), month, state.policy()) {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                month = %month,
                total = %summary.total,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll summary computed successfully"
            );
            Ok(Json(summary))
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Payroll summary failed"
            );
            Err(ApiErrorResponse::calculation(err))
        }
    }
}

/// Handler for GET /obligations.
async fn list_obligations_handler(
    State(state): State<AppState>,
    _principal: Principal,
) -> ApiResult<Json<Vec<ObligationRow>>> {
    Ok(Json(state.obligations().list()?))
}

/// Handler for POST /obligations.
async fn create_obligation_handler(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<NewObligation>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Acknowledgement>)> {
    principal.require_write()?;
    let correlation_id = Uuid::new_v4();
    let new = parse_body(payload, correlation_id)?;

    let row = state.obligations().create(new)?;
    info!(
        correlation_id = %correlation_id,
        principal = %principal.id,
        obligation_id = row.id,
        "Obligation stored"
    );
    Ok((StatusCode::CREATED, Json(Acknowledgement::new(row.id))))
}

/// Handler for PUT /obligations/:id.
async fn update_obligation_handler(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<u64>,
    payload: Result<Json<ObligationPatch>, JsonRejection>,
) -> ApiResult<Json<Acknowledgement>> {
    principal.require_write()?;
    let correlation_id = Uuid::new_v4();
    let patch = parse_body(payload, correlation_id)?;

    state.obligations().update(id, patch)?;
    Ok(Json(Acknowledgement::new(id)))
}

/// Handler for DELETE /obligations/:id.
///
/// The response is the same whether the row was suppressed or removed.
async fn delete_obligation_handler(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<u64>,
) -> ApiResult<Json<Acknowledgement>> {
    principal.require_write()?;
    state.obligations().delete(id)?;
    Ok(Json(Acknowledgement::new(id)))
}

/// Handler for POST /obligations/regenerate.
///
/// Returns the rows created for the period.
async fn regenerate_obligations_handler(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<Vec<ObligationRow>>> {
    principal.require_write()?;
    let period = query.period_key()?;

    let created = state.obligations().regenerate(period)?;
    info!(
        principal = %principal.id,
        period = %period,
        created = created.len(),
        "Regeneration requested"
    );
    Ok(Json(created))
}

/// Handler for POST /bonuses.
async fn create_bonus_handler(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<NewBonus>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Acknowledgement>)> {
    principal.require_write()?;
    let correlation_id = Uuid::new_v4();
    let new = parse_body(payload, correlation_id)?;

    let entry = state.store().insert_bonus(new)?;
    info!(
        correlation_id = %correlation_id,
        principal = %principal.id,
        bonus_id = entry.id,
        employee_id = entry.employee_id,
        amount = %entry.amount,
        "Bonus recorded"
    );
    Ok((StatusCode::CREATED, Json(Acknowledgement::new(entry.id))))
}

/// Handler for DELETE /bonuses/:id.
async fn delete_bonus_handler(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<u64>,
) -> ApiResult<Json<Acknowledgement>> {
    principal.require_write()?;
    state.store().delete_bonus(id)?;
    info!(principal = %principal.id, bonus_id = id, "Bonus deleted");
    Ok(Json(Acknowledgement::new(id)))
}

/// Handler for POST /vacations.
async fn create_vacation_handler(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<NewVacation>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Acknowledgement>)> {
    principal.require_write()?;
    let correlation_id = Uuid::new_v4();
    let new = parse_body(payload, correlation_id)?;

    let entry = state.store().insert_vacation(new)?;
    info!(
        correlation_id = %correlation_id,
        principal = %principal.id,
        vacation_id = entry.id,
        day_count = entry.day_count,
        "Vacation recorded"
    );
    Ok((StatusCode::CREATED, Json(Acknowledgement::new(entry.id))))
}

/// Handler for PUT /vacations/:id.
///
/// The day count changes only when the patch supplies one.
async fn update_vacation_handler(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<u64>,
    payload: Result<Json<VacationPatch>, JsonRejection>,
) -> ApiResult<Json<Acknowledgement>> {
    principal.require_write()?;
    let correlation_id = Uuid::new_v4();
    let patch = parse_body(payload, correlation_id)?;

    state.store().update_vacation(id, patch)?;
    Ok(Json(Acknowledgement::new(id)))
}

/// Handler for DELETE /vacations/:id.
async fn delete_vacation_handler(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<u64>,
) -> ApiResult<Json<Acknowledgement>> {
    principal.require_write()?;
    state.store().delete_vacation(id)?;
    Ok(Json(Acknowledgement::new(id)))
}

/// Handler for DELETE /expense-categories/:id.
async fn delete_expense_category_handler(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<u64>,
) -> ApiResult<Json<Acknowledgement>> {
    principal.require_write()?;
    let detached = state.store().delete_expense_category(id)?;
    info!(principal = %principal.id, category_id = id, detached, "Expense category deleted");
    Ok(Json(Acknowledgement::with_detached(id, detached)))
}

/// Handler for DELETE /frequency-types/:id.
async fn delete_frequency_type_handler(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<u64>,
) -> ApiResult<Json<Acknowledgement>> {
    principal.require_write()?;
    let detached = state.store().delete_frequency_type(id)?;
    info!(principal = %principal.id, frequency_id = id, detached, "Frequency type deleted");
    Ok(Json(Acknowledgement::with_detached(id, detached)))
}

/// Unwraps a JSON body, mapping extractor rejections to 400 responses.
fn parse_body<T: DeserializeOwned>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> ApiResult<T> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
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
    };
    Err(ApiErrorResponse::new(StatusCode::BAD_REQUEST, error))
}
