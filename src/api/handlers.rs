//! HTTP request handlers for the preview service.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_totals_detailed;
use crate::form::PayslipForm;

use super::request::{PayslipDraftRequest, TotalsRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payslips/totals", post(totals_handler))
        .route("/payslips/validate", post(validate_handler))
        .with_state(state)
}

/// Handler for POST /payslips/totals.
///
/// Returns the totals of the submitted draft lines and the indexes of lines
/// left out for a missing or malformed amount.
async fn totals_handler(
    State(state): State<AppState>,
    payload: Result<Json<TotalsRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing totals request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };
    if let Err(err) = check_line_count(&state, request.details.len(), correlation_id) {
        return err.into_response();
    }

    let start_time = Instant::now();
    let result = calculate_totals_detailed(&request.details);
    info!(
        correlation_id = %correlation_id,
        lines = request.details.len(),
        skipped = result.skipped_lines.len(),
        net_pay = %result.totals.net_pay,
        duration_us = start_time.elapsed().as_micros(),
        "Totals calculated"
    );
    json_response(StatusCode::OK, &result)
}

/// Handler for POST /payslips/validate.
///
/// Runs the same checks as payslip creation and returns the body that would
/// be posted to the REST API.
async fn validate_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayslipDraftRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip validation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };
    if let Err(err) = check_line_count(&state, request.details.len(), correlation_id) {
        return err.into_response();
    }

    let form = PayslipForm::from(request);
    match form.build_create_request() {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = body.employee_id,
                lines = body.details.len(),
                net_pay = %body.net_pay,
                "Payslip draft is valid"
            );
            json_response(StatusCode::OK, &body)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Payslip draft rejected"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn check_line_count(
    state: &AppState,
    lines: usize,
    correlation_id: Uuid,
) -> Result<(), ApiErrorResponse> {
    let limit = state.max_detail_lines();
    if lines <= limit {
        return Ok(());
    }
    warn!(
        correlation_id = %correlation_id,
        lines,
        limit,
        "Too many detail lines"
    );
    Err(ApiErrorResponse::bad_request(ApiError::with_details(
        "VALIDATION_ERROR",
        format!("Too many detail lines: {} (limit {})", lines, limit),
        "Split the payslip or raise server.max_detail_lines",
    )))
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
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
    json_response(StatusCode::BAD_REQUEST, &error)
}
