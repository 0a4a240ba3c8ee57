//! # REST API Interface Layer
//!
//! JSON endpoints under `/api`. Handlers translate shared DTOs into domain
//! commands and domain errors into HTTP status codes:
//!
//! - validation failures and future weeks: `400`
//! - partial reconciliation: `500`, with the order IDs still pending
//! - store unavailable: `503`, marked retryable

pub mod export_apis;
pub mod insights_apis;
pub mod mappers;
pub mod member_apis;
pub mod order_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use shared::{ErrorResponse, PartialReconciliationResponse};
use tracing::{error, warn};

use crate::domain::TrackerError;
use crate::AppState;

/// All API routes, to be nested under `/api`
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/members", member_apis::router())
        .nest("/orders", order_apis::router())
        .nest("/insights", insights_apis::router())
        .nest("/export", export_apis::router())
}

/// Map a domain error to its HTTP response.
pub fn error_response(err: &TrackerError) -> Response {
    match err {
        TrackerError::Validation(errors) => {
            warn!("Rejected request: {}", err);
            let body = ErrorResponse {
                error: err.to_string(),
                details: errors.iter().map(|e| e.to_string()).collect(),
                retryable: false,
            };
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        }
        TrackerError::FutureWeek { .. } => {
            warn!("Rejected request: {}", err);
            (StatusCode::BAD_REQUEST, Json(simple_error(err))).into_response()
        }
        TrackerError::StoreUnavailable(source) => {
            error!("Order store unavailable: {:?}", source);
            (StatusCode::SERVICE_UNAVAILABLE, Json(simple_error(err))).into_response()
        }
        TrackerError::PartialReconciliation {
            member_id,
            updated,
            failed_order_ids,
        } => {
            error!("Partial reconciliation for {}: {:?} still pending", member_id, failed_order_ids);
            let body = PartialReconciliationResponse {
                member_id: member_id.clone(),
                updated: *updated,
                failed_order_ids: failed_order_ids.clone(),
                message: err.to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

fn simple_error(err: &TrackerError) -> ErrorResponse {
    ErrorResponse {
        error: err.to_string(),
        details: Vec::new(),
        retryable: err.is_retryable(),
    }
}
