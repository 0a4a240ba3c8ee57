//! # REST API for Weekly Insights
//!
//! Weekly totals per member and payment reconciliation.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use shared::{MarkPaidRequest, MarkPaidResponse, WeekQuery};
use tracing::info;

use super::error_response;
use super::mappers::week_mapper::WeekMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/week", get(get_weekly_summary))
        .route("/mark-paid", post(mark_paid))
}

/// GET /api/insights/week?offset=N
pub async fn get_weekly_summary(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> impl IntoResponse {
    info!("GET /api/insights/week - query: {:?}", query);

    let offset = query.offset.unwrap_or(0);
    let window = match state.insights_service.week_for_offset(offset) {
        Ok(window) => window,
        Err(e) => return error_response(&e),
    };

    match state.insights_service.weekly_aggregate(&window).await {
        Ok(aggregate) => (StatusCode::OK, Json(WeekMapper::to_summary_dto(&aggregate, offset))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST /api/insights/mark-paid
pub async fn mark_paid(
    State(state): State<AppState>,
    Json(request): Json<MarkPaidRequest>,
) -> impl IntoResponse {
    info!("POST /api/insights/mark-paid - request: {:?}", request);

    let window = match state.insights_service.week_for_offset(request.offset) {
        Ok(window) => window,
        Err(e) => return error_response(&e),
    };

    match state.payment_reconciler.mark_paid(&request.member_id, &window).await {
        Ok(updated_count) => {
            let success_message = if updated_count == 0 {
                format!("{} has nothing pending for {}", request.member_id, window)
            } else {
                format!("Marked {} order(s) paid for {}", updated_count, request.member_id)
            };
            let response = MarkPaidResponse {
                member_id: request.member_id,
                updated_count,
                success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(&e),
    }
}
