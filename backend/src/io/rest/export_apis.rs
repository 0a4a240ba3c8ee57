//! # REST API for Data Export
//!
//! Returns a week's totals as CSV content plus a suggested file name.
//! Saving the file is left to the client.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::{ErrorResponse, ExportWeekResponse, WeekQuery};
use tracing::{error, info};

use super::error_response;
use crate::domain::export_service::{export_csv, export_file_name};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/week", get(export_week))
}

/// GET /api/export/week?offset=N
pub async fn export_week(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> impl IntoResponse {
    info!("GET /api/export/week - query: {:?}", query);

    let window = match state.insights_service.week_for_offset(query.offset.unwrap_or(0)) {
        Ok(window) => window,
        Err(e) => return error_response(&e),
    };

    let aggregate = match state.insights_service.weekly_aggregate(&window).await {
        Ok(aggregate) => aggregate,
        Err(e) => return error_response(&e),
    };

    match export_csv(&aggregate) {
        Ok(csv_content) => {
            let response = ExportWeekResponse {
                csv_content,
                filename: export_file_name(&window),
                member_count: aggregate.per_member_total.len(),
            };
            info!("Exported {} member(s) for week {}", response.member_count, window);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to export week {}: {:?}", window, e);
            let body = ErrorResponse {
                error: "Failed to export weekly insights".to_string(),
                details: vec![e.to_string()],
                retryable: false,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::orders::{RawCostEntry, SubmitDailyOrdersCommand};
    use crate::io::rest::test_support::{read_json, send, setup_test_app};
    use axum::http::Method;

    #[tokio::test]
    async fn test_export_current_week() {
        let app = setup_test_app().await;
        app.state
            .order_service
            .submit_daily_orders(SubmitDailyOrdersCommand {
                entries: vec![
                    RawCostEntry::new("Saish", Some("7")),
                    RawCostEntry::new("Ayush", Some("12.5")),
                ],
            })
            .await
            .unwrap();

        let response = send(router().with_state(app.state.clone()), Method::GET, "/week", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: ExportWeekResponse = read_json(response).await;
        assert_eq!(body.csv_content, "Member,Total Cost\nAyush,12.50\nSaish,7.00");
        assert_eq!(body.filename, "weekly_insights_2024-02-25_2024-03-02.csv");
        assert_eq!(body.member_count, 2);
    }

    #[tokio::test]
    async fn test_export_previous_empty_week() {
        let app = setup_test_app().await;
        let response = send(
            router().with_state(app.state.clone()),
            Method::GET,
            "/week?offset=-1",
            None,
        )
        .await;

        let body: ExportWeekResponse = read_json(response).await;
        assert_eq!(body.csv_content, "Member,Total Cost");
        assert_eq!(body.filename, "weekly_insights_2024-02-18_2024-02-24.csv");
        assert_eq!(body.member_count, 0);
    }
}
