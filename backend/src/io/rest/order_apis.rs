//! # REST API for Daily Orders

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use shared::{MemberOrdersResponse, SubmitDailyOrdersRequest, SubmitDailyOrdersResponse, WeekQuery};
use tracing::info;

use super::error_response;
use super::mappers::order_mapper::OrderMapper;
use super::mappers::week_mapper::WeekMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/daily", post(submit_daily_orders))
        .route("/member/:member_id", get(get_member_orders))
}

/// POST /api/orders/daily
pub async fn submit_daily_orders(
    State(state): State<AppState>,
    Json(request): Json<SubmitDailyOrdersRequest>,
) -> impl IntoResponse {
    info!("POST /api/orders/daily - {} entr(y/ies)", request.entries.len());

    let command = OrderMapper::to_submit_command(request);
    match state.order_service.submit_daily_orders(command).await {
        Ok(orders) => {
            let response = SubmitDailyOrdersResponse {
                success_message: format!("Recorded {} order(s)", orders.len()),
                orders: orders.into_iter().map(OrderMapper::to_dto).collect(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET /api/orders/member/:member_id?offset=N
pub async fn get_member_orders(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
    Query(query): Query<WeekQuery>,
) -> impl IntoResponse {
    info!("GET /api/orders/member/{} - query: {:?}", member_id, query);

    let offset = query.offset.unwrap_or(0);
    let window = match state.insights_service.week_for_offset(offset) {
        Ok(window) => window,
        Err(e) => return error_response(&e),
    };

    match state.order_service.orders_for_member(&member_id, &window).await {
        Ok(orders) => {
            let response = MemberOrdersResponse {
                member_id,
                week: WeekMapper::to_window_dto(&window, offset),
                orders: orders.into_iter().map(OrderMapper::to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_support::{read_json, send, setup_test_app};
    use axum::http::Method;
    use chrono::Duration;
    use serde_json::json;
    use shared::{ErrorResponse, PaymentStatus};

    #[tokio::test]
    async fn test_submit_then_list_member_orders() {
        let app = setup_test_app().await;
        let routes = router().with_state(app.state.clone());

        let response = send(
            routes.clone(),
            Method::POST,
            "/daily",
            Some(json!({ "entries": [
                { "member_id": "Ayush", "cost": "120" },
                { "member_id": "Saish", "cost": "95.5" }
            ]})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: SubmitDailyOrdersResponse = read_json(response).await;
        assert_eq!(body.orders.len(), 2);
        assert_eq!(body.success_message, "Recorded 2 order(s)");

        let response = send(routes, Method::GET, "/member/Ayush?offset=0", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: MemberOrdersResponse = read_json(response).await;
        assert_eq!(body.week.label, "2/25/2024 - 3/2/2024");
        assert_eq!(body.orders.len(), 1);
        assert_eq!(body.orders[0].cost, "120");
        assert_eq!(body.orders[0].payment_status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn test_invalid_entry_rejects_whole_submission() {
        let app = setup_test_app().await;
        let routes = router().with_state(app.state.clone());

        let response = send(
            routes.clone(),
            Method::POST,
            "/daily",
            Some(json!({ "entries": [
                { "member_id": "Ayush", "cost": "120" },
                { "member_id": "Saish", "cost": "-3" }
            ]})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.error, "Please enter a valid positive cost for Saish");

        let response = send(routes, Method::GET, "/member/Ayush", None).await;
        let body: MemberOrdersResponse = read_json(response).await;
        assert!(body.orders.is_empty());
    }

    #[tokio::test]
    async fn test_member_orders_in_previous_week() {
        let app = setup_test_app().await;
        let routes = router().with_state(app.state.clone());

        app.clock.set(crate::io::rest::test_support::test_now() - Duration::days(7));
        send(
            routes.clone(),
            Method::POST,
            "/daily",
            Some(json!({ "entries": [{ "member_id": "Vivek", "cost": "40" }] })),
        )
        .await;
        app.clock.set(crate::io::rest::test_support::test_now());

        let current: MemberOrdersResponse = read_json(send(routes.clone(), Method::GET, "/member/Vivek", None).await).await;
        assert!(current.orders.is_empty());

        let previous: MemberOrdersResponse =
            read_json(send(routes.clone(), Method::GET, "/member/Vivek?offset=-1", None).await).await;
        assert_eq!(previous.orders.len(), 1);

        let future = send(routes, Method::GET, "/member/Vivek?offset=1", None).await;
        assert_eq!(future.status(), StatusCode::BAD_REQUEST);
    }
}
