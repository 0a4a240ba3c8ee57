//! # REST API for the Member Roster

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::{AddMemberRequest, AddMemberResponse, MemberListResponse};
use tracing::info;

use super::error_response;
use crate::domain::commands::members::AddMemberCommand;
use crate::domain::models::member::Member;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_members).post(add_member))
}

fn names(members: Vec<Member>) -> Vec<String> {
    members.into_iter().map(|m| m.name).collect()
}

/// GET /api/members
pub async fn list_members(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/members");

    match state.member_service.list_members().await {
        Ok(members) => (StatusCode::OK, Json(MemberListResponse { members: names(members) })).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST /api/members
pub async fn add_member(
    State(state): State<AppState>,
    Json(request): Json<AddMemberRequest>,
) -> impl IntoResponse {
    info!("POST /api/members - name: {:?}", request.name);

    let command = AddMemberCommand { name: request.name };
    match state.member_service.add_member(command).await {
        Ok(members) => {
            let members = names(members);
            let added = members.last().cloned().unwrap_or_default();
            let response = AddMemberResponse {
                members,
                success_message: format!("Added {}", added),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response(&e),
    }
}
