use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// Admin listing of every registered user, newest first.
pub async fn list_users(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<ApiSuccess<ListUsersResponseData>, ApiError> {
    let users = state.user_service.list_users().await?;

    tracing::info!(user_id = %user.user_id(), count = users.len(), "Admin listed users");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ListUsersResponseData {
            accessed_by: user.username().to_string(),
            users: users.iter().map(UserData::from).collect(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListUsersResponseData {
    pub accessed_by: String,
    pub users: Vec<UserData>,
}
