use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// Profile of the caller.
///
/// Identity comes from the verified token; the stored record adds the
/// rest. A token for an account that no longer exists gets `404`.
pub async fn get_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    let stored = state.user_service.get_user(&user.user_id()).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ProfileResponseData {
            user_id: user.user_id().0,
            username: user.username().to_string(),
            email: stored.email.as_str().to_string(),
            created_at: stored.created_at,
            message: "This is a protected route".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileResponseData {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub message: String,
}
