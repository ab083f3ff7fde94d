use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthResponseData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Exchange email and password for a token.
///
/// Unknown email and wrong password produce the same response, and both run
/// one password verification.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let email = EmailAddress::new(body.email)
        .map_err(|e| ApiError::UnprocessableEntity(format!("Invalid email: {}", e)))?;
    let password = Password::new(body.password)
        .map_err(|e| ApiError::UnprocessableEntity(format!("Invalid password: {}", e)))?;

    let user = match state.user_service.get_user_by_email(&email).await {
        Ok(user) => user,
        Err(UserError::NotFoundByEmail(_)) => {
            let err = state.authenticator.reject_unknown_user(password.expose());
            tracing::info!("Login rejected");
            return Err(err.into());
        }
        Err(e) => return Err(e.into()),
    };

    let result = state
        .authenticator
        .authenticate(
            password.expose(),
            &user.password_hash,
            user.id.0,
            user.username.as_str(),
        )
        .map_err(|e| {
            if e.is_credential_error() {
                tracing::info!("Login rejected");
            }
            ApiError::from(e)
        })?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthResponseData {
            token: result.access_token,
            user: (&user).into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}
