use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::AuthResponseData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UsernameError;

/// Create an account and sign the new user in.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let user = state
        .user_service
        .create_user(body.try_into_command()?)
        .await?;

    let token = state
        .authenticator
        .generate_token(user.id.0, user.username.as_str())?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        AuthResponseData {
            token,
            user: (&user).into(),
        },
    ))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, ParseRegisterRequestError> {
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(CreateUserCommand::new(username, email, password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_request_parses() {
        let command = request("alice", "a@x.com", "secret123")
            .try_into_command()
            .unwrap();
        assert_eq!(command.username.as_str(), "alice");
        assert_eq!(command.email.as_str(), "a@x.com");
        assert_eq!(command.password.expose(), "secret123");
    }

    #[test]
    fn test_invalid_fields_are_unprocessable() {
        for body in [
            request("al", "a@x.com", "secret123"),
            request("alice", "not-an-email", "secret123"),
            request("alice", "a@x.com", ""),
        ] {
            let err = ApiError::from(body.try_into_command().unwrap_err());
            assert!(matches!(err, ApiError::UnprocessableEntity(_)));
        }
    }
}
