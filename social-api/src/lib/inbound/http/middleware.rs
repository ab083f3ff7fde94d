use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Claims;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use http::header::AUTHORIZATION;
use http::request::Parts;
use http::Extensions;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const MISSING_CREDENTIAL: &str = "missing or malformed authorization header";
const REJECTED_TOKEN: &str = "invalid or expired token";

/// Verified identity attached to a request by [`authenticate`].
///
/// Stored in the request extensions, keyed by this type. It has no public
/// constructor, so only this module can attach one.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    claims: Claims,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> UserId {
        UserId(self.claims.user_id)
    }

    pub fn username(&self) -> &str {
        &self.claims.username
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Look up the identity attached to a request.
    ///
    /// Returns `None` when the request did not go through [`authenticate`].
    pub fn from_extensions(extensions: &Extensions) -> Option<&AuthenticatedUser> {
        extensions.get::<AuthenticatedUser>()
    }
}

/// Extractor for handlers behind [`authenticate`].
///
/// Rejects with `401` instead of panicking when no identity is attached.
/// Use `Option<CurrentUser>` where authentication is optional.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        AuthenticatedUser::from_extensions(&parts.extensions)
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| ApiError::Unauthorized("authentication required".to_string()))
    }
}

/// Middleware that validates JWT tokens and adds user info to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = verify_request(&state, &req)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// [`authenticate`] plus the access policy check for admin routes.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = verify_request(&state, &req)?;

    if !state.access_policy.permits(user.claims()) {
        tracing::warn!(user_id = %user.user_id(), "Access policy denied request");
        return Err(ApiError::Forbidden("insufficient permissions".to_string()));
    }

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

fn verify_request(state: &AppState, req: &Request) -> Result<AuthenticatedUser, ApiError> {
    // A header that is not visible ASCII is a malformed credential, not a missing one.
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default());

    state
        .authenticator
        .authenticate_request(header)
        .map(|claims| AuthenticatedUser { claims })
        .map_err(reject)
}

fn reject(err: AuthenticationError) -> ApiError {
    match &err {
        AuthenticationError::MissingCredential(cause) => {
            tracing::debug!(reason = %cause, "No bearer credential");
            ApiError::Unauthorized(MISSING_CREDENTIAL.to_string())
        }
        _ if err.is_credential_error() => {
            tracing::warn!(reason = %err, "JWT validation failed");
            ApiError::Unauthorized(REJECTED_TOKEN.to_string())
        }
        _ => ApiError::InternalServerError(err.to_string()),
    }
}
