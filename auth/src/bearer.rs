use thiserror::Error;

/// Scheme prefix accepted in the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

/// The request carried no usable bearer credential.
///
/// Every variant means "no credential supplied"; none of them grants or
/// implies a different trust level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFormatError {
    #[error("Missing Authorization header")]
    Missing,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    InvalidScheme,

    #[error("Empty bearer token")]
    EmptyToken,
}

/// Extract the token from an `Authorization` header value.
///
/// Only the exact, case-sensitive prefix `"Bearer "` followed by a
/// non-empty token is accepted.
///
/// # Arguments
/// * `header` - Raw header value, `None` when the header is absent
///
/// # Returns
/// The token part of the header
///
/// # Errors
/// * `Missing` - No header
/// * `InvalidScheme` - Any scheme other than `Bearer`
/// * `EmptyToken` - `"Bearer "` with nothing after it
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AuthFormatError> {
    let value = header.ok_or(AuthFormatError::Missing)?;
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthFormatError::InvalidScheme)?;

    if token.trim().is_empty() {
        return Err(AuthFormatError::EmptyToken);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_valid_bearer() {
        assert_eq!(extract_bearer(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(extract_bearer(None), Err(AuthFormatError::Missing));
    }

    #[test]
    fn test_wrong_scheme() {
        assert_eq!(
            extract_bearer(Some("Basic abc")),
            Err(AuthFormatError::InvalidScheme)
        );
        assert_eq!(
            extract_bearer(Some("bearer abc")),
            Err(AuthFormatError::InvalidScheme)
        );
        assert_eq!(
            extract_bearer(Some("Bearer")),
            Err(AuthFormatError::InvalidScheme)
        );
        assert_eq!(extract_bearer(Some("")), Err(AuthFormatError::InvalidScheme));
    }

    #[test]
    fn test_empty_token() {
        assert_eq!(
            extract_bearer(Some("Bearer ")),
            Err(AuthFormatError::EmptyToken)
        );
        assert_eq!(
            extract_bearer(Some("Bearer    ")),
            Err(AuthFormatError::EmptyToken)
        );
    }
}
