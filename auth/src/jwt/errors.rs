use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Signing secret is not configured")]
    MissingSecret,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    MalformedToken(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is not valid yet")]
    TokenNotYetValid,
}

impl JwtError {
    /// Whether the error is caused by the presented token rather than by
    /// the signing machinery or its configuration.
    pub fn is_credential_error(&self) -> bool {
        match self {
            JwtError::MalformedToken(_)
            | JwtError::InvalidSignature
            | JwtError::TokenExpired
            | JwtError::TokenNotYetValid => true,
            JwtError::MissingSecret | JwtError::EncodingFailed(_) => false,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName => JwtError::InvalidSignature,
            ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            ErrorKind::ImmatureSignature => JwtError::TokenNotYetValid,
            _ => JwtError::MalformedToken(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::errors::ErrorKind;

    use super::*;

    #[test]
    fn test_error_from_jsonwebtoken() {
        let cases = [
            (ErrorKind::ExpiredSignature, JwtError::TokenExpired),
            (ErrorKind::ImmatureSignature, JwtError::TokenNotYetValid),
            (ErrorKind::InvalidSignature, JwtError::InvalidSignature),
            (ErrorKind::InvalidAlgorithm, JwtError::InvalidSignature),
        ];

        for (kind, expected) in cases {
            let err: JwtError = jsonwebtoken::errors::Error::from(kind).into();
            assert_eq!(err, expected);
        }

        let err: JwtError = jsonwebtoken::errors::Error::from(ErrorKind::InvalidToken).into();
        assert!(matches!(err, JwtError::MalformedToken(_)));
    }

    #[test]
    fn test_credential_classification() {
        assert!(JwtError::TokenExpired.is_credential_error());
        assert!(JwtError::MalformedToken("x".into()).is_credential_error());
        assert!(!JwtError::MissingSecret.is_credential_error());
        assert!(!JwtError::EncodingFailed("x".into()).is_credential_error());
    }
}
