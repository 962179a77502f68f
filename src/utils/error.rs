use actix_web::{http::StatusCode, HttpResponse};
use std::fmt;

/// Crate-wide error taxonomy. Every service function returns `Result<_, AppError>`
/// and every handler maps the error through `to_response`.
#[derive(Debug)]
pub enum AppError {
    /// No Authorization header on a gated route -> 401
    MissingToken,
    /// Bearer token failed to parse, or signature/expiry check failed -> 401
    InvalidToken,
    /// Role or self-access check failed -> 403
    Forbidden,
    /// Duplicate booking tuple -> 400
    Conflict(String),
    /// Lookup matched nothing -> 404
    NotFound(String),
    /// Update matched nothing or modified nothing -> 400
    NoChange(String),
    /// Store/infra failure -> 500. Must never surface as a denial.
    DatabaseError(String),
    /// Any other unclassified failure -> 500
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingToken | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Conflict(_) | AppError::NoChange(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": true,
            "message": self.to_string(),
        }))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingToken => write!(f, "unauthorized access"),
            AppError::InvalidToken => write!(f, "unauthorized access"),
            AppError::Forbidden => write!(f, "forbidden access"),
            AppError::Conflict(msg) => write!(f, "{}", msg),
            AppError::NotFound(msg) => write!(f, "{}", msg),
            AppError::NoChange(msg) => write!(f, "{}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::Conflict("slot taken".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("no user".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::DatabaseError("down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_errors_share_message() {
        // Clients must not be able to tell a missing token from a bad one.
        assert_eq!(AppError::MissingToken.to_string(), AppError::InvalidToken.to_string());
    }
}
