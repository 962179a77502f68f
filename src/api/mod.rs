pub mod appointments;
pub mod auth;
pub mod bookings;
pub mod contacts;
pub mod doctors;
pub mod health;
pub mod reviews;
pub mod swagger;
pub mod users;

use crate::services::token_service::Claims;
use crate::utils::AppError;
use actix_web::{HttpMessage, HttpRequest};

/// Claims placed in the request extensions by the auth gate.
pub(crate) fn claims_of(req: &HttpRequest) -> Option<Claims> {
    req.extensions().get::<Claims>().cloned()
}

/// Self-access check: a caller may only act on their own email. Every
/// handler carrying a caller email in the path or query routes through this
/// and returns the denial immediately, before any store access.
pub(crate) fn ensure_self(claims: &Claims, email: &str) -> Result<(), AppError> {
    if claims.email == email {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_for(email: &str) -> Claims {
        Claims {
            email: email.to_string(),
            iat: 0,
            exp: 0,
            jti: "test".to_string(),
        }
    }

    #[test]
    fn test_self_access_match_is_allowed() {
        assert!(ensure_self(&claims_for("a@b.com"), "a@b.com").is_ok());
    }

    #[test]
    fn test_self_access_mismatch_is_forbidden() {
        let result = ensure_self(&claims_for("y@b.com"), "x@b.com");
        match result {
            Err(e) => assert_eq!(e.status_code(), actix_web::http::StatusCode::FORBIDDEN),
            Ok(()) => panic!("mismatched email must be denied"),
        }
    }
}
