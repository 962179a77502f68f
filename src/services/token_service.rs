use crate::utils::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tokens are stateless: once issued they stay valid for the full window,
/// there is no revocation list.
pub const TOKEN_TTL_HOURS: i64 = 8;

/// Claim set carried by every bearer token. The role is deliberately not
/// embedded here; it is resolved from the user store on each gated request.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub email: String,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
}

/// The signing secret is supplied by the environment only; there is no
/// built-in fallback. `main` checks the variable at startup so a missing
/// secret aborts the process instead of failing per request.
fn get_token_secret() -> String {
    std::env::var("ACCESS_TOKEN_SECRET").expect("ACCESS_TOKEN_SECRET must be set")
}

/// Signs a fresh token for the given principal email.
pub fn issue_token(email: &str) -> Result<String, AppError> {
    let iat = Utc::now().timestamp() as usize;
    let exp = (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize;

    let claims = Claims {
        email: email.to_string(),
        iat,
        exp,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(get_token_secret().as_ref()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}

/// Pure verification: signature and expiry only, no store access.
pub fn verify_token(token: &str) -> Result<Claims, AppError> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(get_token_secret().as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests run in parallel threads sharing the process environment, so every
    // test sets the same secret value.
    fn set_test_secret() {
        std::env::set_var("ACCESS_TOKEN_SECRET", "test-secret");
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        set_test_secret();
        let token = issue_token("a@b.com").unwrap();
        let claims = verify_token(&token).unwrap();
        assert_eq!(claims.email, "a@b.com");
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, (TOKEN_TTL_HOURS * 3600) as usize);
    }

    #[test]
    fn test_garbage_token_rejected() {
        set_test_secret();
        let result = verify_token("not.a.token");
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_tampered_token_rejected() {
        set_test_secret();
        let token = issue_token("a@b.com").unwrap();
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        // Swap in a forged signature segment.
        parts[2] = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA".to_string();
        let result = verify_token(&parts.join("."));
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_rejected() {
        set_test_secret();
        let iat = (Utc::now() - Duration::hours(10)).timestamp() as usize;
        let exp = (Utc::now() - Duration::hours(2)).timestamp() as usize;
        let claims = Claims {
            email: "a@b.com".into(),
            iat,
            exp,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(get_token_secret().as_ref()),
        )
        .unwrap();

        let result = verify_token(&token);
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }
}
