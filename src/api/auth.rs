use crate::services::token_service;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct TokenRequest {
    pub email: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Issues a signed 8-hour token for the given principal. The frontend calls
/// this right after sign-in; the role is looked up per request, never baked
/// into the token.
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse)
    )
)]
pub async fn issue_token(request: web::Json<TokenRequest>) -> HttpResponse {
    log::info!("🔐 POST /jwt - email: {}", request.email);

    match token_service::issue_token(&request.email) {
        Ok(token) => HttpResponse::Ok().json(TokenResponse { token }),
        Err(e) => {
            log::error!("❌ Failed to issue token for {}: {}", request.email, e);
            e.to_response()
        }
    }
}
