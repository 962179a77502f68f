use crate::api::{claims_of, ensure_self};
use crate::database::MongoDB;
use crate::models::{Role, User};
use crate::services::user_service::UpsertOutcome;
use crate::services::{review_service, user_service};
use crate::utils::AppError;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AdminStatus {
    pub admin: bool,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DoctorStatus {
    pub doctor: bool,
}

/// GET /users (admin).
pub async fn list_users(db: web::Data<MongoDB>) -> HttpResponse {
    match user_service::list_users(&db).await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(e) => e.to_response(),
    }
}

/// POST /users (public): first-login upsert. Repeating the call with the same
/// email reports "user already exists" and inserts nothing.
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "User created, or already present")
    )
)]
pub async fn create_user(db: web::Data<MongoDB>, user: web::Json<User>) -> HttpResponse {
    log::info!("👤 POST /users - email: {}", user.email);

    match user_service::create_if_absent(&db, &user).await {
        Ok(outcome) => upsert_response(outcome),
        Err(e) => {
            log::error!("❌ Failed to create user {}: {}", user.email, e);
            e.to_response()
        }
    }
}

fn upsert_response(outcome: UpsertOutcome) -> HttpResponse {
    match outcome {
        UpsertOutcome::Created(id) => {
            HttpResponse::Ok().json(serde_json::json!({ "insertedId": id }))
        }
        UpsertOutcome::AlreadyExists => {
            HttpResponse::Ok().json(serde_json::json!({ "message": "user already exists" }))
        }
    }
}

/// DELETE /users/{id} (admin).
pub async fn delete_user(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("🗑️ DELETE /users/{}", id);

    match user_service::delete_user(&db, &id).await {
        Ok(deleted) => HttpResponse::Ok().json(serde_json::json!({ "deletedCount": deleted })),
        Err(e) => e.to_response(),
    }
}

/// GET /users/admin/{email} (auth + self): probe whether the caller is an
/// admin. A principal may only probe itself; mismatch denies and returns
/// immediately.
#[utoipa::path(
    get,
    path = "/users/admin/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "Email to probe, must match the caller")),
    responses(
        (status = 200, description = "Probe result", body = AdminStatus),
        (status = 403, description = "Email does not match the authenticated principal")
    ),
    security(("bearer_auth" = []))
)]
pub async fn is_admin(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let email = path.into_inner();

    let claims = match claims_of(&req) {
        Some(claims) => claims,
        None => return AppError::MissingToken.to_response(),
    };

    if let Err(e) = ensure_self(&claims, &email) {
        return e.to_response();
    }

    match user_service::resolve_role(&db, &email).await {
        Ok(role) => HttpResponse::Ok().json(AdminStatus {
            admin: role == Role::Admin,
        }),
        Err(e) => e.to_response(),
    }
}

/// GET /users/doctor/{email} (auth + self).
#[utoipa::path(
    get,
    path = "/users/doctor/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "Email to probe, must match the caller")),
    responses(
        (status = 200, description = "Probe result", body = DoctorStatus),
        (status = 403, description = "Email does not match the authenticated principal")
    ),
    security(("bearer_auth" = []))
)]
pub async fn is_doctor(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let email = path.into_inner();

    let claims = match claims_of(&req) {
        Some(claims) => claims,
        None => return AppError::MissingToken.to_response(),
    };

    if let Err(e) = ensure_self(&claims, &email) {
        return e.to_response();
    }

    match user_service::resolve_role(&db, &email).await {
        Ok(role) => HttpResponse::Ok().json(DoctorStatus {
            doctor: role == Role::Doctor,
        }),
        Err(e) => e.to_response(),
    }
}

/// PATCH /users/admin/{id} (admin): promote a user to admin.
pub async fn make_admin(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("⬆️ PATCH /users/admin/{}", id);

    match user_service::promote_by_id(&db, &id, Role::Admin).await {
        Ok(outcome) if outcome.matched_count > 0 => HttpResponse::Ok().json(outcome),
        Ok(_) => AppError::NotFound("User not found".into()).to_response(),
        Err(e) => e.to_response(),
    }
}

/// PATCH /users/doctor/{email} (admin): promote a user to doctor.
pub async fn make_doctor(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let email = path.into_inner();
    log::info!("⬆️ PATCH /users/doctor/{}", email);

    match user_service::promote_by_email(&db, &email, Role::Doctor).await {
        Ok(outcome) if outcome.matched_count > 0 && outcome.modified_count > 0 => {
            HttpResponse::Ok().json(serde_json::json!({
                "message": "User has been made a doctor."
            }))
        }
        Ok(_) => AppError::NotFound("User not found or not modified.".into()).to_response(),
        Err(e) => e.to_response(),
    }
}

/// GET /users/admin/email/{email} (admin): probe any email's admin status.
/// Unlike the self-probe above, this one is admin-gated and carries no
/// self-access restriction.
pub async fn admin_status_by_email(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> HttpResponse {
    let email = path.into_inner();

    match user_service::resolve_role(&db, &email).await {
        Ok(role) => HttpResponse::Ok().json(serde_json::json!({ "isAdmin": role == Role::Admin })),
        Err(e) => e.to_response(),
    }
}

/// GET /users/check-email/{email} (admin): availability check.
pub async fn check_email(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let email = path.into_inner();

    match user_service::email_exists(&db, &email).await {
        Ok(exists) => HttpResponse::Ok().json(serde_json::json!({ "emailExists": exists })),
        Err(e) => e.to_response(),
    }
}

/// GET /users/email/{email} (auth): the review submitted under that email.
pub async fn review_by_email(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let email = path.into_inner();

    match review_service::find_by_email(&db, &email).await {
        Ok(review) => HttpResponse::Ok().json(review),
        Err(e) => e.to_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_repeated_signup_reports_user_already_exists() {
        let resp = upsert_response(UpsertOutcome::AlreadyExists);
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "user already exists");
        assert!(json.get("insertedId").is_none());
    }

    #[actix_web::test]
    async fn test_first_signup_reports_inserted_id() {
        let resp = upsert_response(UpsertOutcome::Created("65f0aa00bb11cc22dd33ee44".into()));
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["insertedId"], "65f0aa00bb11cc22dd33ee44");
    }
}
