use crate::api::{claims_of, ensure_self};
use crate::database::MongoDB;
use crate::models::Booking;
use crate::services::booking_service;
use crate::utils::AppError;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct BookingsQuery {
    pub email: Option<String>,
}

/// POST /bookings (auth). 400 when the (date, slot, treatment) tuple is
/// already taken.
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "Bookings",
    responses(
        (status = 200, description = "Booking created"),
        (status = 400, description = "Slot already booked for this service"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_booking(
    db: web::Data<MongoDB>,
    booking: web::Json<Booking>,
) -> HttpResponse {
    log::info!(
        "📅 POST /bookings - {} {} {}",
        booking.appointment_date,
        booking.slot,
        booking.treatment_name
    );

    match booking_service::create_booking(&db, &booking).await {
        Ok(id) => HttpResponse::Ok().json(serde_json::json!({ "insertedId": id })),
        Err(e) => {
            log::warn!("❌ Booking rejected: {}", e);
            e.to_response()
        }
    }
}

/// GET /bookings?email= (auth + self). A caller may only list their own
/// bookings; a mismatch denies immediately, before any store access.
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "Bookings",
    params(
        ("email" = Option<String>, Query, description = "Email of the caller")
    ),
    responses(
        (status = 200, description = "Caller's bookings"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Email does not match the authenticated principal")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_bookings(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    query: web::Query<BookingsQuery>,
) -> HttpResponse {
    let email = match query.email.as_deref() {
        Some(email) if !email.is_empty() => email,
        _ => return HttpResponse::Ok().json(Vec::<Booking>::new()),
    };

    let claims = match claims_of(&req) {
        Some(claims) => claims,
        None => return AppError::MissingToken.to_response(),
    };

    if let Err(e) = ensure_self(&claims, email) {
        log::warn!("🔒 GET /bookings denied: {} asked for {}", claims.email, email);
        return e.to_response();
    }

    match booking_service::bookings_by_email(&db, email).await {
        Ok(bookings) => HttpResponse::Ok().json(bookings),
        Err(e) => e.to_response(),
    }
}

/// GET /bookingAppointments (admin): every booking in the system.
pub async fn list_all_bookings(db: web::Data<MongoDB>) -> HttpResponse {
    match booking_service::all_bookings(&db).await {
        Ok(bookings) => HttpResponse::Ok().json(bookings),
        Err(e) => e.to_response(),
    }
}

/// DELETE /bookings/{id} (auth).
pub async fn delete_booking(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("🗑️ DELETE /bookings/{}", id);

    match booking_service::delete_booking(&db, &id).await {
        Ok(deleted) => HttpResponse::Ok().json(serde_json::json!({ "deletedCount": deleted })),
        Err(e) => e.to_response(),
    }
}
