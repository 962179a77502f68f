use crate::database::MongoDB;
use crate::models::AppointmentOption;
use crate::services::appointment_service;
use crate::utils::AppError;
use actix_web::{web, HttpResponse};
use mongodb::bson::Document;

/// GET /appointmentOptions (public): the full service catalog.
pub async fn list_options(db: web::Data<MongoDB>) -> HttpResponse {
    match appointment_service::list_options(&db).await {
        Ok(options) => HttpResponse::Ok().json(options),
        Err(e) => e.to_response(),
    }
}

/// POST /services (admin): add a catalog entry.
pub async fn add_service(
    db: web::Data<MongoDB>,
    option: web::Json<AppointmentOption>,
) -> HttpResponse {
    log::info!("➕ POST /services - {}", option.service_name);

    match appointment_service::add_option(&db, &option).await {
        Ok(id) => HttpResponse::Created().json(serde_json::json!({ "insertedId": id })),
        Err(e) => {
            log::error!("❌ Failed to add service: {}", e);
            e.to_response()
        }
    }
}

/// PUT /appointmentOptions/{id} (admin). 400 when nothing was modified.
pub async fn update_option(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    updated: web::Json<Document>,
) -> HttpResponse {
    let id = path.into_inner();

    match appointment_service::update_option(&db, &id, updated.into_inner()).await {
        Ok(outcome) if outcome.matched_count > 0 && outcome.modified_count > 0 => {
            HttpResponse::Ok().json(serde_json::json!({
                "message": "appointment options updated successfully"
            }))
        }
        Ok(_) => AppError::NoChange("No appointment options updated".into()).to_response(),
        Err(e) => e.to_response(),
    }
}

/// GET /appointmentSpeciality (doctor): catalog projected to service names.
pub async fn specialties(db: web::Data<MongoDB>) -> HttpResponse {
    match appointment_service::specialties(&db).await {
        Ok(specialties) => HttpResponse::Ok().json(specialties),
        Err(e) => e.to_response(),
    }
}
