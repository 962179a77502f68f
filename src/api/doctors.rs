use crate::database::MongoDB;
use crate::models::DoctorInfo;
use crate::services::doctor_service;
use crate::utils::AppError;
use actix_web::{web, HttpResponse};
use mongodb::bson::Document;

/// POST /addDoctorInfo (doctor): publish a doctor profile.
pub async fn add_doctor_info(
    db: web::Data<MongoDB>,
    doctor: web::Json<DoctorInfo>,
) -> HttpResponse {
    log::info!("🩺 POST /addDoctorInfo - email: {}", doctor.email);

    match doctor_service::add_info(&db, &doctor).await {
        Ok(id) => HttpResponse::Ok().json(serde_json::json!({ "insertedId": id })),
        Err(e) => {
            log::error!("❌ Failed to add doctor info: {}", e);
            e.to_response()
        }
    }
}

/// GET /doctorsInfo (public): all doctor profiles.
pub async fn list_doctors_info(db: web::Data<MongoDB>) -> HttpResponse {
    match doctor_service::list_info(&db).await {
        Ok(doctors) => HttpResponse::Ok().json(doctors),
        Err(e) => e.to_response(),
    }
}

/// GET /doctors/{email} (doctor): one doctor profile.
pub async fn get_doctor(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let email = path.into_inner();

    match doctor_service::find_by_email(&db, &email).await {
        Ok(doctor) => HttpResponse::Ok().json(doctor),
        Err(e) => e.to_response(),
    }
}

/// PUT /doctors/{id} (doctor). 400 when nothing was modified.
pub async fn update_doctor(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    updated: web::Json<Document>,
) -> HttpResponse {
    let id = path.into_inner();

    match doctor_service::update_info(&db, &id, updated.into_inner()).await {
        Ok(outcome) if outcome.matched_count > 0 && outcome.modified_count > 0 => {
            HttpResponse::Ok().json(serde_json::json!({
                "message": "Doctor info updated successfully"
            }))
        }
        Ok(_) => AppError::NoChange("No doctor info updated".into()).to_response(),
        Err(e) => e.to_response(),
    }
}

/// DELETE /doctors/{id} (admin): removes the profile and cascades to the
/// linked user. Both deletion counts are reported; there is no rollback.
pub async fn delete_doctor(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("🗑️ DELETE /doctors/{}", id);

    match doctor_service::delete_with_user(&db, &id).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::warn!("❌ Doctor delete failed: {}", e);
            e.to_response()
        }
    }
}
