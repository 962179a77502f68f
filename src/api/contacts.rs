use crate::database::MongoDB;
use crate::models::Contact;
use crate::services::contact_service;
use actix_web::{web, HttpResponse};

/// POST /contacts (public): contact-form submission.
pub async fn create_contact(db: web::Data<MongoDB>, contact: web::Json<Contact>) -> HttpResponse {
    match contact_service::add_contact(&db, &contact).await {
        Ok(id) => HttpResponse::Ok().json(serde_json::json!({ "insertedId": id })),
        Err(e) => {
            log::error!("❌ Failed to store contact submission: {}", e);
            e.to_response()
        }
    }
}
