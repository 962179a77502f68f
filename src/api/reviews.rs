use crate::database::MongoDB;
use crate::models::Review;
use crate::services::review_service;
use actix_web::{web, HttpResponse};

/// POST /reviews (auth).
pub async fn create_review(db: web::Data<MongoDB>, review: web::Json<Review>) -> HttpResponse {
    match review_service::add_review(&db, &review).await {
        Ok(id) => HttpResponse::Ok().json(serde_json::json!({ "insertedId": id })),
        Err(e) => e.to_response(),
    }
}

/// GET /reviews (public).
pub async fn list_reviews(db: web::Data<MongoDB>) -> HttpResponse {
    match review_service::list_reviews(&db).await {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(e) => e.to_response(),
    }
}
