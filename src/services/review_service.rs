use crate::database::{MongoDB, REVIEWS};
use crate::models::Review;
use crate::utils::AppError;
use futures::TryStreamExt;
use mongodb::bson::doc;

pub async fn add_review(db: &MongoDB, review: &Review) -> Result<String, AppError> {
    let collection = db.collection::<Review>(REVIEWS);

    let result = collection.insert_one(review).await?;

    Ok(result
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_else(|| result.inserted_id.to_string()))
}

pub async fn list_reviews(db: &MongoDB) -> Result<Vec<Review>, AppError> {
    let collection = db.collection::<Review>(REVIEWS);

    let reviews = collection.find(doc! {}).await?.try_collect().await?;

    Ok(reviews)
}

pub async fn find_by_email(db: &MongoDB, email: &str) -> Result<Option<Review>, AppError> {
    let collection = db.collection::<Review>(REVIEWS);

    Ok(collection.find_one(doc! { "email": email }).await?)
}
