use crate::database::{MongoDB, APPOINTMENT_OPTIONS};
use crate::models::{AppointmentOption, Specialty};
use crate::services::user_service::UpdateOutcome;
use crate::utils::AppError;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};

pub async fn list_options(db: &MongoDB) -> Result<Vec<AppointmentOption>, AppError> {
    let collection = db.collection::<AppointmentOption>(APPOINTMENT_OPTIONS);

    let options = collection.find(doc! {}).await?.try_collect().await?;

    Ok(options)
}

pub async fn add_option(db: &MongoDB, option: &AppointmentOption) -> Result<String, AppError> {
    let collection = db.collection::<AppointmentOption>(APPOINTMENT_OPTIONS);

    let result = collection.insert_one(option).await?;

    Ok(result
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_else(|| result.inserted_id.to_string()))
}

pub async fn update_option(
    db: &MongoDB,
    id: &str,
    mut updated: Document,
) -> Result<UpdateOutcome, AppError> {
    let oid = ObjectId::parse_str(id)
        .map_err(|_| AppError::NotFound(format!("no appointment option matches id {}", id)))?;

    // _id is immutable in MongoDB; never let a client body try to rewrite it.
    updated.remove("_id");

    let collection = db.collection::<AppointmentOption>(APPOINTMENT_OPTIONS);
    let result = collection
        .update_one(doc! { "_id": oid }, doc! { "$set": updated })
        .await?;

    Ok(UpdateOutcome {
        matched_count: result.matched_count,
        modified_count: result.modified_count,
    })
}

/// Catalog projected down to service names, for the doctor specialty picker.
pub async fn specialties(db: &MongoDB) -> Result<Vec<Specialty>, AppError> {
    let collection = db.collection::<Specialty>(APPOINTMENT_OPTIONS);

    let specialties = collection
        .find(doc! {})
        .projection(doc! { "service_name": 1 })
        .await?
        .try_collect()
        .await?;

    Ok(specialties)
}
