use crate::database::{MongoDB, CONTACTS};
use crate::models::Contact;
use crate::utils::AppError;

pub async fn add_contact(db: &MongoDB, contact: &Contact) -> Result<String, AppError> {
    let collection = db.collection::<Contact>(CONTACTS);

    let result = collection.insert_one(contact).await?;

    Ok(result
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_else(|| result.inserted_id.to_string()))
}
