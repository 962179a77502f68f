use crate::database::{MongoDB, USERS};
use crate::models::{Role, User};
use crate::utils::AppError;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use serde::Serialize;

/// Outcome of the first-login upsert on POST /users.
#[derive(Debug)]
pub enum UpsertOutcome {
    Created(String),
    AlreadyExists,
}

/// Matched/modified counts from a role promotion or profile update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Role resolver. Must only run after token verification has succeeded.
///
/// An absent user or an absent role field both resolve to `Role::None`; a
/// store failure propagates as `DatabaseError` so clients never mistake an
/// infra outage for a denial.
pub async fn resolve_role(db: &MongoDB, email: &str) -> Result<Role, AppError> {
    let collection = db.collection::<User>(USERS);

    let user = collection.find_one(doc! { "email": email }).await?;

    Ok(user.map(|u| u.role).unwrap_or_default())
}

pub async fn list_users(db: &MongoDB) -> Result<Vec<User>, AppError> {
    let collection = db.collection::<User>(USERS);

    let users = collection.find(doc! {}).await?.try_collect().await?;

    Ok(users)
}

/// First-login upsert: inserts the user only when no document holds that
/// email yet. Idempotent from the client's point of view.
pub async fn create_if_absent(db: &MongoDB, user: &User) -> Result<UpsertOutcome, AppError> {
    let collection = db.collection::<User>(USERS);

    let existing = collection.find_one(doc! { "email": &user.email }).await?;
    if existing.is_some() {
        return Ok(UpsertOutcome::AlreadyExists);
    }

    let result = collection.insert_one(user).await?;
    let id = result
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_else(|| result.inserted_id.to_string());

    Ok(UpsertOutcome::Created(id))
}

pub async fn promote_by_id(db: &MongoDB, id: &str, role: Role) -> Result<UpdateOutcome, AppError> {
    let oid = ObjectId::parse_str(id)
        .map_err(|_| AppError::NotFound(format!("no user matches id {}", id)))?;

    let collection = db.collection::<User>(USERS);
    let result = collection
        .update_one(doc! { "_id": oid }, doc! { "$set": { "role": role.as_str() } })
        .await?;

    Ok(UpdateOutcome {
        matched_count: result.matched_count,
        modified_count: result.modified_count,
    })
}

pub async fn promote_by_email(
    db: &MongoDB,
    email: &str,
    role: Role,
) -> Result<UpdateOutcome, AppError> {
    let collection = db.collection::<User>(USERS);
    let result = collection
        .update_one(doc! { "email": email }, doc! { "$set": { "role": role.as_str() } })
        .await?;

    Ok(UpdateOutcome {
        matched_count: result.matched_count,
        modified_count: result.modified_count,
    })
}

pub async fn email_exists(db: &MongoDB, email: &str) -> Result<bool, AppError> {
    let collection = db.collection::<User>(USERS);

    Ok(collection.find_one(doc! { "email": email }).await?.is_some())
}

pub async fn delete_user(db: &MongoDB, id: &str) -> Result<u64, AppError> {
    let oid = ObjectId::parse_str(id)
        .map_err(|_| AppError::NotFound(format!("no user matches id {}", id)))?;

    let collection = db.collection::<User>(USERS);
    let result = collection.delete_one(doc! { "_id": oid }).await?;

    Ok(result.deleted_count)
}
