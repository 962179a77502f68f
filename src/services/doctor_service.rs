use crate::database::{MongoDB, DOCTORS_INFO, USERS};
use crate::models::{DoctorInfo, User};
use crate::services::user_service::UpdateOutcome;
use crate::utils::AppError;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::Serialize;

/// Combined outcome of the cascade delete. No transaction wraps the two
/// deletes; both results are reported as-is.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeDeleteResult {
    pub deleted_doctor: u64,
    pub deleted_user: u64,
}

pub async fn add_info(db: &MongoDB, doctor: &DoctorInfo) -> Result<String, AppError> {
    let collection = db.collection::<DoctorInfo>(DOCTORS_INFO);

    let result = collection.insert_one(doctor).await?;

    Ok(result
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_else(|| result.inserted_id.to_string()))
}

pub async fn list_info(db: &MongoDB) -> Result<Vec<DoctorInfo>, AppError> {
    let collection = db.collection::<DoctorInfo>(DOCTORS_INFO);

    let doctors = collection.find(doc! {}).await?.try_collect().await?;

    Ok(doctors)
}

pub async fn find_by_email(db: &MongoDB, email: &str) -> Result<Option<DoctorInfo>, AppError> {
    let collection = db.collection::<DoctorInfo>(DOCTORS_INFO);

    Ok(collection.find_one(doc! { "email": email }).await?)
}

pub async fn update_info(
    db: &MongoDB,
    id: &str,
    mut updated: Document,
) -> Result<UpdateOutcome, AppError> {
    let oid = ObjectId::parse_str(id)
        .map_err(|_| AppError::NotFound(format!("no doctor matches id {}", id)))?;

    updated.remove("_id");

    let collection = db.collection::<DoctorInfo>(DOCTORS_INFO);
    let result = collection
        .update_one(doc! { "_id": oid }, doc! { "$set": updated })
        .await?;

    Ok(UpdateOutcome {
        matched_count: result.matched_count,
        modified_count: result.modified_count,
    })
}

/// Deletes a doctor profile and cascades to the User sharing its email.
///
/// If the linked user is already gone the profile deletion still succeeds and
/// `deleted_user` reports zero. A store failure on the second delete is
/// logged and reported the same way rather than rolled back.
pub async fn delete_with_user(db: &MongoDB, id: &str) -> Result<CascadeDeleteResult, AppError> {
    let oid = ObjectId::parse_str(id)
        .map_err(|_| AppError::NotFound(format!("no doctor matches id {}", id)))?;

    let doctors = db.collection::<DoctorInfo>(DOCTORS_INFO);

    let doctor = doctors
        .find_one(doc! { "_id": oid })
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no doctor matches id {}", id)))?;

    let doctor_result = doctors.delete_one(doc! { "_id": oid }).await?;

    let users = db.collection::<User>(USERS);
    let user_delete = users
        .delete_one(doc! { "email": &doctor.email })
        .await
        .map(|result| result.deleted_count)
        .map_err(AppError::from);

    Ok(cascade_outcome(
        doctor_result.deleted_count,
        user_delete,
        &doctor.email,
    ))
}

/// Folds the two delete results into the combined report. The profile delete
/// has already succeeded by the time this runs, so a failed user delete is
/// logged and counted as zero rather than surfaced as an error.
fn cascade_outcome(
    deleted_doctor: u64,
    user_delete: Result<u64, AppError>,
    email: &str,
) -> CascadeDeleteResult {
    let deleted_user = match user_delete {
        Ok(count) => count,
        Err(e) => {
            log::warn!("⚠️  Doctor deleted but user cleanup for {} failed: {}", email, e);
            0
        }
    };

    CascadeDeleteResult {
        deleted_doctor,
        deleted_user,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cascade_reports_zero_when_no_user_shares_the_email() {
        let outcome = cascade_outcome(1, Ok(0), "gone@example.com");
        assert_eq!(outcome.deleted_doctor, 1);
        assert_eq!(outcome.deleted_user, 0);
    }

    #[test]
    fn test_cascade_counts_the_linked_user() {
        let outcome = cascade_outcome(1, Ok(1), "doc@example.com");
        assert_eq!(outcome.deleted_doctor, 1);
        assert_eq!(outcome.deleted_user, 1);
    }

    #[test]
    fn test_failed_user_cleanup_is_not_rolled_back() {
        let failure = Err(AppError::DatabaseError("connection reset".into()));
        let outcome = cascade_outcome(1, failure, "doc@example.com");
        // The profile is already gone; the report says so and the user count
        // stays at zero instead of the whole call erroring out.
        assert_eq!(outcome.deleted_doctor, 1);
        assert_eq!(outcome.deleted_user, 0);
    }
}
