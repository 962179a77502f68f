use crate::database::{MongoDB, BOOKINGS};
use crate::models::Booking;
use crate::utils::AppError;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::error::{ErrorKind, WriteFailure};

const SLOT_TAKEN: &str = "Slot already booked for this service";

/// Exact-match filter over the booking uniqueness tuple.
pub fn conflict_filter(candidate: &Booking) -> Document {
    doc! {
        "appointmentDate": &candidate.appointment_date,
        "slot": &candidate.slot,
        "treatmentName": &candidate.treatment_name,
    }
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    matches!(
        e.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000
    )
}

/// The conflict decision itself, separated from the store lookup: any
/// existing booking on the tuple rejects the candidate.
pub(crate) fn ensure_slot_free(existing: Option<&Booking>) -> Result<(), AppError> {
    match existing {
        Some(_) => Err(AppError::Conflict(SLOT_TAKEN.to_string())),
        None => Ok(()),
    }
}

/// Booking uniqueness guard: reject the candidate when any existing booking
/// already occupies the same (appointmentDate, slot, treatmentName) tuple.
///
/// The check and the insert are two separate store calls. The unique compound
/// index created at startup closes the race between identical concurrent
/// requests: the loser's insert fails with a duplicate-key error, which maps
/// to the same Conflict the check would have produced.
pub async fn create_booking(db: &MongoDB, candidate: &Booking) -> Result<String, AppError> {
    let collection = db.collection::<Booking>(BOOKINGS);

    let existing = collection.find_one(conflict_filter(candidate)).await?;
    ensure_slot_free(existing.as_ref())?;

    match collection.insert_one(candidate).await {
        Ok(result) => Ok(result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .unwrap_or_else(|| result.inserted_id.to_string())),
        Err(e) if is_duplicate_key(&e) => Err(AppError::Conflict(SLOT_TAKEN.to_string())),
        Err(e) => Err(e.into()),
    }
}

pub async fn bookings_by_email(db: &MongoDB, email: &str) -> Result<Vec<Booking>, AppError> {
    let collection = db.collection::<Booking>(BOOKINGS);

    let bookings = collection
        .find(doc! { "email": email })
        .await?
        .try_collect()
        .await?;

    Ok(bookings)
}

pub async fn all_bookings(db: &MongoDB) -> Result<Vec<Booking>, AppError> {
    let collection = db.collection::<Booking>(BOOKINGS);

    let bookings = collection.find(doc! {}).await?.try_collect().await?;

    Ok(bookings)
}

pub async fn delete_booking(db: &MongoDB, id: &str) -> Result<u64, AppError> {
    let oid = ObjectId::parse_str(id)
        .map_err(|_| AppError::NotFound(format!("no booking matches id {}", id)))?;

    let collection = db.collection::<Booking>(BOOKINGS);
    let result = collection.delete_one(doc! { "_id": oid }).await?;

    Ok(result.deleted_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Document;

    fn sample_booking() -> Booking {
        Booking {
            id: None,
            email: "patient@example.com".into(),
            appointment_date: "2026-09-01".into(),
            slot: "10.00 AM - 10.30 AM".into(),
            treatment_name: "Teeth Cleaning".into(),
            extra: Document::new(),
        }
    }

    #[test]
    fn test_conflict_filter_covers_exactly_the_tuple() {
        let filter = conflict_filter(&sample_booking());
        assert_eq!(
            filter,
            doc! {
                "appointmentDate": "2026-09-01",
                "slot": "10.00 AM - 10.30 AM",
                "treatmentName": "Teeth Cleaning",
            }
        );
        // The caller's email must not narrow the check: the slot is taken for
        // everyone, not just for the same patient.
        assert!(!filter.contains_key("email"));
    }

    #[test]
    fn test_taken_slot_is_rejected_with_conflict() {
        let taken = sample_booking();
        let result = ensure_slot_free(Some(&taken));
        match result {
            Err(AppError::Conflict(message)) => {
                assert_eq!(message, "Slot already booked for this service");
                assert_eq!(
                    AppError::Conflict(message).status_code(),
                    actix_web::http::StatusCode::BAD_REQUEST
                );
            }
            other => panic!("expected a conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_free_slot_is_accepted() {
        assert!(ensure_slot_free(None).is_ok());
    }
}
