use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// Document in the "bookings" collection.
///
/// The uniqueness invariant lives on the (appointmentDate, slot, treatmentName)
/// tuple: no two bookings may hold the same tuple at the same time. Anything
/// the client sends beyond the typed fields (price, patient name, phone) is
/// carried through untouched in `extra`.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(rename = "appointmentDate")]
    pub appointment_date: String,
    pub slot: String,
    #[serde(rename = "treatmentName")]
    pub treatment_name: String,
    #[serde(flatten, default, skip_serializing_if = "Document::is_empty")]
    #[schema(value_type = Object)]
    pub extra: Document,
}
