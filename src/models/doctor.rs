use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// Doctor profile in the "doctorsInfo" collection. The email links the
/// profile to its User record; deleting a profile cascades to that user.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DoctorInfo {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub specialty: Option<String>,
    #[serde(flatten, default, skip_serializing_if = "Document::is_empty")]
    pub extra: Document,
}
