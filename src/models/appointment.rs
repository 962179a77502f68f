use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// Service-catalog entry in the "AppointmentOptions" collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppointmentOption {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub service_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub slots: Option<Vec<String>>,
    #[serde(flatten, default, skip_serializing_if = "Document::is_empty")]
    pub extra: Document,
}

/// Projection of the catalog down to service names, used when a doctor
/// picks a specialty.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Specialty {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub service_name: String,
}
