use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// Contact-form submission in the "contacts" collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Contact {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    #[serde(flatten, default, skip_serializing_if = "Document::is_empty")]
    pub extra: Document,
}
