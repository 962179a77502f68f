use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// Document in the "reviews" collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub comment: Option<String>,
    #[serde(flatten, default, skip_serializing_if = "Document::is_empty")]
    pub extra: Document,
}
