use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Closed set of roles. Stored lowercase in MongoDB; a missing or unknown
/// role field deserializes to `Role::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    None,
    Doctor,
    Admin,
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Legacy documents may hold arbitrary strings here; anything that is
        // not a known role grants no privileges.
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "admin" => Role::Admin,
            "doctor" => Role::Doctor,
            _ => Role::None,
        })
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::None => "none",
            Role::Doctor => "doctor",
            Role::Admin => "admin",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Role::None)
    }
}

/// Document in the "users" collection. Email is the unique key; regular
/// users carry no role field at all, which maps to `Role::None`.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Role::is_none")]
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(rename = "photoURL", skip_serializing_if = "Option::is_none", default)]
    pub photo_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_missing_role_defaults_to_none() {
        let user: User = mongodb::bson::from_document(doc! { "email": "a@b.com" }).unwrap();
        assert_eq!(user.role, Role::None);
    }

    #[test]
    fn test_known_roles_parse() {
        let admin: User =
            mongodb::bson::from_document(doc! { "email": "a@b.com", "role": "admin" }).unwrap();
        assert_eq!(admin.role, Role::Admin);

        let doctor: User =
            mongodb::bson::from_document(doc! { "email": "d@b.com", "role": "doctor" }).unwrap();
        assert_eq!(doctor.role, Role::Doctor);
    }

    #[test]
    fn test_unknown_role_maps_to_none() {
        let user: User =
            mongodb::bson::from_document(doc! { "email": "a@b.com", "role": "superuser" })
                .unwrap();
        assert_eq!(user.role, Role::None);
    }

    #[test]
    fn test_none_role_not_serialized() {
        let user = User {
            id: None,
            email: "a@b.com".into(),
            role: Role::None,
            name: None,
            photo_url: None,
        };
        let document = mongodb::bson::to_document(&user).unwrap();
        assert!(!document.contains_key("role"));
    }
}
