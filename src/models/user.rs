//! Platform record shapes for the User doctype.
//!
//! The platform stores user records with many optional fields; each one is
//! modeled here with an explicit default so that "absent on the platform"
//! resolves to a well-defined value once, at the serde boundary, instead of
//! ad hoc per call site.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Fixed placeholder substituted for the credential in every detail
/// response. The real value never leaves the platform.
pub const MASKED_PASSWORD: &str = "**********";

/// The platform encodes booleans as 0/1 integers on some doctypes.
fn bool_from_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_i64().unwrap_or(0) != 0),
        Value::Null => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected a boolean or 0/1, got {other}"
        ))),
    }
}

fn int_from_bool<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_i64(i64::from(*value))
}

/// A role-assignment row: the relation between a user record and a role
/// name. Multiple per user; platform-returned order is preserved and the
/// first entry is treated as the user's primary role label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoleAssignment {
    /// The assigned role name.
    pub role: String,
}

impl RoleAssignment {
    /// Build an assignment for one role name.
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into() }
    }
}

/// Full user record as loaded from the platform.
///
/// `extra` retains every platform field the gateway does not interpret, so
/// a load-modify-save cycle never drops them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique record identifier (the platform keys users by email).
    pub name: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub company: String,

    #[serde(default)]
    pub supplier_code: String,

    #[serde(
        default,
        deserialize_with = "bool_from_int",
        serialize_with = "int_from_bool"
    )]
    pub enabled: bool,

    /// Last-modified timestamp, platform-formatted.
    #[serde(default)]
    pub modified: String,

    /// Identity that last modified the record.
    #[serde(default)]
    pub modified_by: String,

    /// Notification preference, 0 when the platform leaves it unset.
    #[serde(default)]
    pub send_welcome_email: i64,

    /// Embedded role-assignment rows.
    #[serde(default)]
    pub roles: Vec<RoleAssignment>,

    /// Uninterpreted platform fields, carried through save unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    /// Role names currently assigned, in platform order.
    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.role.clone()).collect()
    }

    /// Whether the record currently holds the given role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.role == role)
    }
}

/// Projected row returned by the list operation, augmented with the
/// user's role names.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    /// Unique record identifier.
    pub name: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub email: String,

    #[serde(
        default,
        deserialize_with = "bool_from_int",
        serialize_with = "int_from_bool"
    )]
    pub enabled: bool,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    /// Role names assigned to this user, possibly empty.
    #[serde(default)]
    pub roles: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_record_defaults_absent_fields() {
        let record: UserRecord = serde_json::from_value(json!({
            "name": "a@x.com",
            "email": "a@x.com",
            "enabled": 1
        }))
        .unwrap();

        assert_eq!(record.phone, "");
        assert_eq!(record.company, "");
        assert_eq!(record.supplier_code, "");
        assert_eq!(record.send_welcome_email, 0);
        assert!(record.enabled);
        assert!(record.roles.is_empty());
    }

    #[test]
    fn user_record_preserves_unknown_platform_fields() {
        let record: UserRecord = serde_json::from_value(json!({
            "name": "a@x.com",
            "enabled": 0,
            "language": "en",
            "time_zone": "UTC"
        }))
        .unwrap();

        assert_eq!(record.extra["language"], "en");

        let saved = serde_json::to_value(&record).unwrap();
        assert_eq!(saved["time_zone"], "UTC");
        // 0/1 encoding survives the round trip
        assert_eq!(saved["enabled"], 0);
    }

    #[test]
    fn bool_from_int_accepts_both_encodings() {
        let a: UserSummary =
            serde_json::from_value(json!({"name": "a", "enabled": true})).unwrap();
        let b: UserSummary = serde_json::from_value(json!({"name": "b", "enabled": 1})).unwrap();
        let c: UserSummary = serde_json::from_value(json!({"name": "c", "enabled": 0})).unwrap();
        assert!(a.enabled);
        assert!(b.enabled);
        assert!(!c.enabled);
    }

    #[test]
    fn role_helpers() {
        let record: UserRecord = serde_json::from_value(json!({
            "name": "a@x.com",
            "roles": [{"role": "Employee"}, {"role": "HR User"}]
        }))
        .unwrap();

        assert_eq!(record.role_names(), vec!["Employee", "HR User"]);
        assert!(record.has_role("Employee"));
        assert!(!record.has_role("System Manager"));
    }
}
