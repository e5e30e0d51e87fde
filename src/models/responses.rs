//! Response models for the gateway endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Detail view of one user record.
///
/// Optional platform fields resolve to empty strings; the `password`
/// field always carries the fixed mask, never the stored credential.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDetail {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub company: String,
    pub supplier_code: String,

    /// Primary role label: first platform-returned role, or empty.
    pub role: String,

    /// All assigned role names, in platform order.
    pub roles: Vec<String>,

    /// Identity that last modified the record.
    pub updated_by: String,

    /// Last-modified timestamp, stringified.
    pub updated_at: String,

    pub enabled: bool,

    /// Notification preference, 0 when unset on the platform.
    pub notify: i64,

    /// `"ACTIVE"` when enabled, else `"INACTIVE"`.
    pub status: String,

    /// Always the fixed masked placeholder.
    pub password: String,
}

/// Result of an update-user call.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserResponse {
    /// `"User details updated"` or `"No changes were made"`.
    pub message: String,

    /// The (possibly updated) username.
    pub username: String,

    /// The (possibly updated) email.
    pub email: String,
}

/// Result of a rename-user call.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RenameUserResponse {
    /// Confirmation naming both identifiers.
    pub message: String,
}

/// Purchase-order count as reported by the platform.
pub type PurchaseOrderCount = u64;
