//! Request models for the gateway endpoints.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing users.
///
/// `filters` arrives as serialized JSON text (a structured predicate list)
/// and is deserialized by the service; malformed text fails the request
/// with a parse error.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListUsersQuery {
    /// Filter expression as serialized JSON (optional).
    #[serde(default)]
    pub filters: Option<String>,

    /// Sort expression (default: creation time, descending).
    #[serde(default)]
    pub order_by: Option<String>,

    /// Page size (default: 20, max: 100).
    #[serde(default)]
    pub page_size: Option<u64>,

    /// 1-indexed page number (default: 1).
    #[serde(default)]
    pub page: Option<u64>,
}

impl ListUsersQuery {
    /// Default page size.
    pub const DEFAULT_PAGE_SIZE: u64 = 20;

    /// Maximum allowed page size.
    pub const MAX_PAGE_SIZE: u64 = 100;

    /// Default sort expression.
    pub const DEFAULT_ORDER_BY: &'static str = "creation desc";

    /// Get the page size, clamped to valid range.
    #[must_use]
    pub fn page_size(&self) -> u64 {
        self.page_size
            .unwrap_or(Self::DEFAULT_PAGE_SIZE)
            .clamp(1, Self::MAX_PAGE_SIZE)
    }

    /// Get the 1-indexed page number, defaulting to the first page.
    #[must_use]
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Zero-based offset for the platform query: `(page - 1) * page_size`,
    /// saturating so an absurd page number cannot overflow.
    #[must_use]
    pub fn offset(&self) -> u64 {
        (self.page() - 1).saturating_mul(self.page_size())
    }

    /// Sort expression to send to the platform.
    #[must_use]
    pub fn order_by(&self) -> &str {
        self.order_by.as_deref().unwrap_or(Self::DEFAULT_ORDER_BY)
    }
}

/// Request to update an existing user. Every field is optional; a value
/// equal to the current one is not counted as a change.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    /// New username (optional).
    #[serde(default)]
    pub username: Option<String>,

    /// New email address (optional).
    #[serde(default)]
    pub email: Option<String>,

    /// New password (optional, delegated to the platform unconditionally).
    #[serde(default)]
    pub password: Option<String>,

    /// New phone number (optional).
    #[serde(default)]
    pub phone: Option<String>,

    /// New role (optional, replaces the whole assignment set).
    #[serde(default)]
    pub role: Option<String>,
}

/// Request to rename a user record.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RenameUserRequest {
    /// The new identifier, validated as an email address shape.
    pub new_name: String,
}
