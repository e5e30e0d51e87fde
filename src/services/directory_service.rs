//! Account directory operations.
//!
//! One service backs all gateway endpoints. Each operation validates its
//! inputs, delegates to the document platform and shapes the result;
//! nothing is kept beyond the lifetime of a single request.

use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::GatewayError;
use crate::middleware::CallerContext;
use crate::models::{
    ListUsersQuery, RenameUserRequest, RoleAssignment, UpdateUserRequest, UpdateUserResponse,
    UserDetail, UserRecord, UserSummary, MASKED_PASSWORD,
};
use crate::platform::{DocumentPlatform, PlatformError};
use crate::validation::is_email_shaped;

/// Record type names on the platform.
const USER_DOCTYPE: &str = "User";
const HAS_ROLE_DOCTYPE: &str = "Has Role";
const PURCHASE_ORDER_DOCTYPE: &str = "Purchase Order";

/// Field set projected by the list operation.
const USER_LIST_FIELDS: &[&str] = &[
    "name",
    "username",
    "email",
    "enabled",
    "first_name",
    "last_name",
];

/// Roles allowed to update user details. Holding any one suffices.
const PRIVILEGED_ROLES: &[&str] = &["System Manager", "HR Manager"];

/// Roles a caller may only assign when already holding them personally.
const RESTRICTED_ROLES: &[&str] = &["System Manager"];

/// Diagnostic-log titles for the mutating operations.
const UPDATE_ERROR_TITLE: &str = "update_user_details error";
const RENAME_ERROR_TITLE: &str = "rename_user error";

/// Service implementing the directory operations over the platform seam.
pub struct DirectoryService {
    platform: Arc<dyn DocumentPlatform>,
}

impl DirectoryService {
    /// Create a service over the given platform.
    pub fn new(platform: Arc<dyn DocumentPlatform>) -> Self {
        Self { platform }
    }

    /// Paginated, filtered user listing, each row augmented with its
    /// assigned role names.
    ///
    /// Malformed `filters` text fails with a parse error; platform
    /// failures on this read path propagate unwrapped.
    pub async fn list_users(
        &self,
        query: &ListUsersQuery,
    ) -> Result<Vec<UserSummary>, GatewayError> {
        let filters = match query.filters.as_deref() {
            Some(raw) if !raw.trim().is_empty() => {
                serde_json::from_str::<Value>(raw).map_err(|e| GatewayError::Parse(e.to_string()))?
            }
            _ => json!([]),
        };

        let rows = self
            .platform
            .get_all(
                USER_DOCTYPE,
                USER_LIST_FIELDS,
                &filters,
                Some(query.order_by()),
                query.offset(),
                Some(query.page_size()),
            )
            .await?;

        let mut users = Vec::with_capacity(rows.len());
        for row in rows {
            let mut summary: UserSummary = decode(row)?;
            summary.roles = self.roles_for(&summary.name).await?;
            users.push(summary);
        }

        Ok(users)
    }

    /// Single-user lookup with sensitive fields masked.
    pub async fn user_detail(&self, user_name: &str) -> Result<UserDetail, GatewayError> {
        if user_name.trim().is_empty() {
            return Err(GatewayError::Validation("User name is required".to_string()));
        }

        let record: UserRecord = decode(self.platform.get_doc(USER_DOCTYPE, user_name).await?)?;
        let roles = self.roles_for(&record.name).await?;

        Ok(UserDetail {
            username: record.username,
            email: record.email,
            first_name: record.first_name,
            last_name: record.last_name,
            phone: record.phone,
            company: record.company,
            supplier_code: record.supplier_code,
            role: roles.first().cloned().unwrap_or_default(),
            roles,
            updated_by: record.modified_by,
            updated_at: record.modified,
            enabled: record.enabled,
            notify: record.send_welcome_email,
            status: if record.enabled { "ACTIVE" } else { "INACTIVE" }.to_string(),
            password: MASKED_PASSWORD.to_string(),
        })
    }

    /// Permission-gated partial update of a user record.
    ///
    /// Both permission checks run before the target record is loaded. The
    /// record is saved and committed only when at least one field actually
    /// changed; a provided password always counts as a change.
    pub async fn update_user(
        &self,
        caller: &CallerContext,
        user_name: &str,
        request: &UpdateUserRequest,
    ) -> Result<UpdateUserResponse, GatewayError> {
        if user_name.trim().is_empty() {
            return Err(GatewayError::Validation("User name is required".to_string()));
        }

        if !PRIVILEGED_ROLES.iter().any(|r| caller.has_role(r)) {
            return Err(GatewayError::Forbidden(
                "You are not permitted to update user details".to_string(),
            ));
        }

        // Assigning a restricted role requires the caller to already hold
        // that role themselves.
        if let Some(role) = request.role.as_deref() {
            if RESTRICTED_ROLES.contains(&role) && !caller.has_role(role) {
                return Err(GatewayError::Forbidden(format!(
                    "You are not permitted to assign the {role} role"
                )));
            }
        }

        let loaded = self.platform.get_doc(USER_DOCTYPE, user_name).await;
        let mut record: UserRecord = decode(self.report(UPDATE_ERROR_TITLE, loaded).await?)?;

        let mut changed = false;

        if let Some(username) = request.username.as_deref() {
            if username != record.username {
                record.username = username.to_string();
                changed = true;
            }
        }
        if let Some(email) = request.email.as_deref() {
            if email != record.email {
                record.email = email.to_string();
                changed = true;
            }
        }
        if let Some(phone) = request.phone.as_deref() {
            if phone != record.phone {
                record.phone = phone.to_string();
                changed = true;
            }
        }

        // Role updates replace the whole assignment set with the single
        // new role. Long-standing platform behavior, kept as-is.
        if let Some(role) = request.role.as_deref() {
            if !record.has_role(role) {
                record.roles = vec![RoleAssignment::new(role)];
                changed = true;
            }
        }

        if let Some(password) = request.password.as_deref() {
            let updated = self.platform.update_password(&record.name, password).await;
            self.report(UPDATE_ERROR_TITLE, updated).await?;
            changed = true;
        }

        if changed {
            let doc = serde_json::to_value(&record)
                .map_err(|e| GatewayError::Platform(e.to_string()))?;
            let saved = self.platform.save_doc(USER_DOCTYPE, &record.name, &doc).await;
            self.report(UPDATE_ERROR_TITLE, saved).await?;
            let committed = self.platform.commit().await;
            self.report(UPDATE_ERROR_TITLE, committed).await?;

            tracing::info!(user = %record.name, "User details updated");
        }

        Ok(UpdateUserResponse {
            message: if changed {
                "User details updated".to_string()
            } else {
                "No changes were made".to_string()
            },
            username: record.username,
            email: record.email,
        })
    }

    /// Identifier change for a user record, validated as an email shape.
    /// The platform performs the rename (forced) and cascades references.
    pub async fn rename_user(
        &self,
        user_name: &str,
        request: &RenameUserRequest,
    ) -> Result<String, GatewayError> {
        if user_name.trim().is_empty() || request.new_name.trim().is_empty() {
            return Err(GatewayError::Validation(
                "Both the current and the new user name are required".to_string(),
            ));
        }
        if !is_email_shaped(&request.new_name) {
            return Err(GatewayError::Validation(format!(
                "{} is not a valid email address",
                request.new_name
            )));
        }

        let renamed = self
            .platform
            .rename_doc(USER_DOCTYPE, user_name, &request.new_name, true)
            .await;
        let new_name = self.report(RENAME_ERROR_TITLE, renamed).await?;
        let committed = self.platform.commit().await;
        self.report(RENAME_ERROR_TITLE, committed).await?;

        tracing::info!(old = %user_name, new = %new_name, "User renamed");

        Ok(format!("User {user_name} renamed to {new_name}"))
    }

    /// Count of all purchase-order records, as reported by the platform.
    pub async fn purchase_order_count(&self) -> Result<u64, GatewayError> {
        Ok(self.platform.count(PURCHASE_ORDER_DOCTYPE).await?)
    }

    /// Role names assigned to one user, in platform order.
    async fn roles_for(&self, user_name: &str) -> Result<Vec<String>, GatewayError> {
        let rows = self
            .platform
            .get_all(
                HAS_ROLE_DOCTYPE,
                &["role"],
                &json!({ "parent": user_name }),
                None,
                0,
                None,
            )
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                row.get("role")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .collect())
    }

    /// Mutating-path failure handling: record the platform's message in
    /// its diagnostic log, then surface it to the caller unchanged.
    /// NotFound is caller-facing already and propagates without logging.
    async fn report<T>(
        &self,
        title: &str,
        result: Result<T, PlatformError>,
    ) -> Result<T, GatewayError> {
        match result {
            Ok(value) => Ok(value),
            Err(err @ PlatformError::NotFound { .. }) => Err(err.into()),
            Err(PlatformError::Upstream(message)) => {
                self.platform.log_error(&message, title).await;
                Err(GatewayError::Platform(message))
            }
        }
    }
}

/// Resolve a raw platform record into a typed model.
fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, GatewayError> {
    serde_json::from_value(value)
        .map_err(|e| GatewayError::Platform(format!("malformed platform record: {e}")))
}
