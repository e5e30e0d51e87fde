//! The document-platform seam.
//!
//! Every operation the gateway performs goes through [`DocumentPlatform`],
//! a black-box contract over the host platform's document API: generic
//! record listing and lookup, save with an explicit commit step, rename,
//! password update, role resolution, diagnostic logging and counting.
//!
//! Records cross this boundary as raw JSON values; typed models are
//! resolved from them at the data-model boundary (`models::user`).

pub mod rest;

use async_trait::async_trait;
use serde_json::Value;

pub use rest::RestPlatform;

/// Errors surfaced by the document platform.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The requested record does not exist.
    #[error("{doctype} {name} not found")]
    NotFound {
        /// Record type that was looked up.
        doctype: String,
        /// Identifier that was looked up.
        name: String,
    },

    /// Any other platform failure, carrying the platform's message text
    /// unmodified.
    #[error("{0}")]
    Upstream(String),
}

impl PlatformError {
    /// Shorthand for a not-found error.
    pub fn not_found(doctype: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            doctype: doctype.into(),
            name: name.into(),
        }
    }
}

/// Contract with the external document platform.
///
/// The gateway treats the platform as a black box: it never interprets
/// record contents beyond deserializing the fields it projects, and it
/// never retries a failed call.
#[async_trait]
pub trait DocumentPlatform: Send + Sync {
    /// Filtered, ordered, paginated listing of records of one type,
    /// projecting the given fields.
    async fn get_all(
        &self,
        doctype: &str,
        fields: &[&str],
        filters: &Value,
        order_by: Option<&str>,
        limit_start: u64,
        limit_page_length: Option<u64>,
    ) -> Result<Vec<Value>, PlatformError>;

    /// Full record lookup. Fails with [`PlatformError::NotFound`] when the
    /// record is absent.
    async fn get_doc(&self, doctype: &str, name: &str) -> Result<Value, PlatformError>;

    /// Persist a (possibly modified) record. Durability requires a
    /// subsequent [`DocumentPlatform::commit`].
    async fn save_doc(&self, doctype: &str, name: &str, doc: &Value) -> Result<(), PlatformError>;

    /// Commit the current platform transaction.
    async fn commit(&self) -> Result<(), PlatformError>;

    /// Rename a record, cascading reference updates. With `force` the
    /// platform proceeds even when conflicts would otherwise block it.
    /// Returns the new identifier.
    async fn rename_doc(
        &self,
        doctype: &str,
        old_name: &str,
        new_name: &str,
        force: bool,
    ) -> Result<String, PlatformError>;

    /// Update a user's credential through the platform's password
    /// machinery. The gateway never sees or stores the hash.
    async fn update_password(&self, user: &str, new_password: &str) -> Result<(), PlatformError>;

    /// Resolve the set of role names held by an identity.
    async fn get_roles(&self, user: &str) -> Result<Vec<String>, PlatformError>;

    /// Best-effort diagnostic record in the platform's error log. Failures
    /// here are swallowed; the write must never block or fail the request.
    async fn log_error(&self, message: &str, title: &str);

    /// Count of all records of one type.
    async fn count(&self, doctype: &str) -> Result<u64, PlatformError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_names_the_record() {
        let err = PlatformError::not_found("User", "a@x.com");
        assert_eq!(err.to_string(), "User a@x.com not found");
    }

    #[test]
    fn upstream_display_preserves_message_text() {
        let err = PlatformError::Upstream("Document has been modified".to_string());
        assert_eq!(err.to_string(), "Document has been modified");
    }
}
