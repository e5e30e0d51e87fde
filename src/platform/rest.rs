//! REST implementation of the document-platform contract.
//!
//! Talks to the host platform's HTTP API:
//!
//! - `GET  /api/resource/{doctype}` — filtered listing, `{"data": [...]}`
//! - `GET  /api/resource/{doctype}/{name}` — full record, `{"data": {...}}`
//! - `PUT  /api/resource/{doctype}/{name}` — save
//! - method endpoints under `/api/method/` for rename, password update,
//!   role resolution, error logging, counting and commit, returning
//!   `{"message": ...}`
//!
//! Authentication uses the platform's token scheme
//! (`Authorization: token <key>:<secret>`).

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::{DocumentPlatform, PlatformError};
use crate::config::PlatformConfig;

/// HTTP client for the document platform.
pub struct RestPlatform {
    base_url: String,
    auth_header: String,
    client: Client,
}

impl std::fmt::Debug for RestPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestPlatform")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl RestPlatform {
    /// Build a client from configuration.
    pub fn new(config: &PlatformConfig) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.read_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| PlatformError::Upstream(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_header: format!("token {}:{}", config.api_key, config.api_secret),
            client,
        })
    }

    fn resource_url(&self, doctype: &str, name: Option<&str>) -> String {
        match name {
            Some(name) => format!("{}/api/resource/{}/{}", self.base_url, doctype, name),
            None => format!("{}/api/resource/{}", self.base_url, doctype),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/api/method/{}", self.base_url, method)
    }

    /// Extract the platform's message text from an error response body,
    /// falling back to the HTTP status line.
    async fn error_message(response: Response) -> String {
        let status = response.status();
        match response.json::<Value>().await {
            Ok(body) => body
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("platform returned {status}")),
            Err(_) => format!("platform returned {status}"),
        }
    }

    /// Map a completed response to the `data` payload of a resource call.
    async fn data_payload(response: Response) -> Result<Value, PlatformError> {
        let body: Value = response
            .json()
            .await
            .map_err(|e| PlatformError::Upstream(format!("malformed platform response: {e}")))?;
        Ok(body.get("data").cloned().unwrap_or(Value::Null))
    }

    /// Map a completed response to the `message` payload of a method call.
    async fn message_payload(response: Response) -> Result<Value, PlatformError> {
        let body: Value = response
            .json()
            .await
            .map_err(|e| PlatformError::Upstream(format!("malformed platform response: {e}")))?;
        Ok(body.get("message").cloned().unwrap_or(Value::Null))
    }
}

#[async_trait]
impl DocumentPlatform for RestPlatform {
    #[instrument(skip_all, fields(doctype = %doctype))]
    async fn get_all(
        &self,
        doctype: &str,
        fields: &[&str],
        filters: &Value,
        order_by: Option<&str>,
        limit_start: u64,
        limit_page_length: Option<u64>,
    ) -> Result<Vec<Value>, PlatformError> {
        let mut query: Vec<(&str, String)> = vec![
            ("fields", json!(fields).to_string()),
            ("filters", filters.to_string()),
            ("limit_start", limit_start.to_string()),
        ];
        if let Some(order_by) = order_by {
            query.push(("order_by", order_by.to_string()));
        }
        if let Some(limit) = limit_page_length {
            query.push(("limit_page_length", limit.to_string()));
        }

        let response = self
            .client
            .get(self.resource_url(doctype, None))
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .query(&query)
            .send()
            .await
            .map_err(|e| PlatformError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PlatformError::Upstream(Self::error_message(response).await));
        }

        match Self::data_payload(response).await? {
            Value::Array(records) => Ok(records),
            other => Err(PlatformError::Upstream(format!(
                "expected a record list, got: {other}"
            ))),
        }
    }

    #[instrument(skip_all, fields(doctype = %doctype, name = %name))]
    async fn get_doc(&self, doctype: &str, name: &str) -> Result<Value, PlatformError> {
        let response = self
            .client
            .get(self.resource_url(doctype, Some(name)))
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .send()
            .await
            .map_err(|e| PlatformError::Upstream(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(PlatformError::not_found(doctype, name));
        }
        if !response.status().is_success() {
            return Err(PlatformError::Upstream(Self::error_message(response).await));
        }

        Self::data_payload(response).await
    }

    #[instrument(skip_all, fields(doctype = %doctype, name = %name))]
    async fn save_doc(&self, doctype: &str, name: &str, doc: &Value) -> Result<(), PlatformError> {
        let response = self
            .client
            .put(self.resource_url(doctype, Some(name)))
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .json(doc)
            .send()
            .await
            .map_err(|e| PlatformError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PlatformError::Upstream(Self::error_message(response).await));
        }
        Ok(())
    }

    #[instrument(skip_all)]
    async fn commit(&self) -> Result<(), PlatformError> {
        let response = self
            .client
            .post(self.method_url("commit"))
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .send()
            .await
            .map_err(|e| PlatformError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PlatformError::Upstream(Self::error_message(response).await));
        }
        Ok(())
    }

    #[instrument(skip_all, fields(doctype = %doctype, old = %old_name, new = %new_name))]
    async fn rename_doc(
        &self,
        doctype: &str,
        old_name: &str,
        new_name: &str,
        force: bool,
    ) -> Result<String, PlatformError> {
        let response = self
            .client
            .post(self.method_url("rename_doc"))
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .json(&json!({
                "doctype": doctype,
                "old_name": old_name,
                "new_name": new_name,
                "force": force,
            }))
            .send()
            .await
            .map_err(|e| PlatformError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PlatformError::Upstream(Self::error_message(response).await));
        }

        match Self::message_payload(response).await? {
            Value::String(new_name) => Ok(new_name),
            _ => Ok(new_name.to_string()),
        }
    }

    #[instrument(skip_all, fields(user = %user))]
    async fn update_password(&self, user: &str, new_password: &str) -> Result<(), PlatformError> {
        let response = self
            .client
            .post(self.method_url("update_password"))
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .json(&json!({ "user": user, "new_password": new_password }))
            .send()
            .await
            .map_err(|e| PlatformError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PlatformError::Upstream(Self::error_message(response).await));
        }
        Ok(())
    }

    #[instrument(skip_all, fields(user = %user))]
    async fn get_roles(&self, user: &str) -> Result<Vec<String>, PlatformError> {
        let response = self
            .client
            .get(self.method_url("get_roles"))
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .query(&[("user", user)])
            .send()
            .await
            .map_err(|e| PlatformError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PlatformError::Upstream(Self::error_message(response).await));
        }

        match Self::message_payload(response).await? {
            Value::Array(roles) => Ok(roles
                .into_iter()
                .filter_map(|r| r.as_str().map(str::to_string))
                .collect()),
            _ => Ok(Vec::new()),
        }
    }

    async fn log_error(&self, message: &str, title: &str) {
        // Best-effort: a failed diagnostic write must not fail the request.
        let result = self
            .client
            .post(self.method_url("log_error"))
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .json(&json!({ "message": message, "title": title }))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                debug!(title = %title, "Recorded platform error log entry");
            }
            Ok(response) => {
                warn!(title = %title, status = %response.status(), "Platform error log write rejected");
            }
            Err(e) => {
                warn!(title = %title, error = %e, "Platform error log write failed");
            }
        }
    }

    #[instrument(skip_all, fields(doctype = %doctype))]
    async fn count(&self, doctype: &str) -> Result<u64, PlatformError> {
        let response = self
            .client
            .get(self.method_url("count"))
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .query(&[("doctype", doctype)])
            .send()
            .await
            .map_err(|e| PlatformError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PlatformError::Upstream(Self::error_message(response).await));
        }

        match Self::message_payload(response).await? {
            Value::Number(n) => n
                .as_u64()
                .ok_or_else(|| PlatformError::Upstream(format!("invalid count: {n}"))),
            other => Err(PlatformError::Upstream(format!(
                "expected a count, got: {other}"
            ))),
        }
    }
}
