//! Shared test helpers: an in-memory document platform that records every
//! call, plus router and request plumbing.

// Each suite pulls in the subset it needs.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

use account_gateway::middleware::{CallerContext, CALLER_HEADER};
use account_gateway::platform::{DocumentPlatform, PlatformError};
use account_gateway::{purchase_orders_router, users_router, GatewayState};

/// One recorded platform call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetAll {
        doctype: String,
        fields: Vec<String>,
        filters: Value,
        order_by: Option<String>,
        limit_start: u64,
        limit_page_length: Option<u64>,
    },
    GetDoc {
        doctype: String,
        name: String,
    },
    SaveDoc {
        doctype: String,
        name: String,
        doc: Value,
    },
    Commit,
    RenameDoc {
        doctype: String,
        old_name: String,
        new_name: String,
        force: bool,
    },
    UpdatePassword {
        user: String,
    },
    GetRoles {
        user: String,
    },
    LogError {
        message: String,
        title: String,
    },
    Count {
        doctype: String,
    },
}

/// In-memory platform double. Seed it with list rows, full docs and role
/// assignments; inspect `calls` afterwards.
#[derive(Default)]
pub struct MockPlatform {
    /// Rows returned by `get_all("User", ...)`.
    pub users: Mutex<Vec<Value>>,
    /// Full documents served by `get_doc("User", name)`.
    pub docs: Mutex<HashMap<String, Value>>,
    /// Role names per user, serving both `Has Role` lookups and
    /// `get_roles`.
    pub roles: Mutex<HashMap<String, Vec<String>>>,
    /// Value returned by `count`.
    pub count: Mutex<u64>,
    /// Injected failures keyed by method name.
    pub failures: Mutex<HashMap<&'static str, String>>,
    /// Every platform call, in order.
    pub calls: Mutex<Vec<Call>>,
}

impl MockPlatform {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_user_row(&self, row: Value) {
        self.users.lock().unwrap().push(row);
    }

    pub fn add_doc(&self, name: &str, doc: Value) {
        self.docs.lock().unwrap().insert(name.to_string(), doc);
    }

    pub fn set_roles(&self, user: &str, roles: &[&str]) {
        self.roles
            .lock()
            .unwrap()
            .insert(user.to_string(), roles.iter().map(|r| r.to_string()).collect());
    }

    pub fn set_count(&self, count: u64) {
        *self.count.lock().unwrap() = count;
    }

    /// Make the named method fail with an upstream error.
    pub fn fail(&self, method: &'static str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(method, message.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls of one kind, by discriminant name.
    pub fn calls_named(&self, name: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| call_name(c) == name)
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn injected(&self, method: &'static str) -> Result<(), PlatformError> {
        match self.failures.lock().unwrap().get(method) {
            Some(message) => Err(PlatformError::Upstream(message.clone())),
            None => Ok(()),
        }
    }
}

pub fn call_name(call: &Call) -> &'static str {
    match call {
        Call::GetAll { .. } => "get_all",
        Call::GetDoc { .. } => "get_doc",
        Call::SaveDoc { .. } => "save_doc",
        Call::Commit => "commit",
        Call::RenameDoc { .. } => "rename_doc",
        Call::UpdatePassword { .. } => "update_password",
        Call::GetRoles { .. } => "get_roles",
        Call::LogError { .. } => "log_error",
        Call::Count { .. } => "count",
    }
}

#[async_trait]
impl DocumentPlatform for MockPlatform {
    async fn get_all(
        &self,
        doctype: &str,
        fields: &[&str],
        filters: &Value,
        order_by: Option<&str>,
        limit_start: u64,
        limit_page_length: Option<u64>,
    ) -> Result<Vec<Value>, PlatformError> {
        self.record(Call::GetAll {
            doctype: doctype.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
            filters: filters.clone(),
            order_by: order_by.map(str::to_string),
            limit_start,
            limit_page_length,
        });
        self.injected("get_all")?;

        match doctype {
            "User" => Ok(self.users.lock().unwrap().clone()),
            "Has Role" => {
                let parent = filters
                    .get("parent")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                Ok(self
                    .roles
                    .lock()
                    .unwrap()
                    .get(parent)
                    .map(|roles| roles.iter().map(|r| json!({ "role": r })).collect())
                    .unwrap_or_default())
            }
            _ => Ok(Vec::new()),
        }
    }

    async fn get_doc(&self, doctype: &str, name: &str) -> Result<Value, PlatformError> {
        self.record(Call::GetDoc {
            doctype: doctype.to_string(),
            name: name.to_string(),
        });
        self.injected("get_doc")?;

        self.docs
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| PlatformError::not_found(doctype, name))
    }

    async fn save_doc(&self, doctype: &str, name: &str, doc: &Value) -> Result<(), PlatformError> {
        self.record(Call::SaveDoc {
            doctype: doctype.to_string(),
            name: name.to_string(),
            doc: doc.clone(),
        });
        self.injected("save_doc")
    }

    async fn commit(&self) -> Result<(), PlatformError> {
        self.record(Call::Commit);
        self.injected("commit")
    }

    async fn rename_doc(
        &self,
        doctype: &str,
        old_name: &str,
        new_name: &str,
        force: bool,
    ) -> Result<String, PlatformError> {
        self.record(Call::RenameDoc {
            doctype: doctype.to_string(),
            old_name: old_name.to_string(),
            new_name: new_name.to_string(),
            force,
        });
        self.injected("rename_doc")?;
        Ok(new_name.to_string())
    }

    async fn update_password(&self, user: &str, _new_password: &str) -> Result<(), PlatformError> {
        self.record(Call::UpdatePassword {
            user: user.to_string(),
        });
        self.injected("update_password")
    }

    async fn get_roles(&self, user: &str) -> Result<Vec<String>, PlatformError> {
        self.record(Call::GetRoles {
            user: user.to_string(),
        });
        self.injected("get_roles")?;
        Ok(self
            .roles
            .lock()
            .unwrap()
            .get(user)
            .cloned()
            .unwrap_or_default())
    }

    async fn log_error(&self, message: &str, title: &str) {
        self.record(Call::LogError {
            message: message.to_string(),
            title: title.to_string(),
        });
    }

    async fn count(&self, doctype: &str) -> Result<u64, PlatformError> {
        self.record(Call::Count {
            doctype: doctype.to_string(),
        });
        self.injected("count")?;
        Ok(*self.count.lock().unwrap())
    }
}

/// Identity used by default in router tests.
pub const TEST_CALLER: &str = "admin@x.com";

/// Caller context for service-level tests.
pub fn caller_with_roles(roles: &[&str]) -> CallerContext {
    CallerContext {
        user: TEST_CALLER.to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}

/// A full user document as the platform would return it.
pub fn user_doc(name: &str) -> Value {
    json!({
        "name": name,
        "username": "jdoe",
        "email": name,
        "first_name": "Jane",
        "last_name": "Doe",
        "enabled": 1,
        "modified": "2025-06-01 10:15:00.000000",
        "modified_by": "ops@x.com",
        "roles": [{"role": "Employee"}],
        "language": "en"
    })
}

/// Router covering both endpoint groups, as the binary nests them.
pub fn app(platform: Arc<MockPlatform>) -> Router {
    let state = GatewayState::new(platform);
    Router::new()
        .nest("/users", users_router(state.clone()))
        .nest("/purchase-orders", purchase_orders_router(state))
}

/// Authenticated GET request.
pub async fn get(router: Router, uri: &str) -> Response<axum::body::Body> {
    let request = Request::builder()
        .uri(uri)
        .header(CALLER_HEADER, TEST_CALLER)
        .body(Body::empty())
        .unwrap();
    router.oneshot(request).await.unwrap()
}

/// Authenticated request with a JSON body.
pub async fn send_json(
    router: Router,
    method: &str,
    uri: &str,
    body: Value,
) -> Response<axum::body::Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CALLER_HEADER, TEST_CALLER)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    router.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<axum::body::Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
