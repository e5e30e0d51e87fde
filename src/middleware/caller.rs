//! Caller-context middleware.
//!
//! The host platform authenticates callers and forwards the identity in a
//! trusted header. This middleware reads it, resolves the caller's role
//! set once through the platform, and inserts a [`CallerContext`] request
//! extension so handlers receive identity and roles as explicit
//! parameters rather than reading ambient session state.

use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use std::sync::Arc;

use crate::error::GatewayError;
use crate::platform::DocumentPlatform;

/// Header carrying the authenticated caller identity.
pub const CALLER_HEADER: &str = "x-platform-user";

/// The authenticated caller: identity plus resolved role set.
#[derive(Debug, Clone)]
pub struct CallerContext {
    /// Caller identity as forwarded by the platform.
    pub user: String,

    /// Role names held by the caller.
    pub roles: Vec<String>,
}

impl CallerContext {
    /// Whether the caller holds the given role.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Middleware resolving the caller context for every request.
///
/// Requires a prior `Extension<Arc<dyn DocumentPlatform>>` layer. A
/// missing or empty identity header is rejected with 401 before any
/// handler runs.
pub async fn caller_context(
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, GatewayError> {
    let user = request
        .headers()
        .get(CALLER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(GatewayError::Unauthorized)?
        .to_string();

    let platform = request
        .extensions()
        .get::<Arc<dyn DocumentPlatform>>()
        .cloned()
        .ok_or(GatewayError::Unauthorized)?;

    let roles = platform.get_roles(&user).await?;

    tracing::debug!(user = %user, role_count = roles.len(), "Resolved caller context");

    request.extensions_mut().insert(CallerContext { user, roles });

    Ok(next.run(request).await)
}
