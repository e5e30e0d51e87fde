//! Router configuration for the Account Directory Gateway.
//!
//! Two routers share one state:
//! - users: list, detail, update, rename
//! - purchase orders: count
//!
//! Every route sits behind the caller-context middleware, which requires
//! the platform-forwarded identity header.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::handlers::{
    get_user_handler, list_users_handler, purchase_order_count_handler, rename_user_handler,
    update_user_handler,
};
use crate::middleware::caller_context;
use crate::platform::DocumentPlatform;
use crate::services::DirectoryService;

/// Application state for the gateway routes.
#[derive(Clone)]
pub struct GatewayState {
    /// Document platform the gateway delegates to.
    pub platform: Arc<dyn DocumentPlatform>,
    /// Directory service backing all handlers.
    pub service: Arc<DirectoryService>,
}

impl GatewayState {
    /// Create state over a platform implementation.
    pub fn new(platform: Arc<dyn DocumentPlatform>) -> Self {
        let service = Arc::new(DirectoryService::new(platform.clone()));
        Self { platform, service }
    }
}

/// Create the users router.
///
/// - `GET  /` - List users with pagination and filters
/// - `GET  /:name` - Get user detail
/// - `PUT  /:name` - Update user details
/// - `POST /:name/rename` - Rename user
pub fn users_router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(list_users_handler))
        .route("/:name", get(get_user_handler))
        .route("/:name", put(update_user_handler))
        .route("/:name/rename", post(rename_user_handler))
        .layer(middleware::from_fn(caller_context))
        .layer(axum::Extension(state.service))
        .layer(axum::Extension(state.platform))
}

/// Create the purchase-orders router.
///
/// - `GET /count` - Purchase-order count
pub fn purchase_orders_router(state: GatewayState) -> Router {
    Router::new()
        .route("/count", get(purchase_order_count_handler))
        .layer(middleware::from_fn(caller_context))
        .layer(axum::Extension(state.service))
        .layer(axum::Extension(state.platform))
}
