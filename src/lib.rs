//! Account Directory Gateway.
//!
//! A thin HTTP gateway over an external document platform. It exposes
//! account-directory operations (list, detail, update, rename) plus a
//! purchase-order count, delegating every read and mutation to the
//! platform's document API and shaping the results for callers.
//!
//! The gateway owns no storage and no session state: all persistence,
//! transactions and identity lifecycle belong to the platform, reached
//! through the [`platform::DocumentPlatform`] seam.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod platform;
pub mod router;
pub mod services;
pub mod validation;

pub use error::GatewayError;
pub use router::{purchase_orders_router, users_router, GatewayState};
