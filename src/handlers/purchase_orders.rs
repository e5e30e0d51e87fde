//! Purchase-order count endpoint handler.
//!
//! GET /purchase-orders/count - Scalar count of purchase-order records.

use axum::{Extension, Json};
use std::sync::Arc;

use crate::error::GatewayError;
use crate::middleware::CallerContext;
use crate::models::PurchaseOrderCount;
use crate::services::DirectoryService;

/// Returns the platform's count of purchase-order records, unmodified.
#[utoipa::path(
    get,
    path = "/purchase-orders/count",
    responses(
        (status = 200, description = "Purchase-order count", body = PurchaseOrderCount),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "Purchase Orders"
)]
pub async fn purchase_order_count_handler(
    Extension(caller): Extension<CallerContext>,
    Extension(service): Extension<Arc<DirectoryService>>,
) -> Result<Json<PurchaseOrderCount>, GatewayError> {
    tracing::info!(caller = %caller.user, "Counting purchase orders");

    let count = service.purchase_order_count().await?;

    Ok(Json(count))
}
