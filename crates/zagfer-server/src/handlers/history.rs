//! History listing and voucher rendering.

use axum::Json;
use axum::extract::{Path, State};
use zagfer_core::Error;
use zagfer_export::{Receipt, render_receipt};
use zagfer_storage::models::HistoryRecord;
use zagfer_storage::store::EntityStore;

use crate::dto::ApiResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/history
///
/// Newest record first; this order is what the reconciliation engine
/// scans, so it is part of the contract.
pub async fn list(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<HistoryRecord>>>> {
    let history = state.store.list_history().await?;
    Ok(Json(ApiResponse::ok(history)))
}

/// GET /api/history/{id}/receipt
pub async fn receipt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Receipt>>> {
    let history = state.store.list_history().await?;
    let record = history
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| Error::not_found("registro de histórico", &id))?;

    let tools = state.store.list_tools().await?;
    Ok(Json(ApiResponse::ok(render_receipt(record, &tools))))
}
