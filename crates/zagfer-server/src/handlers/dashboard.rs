//! Dashboard aggregation, recomputed from snapshots on every call.

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use zagfer_core::constants::{
    EXPIRING_HORIZON_HOURS, MONTHLY_BUCKET_COUNT, TOP_TOOLS_LIMIT, TOP_TOOLS_WINDOW_DAYS,
};
use zagfer_engine::{
    compute_active_checkouts, compute_expiring_soon, compute_monthly_loan_counts,
    compute_overdue_alerts, compute_top_tools,
};
use zagfer_storage::store::EntityStore;

use crate::dto::{ApiResponse, DashboardResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<DashboardResponse>>> {
    let tools = state.store.list_tools().await?;
    let history = state.store.list_history().await?;
    let now = Utc::now();

    Ok(Json(ApiResponse::ok(DashboardResponse {
        active_checkouts: compute_active_checkouts(&tools, &history),
        overdue: compute_overdue_alerts(&tools, &history, now),
        expiring_soon: compute_expiring_soon(&tools, &history, now, EXPIRING_HORIZON_HOURS),
        top_tools: compute_top_tools(&tools, &history, now, TOP_TOOLS_WINDOW_DAYS, TOP_TOOLS_LIMIT),
        monthly_loan_counts: compute_monthly_loan_counts(&history, now, MONTHLY_BUCKET_COUNT),
    })))
}
