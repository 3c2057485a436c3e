//! Loan endpoints, the only write path for tool status and history.

use axum::Json;
use axum::extract::{Path, Query, State};
use zagfer_engine::{ActiveCheckout, compute_active_checkouts};
use zagfer_service::CheckoutRequest;
use zagfer_service::auth::{Action, ensure_can, login};
use zagfer_storage::models::HistoryRecord;
use zagfer_storage::store::EntityStore;

use crate::dto::{ActingQuery, ApiResponse, RenewRequest, ReturnRequest};
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /api/loans
pub async fn checkout(
    State(state): State<AppState>,
    Query(acting): Query<ActingQuery>,
    Json(request): Json<CheckoutRequest>,
) -> ApiResult<Json<ApiResponse<HistoryRecord>>> {
    let dispatcher = login(&state.store, &acting.matricula).await?;
    ensure_can(&dispatcher, Action::OperateLoans)?;
    let record = state.processor.checkout(request, &dispatcher).await?;
    Ok(Json(ApiResponse::ok(record)))
}

/// GET /api/loans/active
pub async fn active(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<ActiveCheckout>>>> {
    let tools = state.store.list_tools().await?;
    let history = state.store.list_history().await?;
    Ok(Json(ApiResponse::ok(compute_active_checkouts(
        &tools, &history,
    ))))
}

/// POST /api/loans/{id}/return
pub async fn process_return(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(acting): Query<ActingQuery>,
    Json(request): Json<ReturnRequest>,
) -> ApiResult<Json<ApiResponse<HistoryRecord>>> {
    let dispatcher = login(&state.store, &acting.matricula).await?;
    ensure_can(&dispatcher, Action::OperateLoans)?;
    let record = state
        .processor
        .process_return(&id, &request.tool_ids, &dispatcher)
        .await?;
    Ok(Json(ApiResponse::ok(record)))
}

/// PUT /api/loans/{id}/deadline
pub async fn renew(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(acting): Query<ActingQuery>,
    Json(request): Json<RenewRequest>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let dispatcher = login(&state.store, &acting.matricula).await?;
    ensure_can(&dispatcher, Action::OperateLoans)?;
    state
        .processor
        .renew(&id, request.expected_return_date)
        .await?;
    Ok(Json(ApiResponse::ok(())))
}
