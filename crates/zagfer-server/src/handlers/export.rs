//! CSV report downloads, admin-only.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use zagfer_export::csv::export_table;
use zagfer_export::tables;
use zagfer_service::auth::{Action, ensure_can, login};
use zagfer_storage::store::EntityStore;

use crate::dto::ActingQuery;
use crate::error::ApiResult;
use crate::state::AppState;

fn csv_response(filename: &str, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// GET /api/export/history
pub async fn history(
    State(state): State<AppState>,
    Query(acting): Query<ActingQuery>,
) -> ApiResult<Response> {
    let acting = login(&state.store, &acting.matricula).await?;
    ensure_can(&acting, Action::ExportCsv)?;

    let history = state.store.list_history().await?;
    let body = export_table(&history, &tables::history_columns());
    Ok(csv_response(tables::HISTORY_FILENAME, body))
}

/// GET /api/export/tools
pub async fn tools(
    State(state): State<AppState>,
    Query(acting): Query<ActingQuery>,
) -> ApiResult<Response> {
    let acting = login(&state.store, &acting.matricula).await?;
    ensure_can(&acting, Action::ExportCsv)?;

    let tools = state.store.list_tools().await?;
    let body = export_table(&tools, &tables::tool_columns());
    Ok(csv_response(tables::TOOLS_FILENAME, body))
}

/// GET /api/export/users
pub async fn users(
    State(state): State<AppState>,
    Query(acting): Query<ActingQuery>,
) -> ApiResult<Response> {
    let acting = login(&state.store, &acting.matricula).await?;
    ensure_can(&acting, Action::ExportCsv)?;

    let users = state.store.list_users().await?;
    let body = export_table(&users, &tables::user_columns());
    Ok(csv_response(tables::USERS_FILENAME, body))
}
