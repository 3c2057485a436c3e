//! Request and response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zagfer_engine::{ActiveCheckout, ExpiringAlert, MonthlyLoanCount, OverdueAlert, TopTool};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Acting-user identification carried as a query parameter.
///
/// There is no session model; privileged endpoints resolve this
/// matricula to an active user and re-check the role on every call.
#[derive(Debug, Clone, Deserialize)]
pub struct ActingQuery {
    pub matricula: String,
}

/// POST /api/auth/login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub matricula: String,
}

/// POST /api/loans/{id}/return
#[derive(Debug, Clone, Deserialize)]
pub struct ReturnRequest {
    pub tool_ids: Vec<String>,
}

/// PUT /api/loans/{id}/deadline
#[derive(Debug, Clone, Deserialize)]
pub struct RenewRequest {
    pub expected_return_date: DateTime<Utc>,
}

/// GET /api/dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub active_checkouts: Vec<ActiveCheckout>,
    pub overdue: Vec<OverdueAlert>,
    pub expiring_soon: Vec<ExpiringAlert>,
    pub top_tools: Vec<TopTool>,
    pub monthly_loan_counts: Vec<MonthlyLoanCount>,
}

/// GET /api/health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
