use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::api::requests::validated_body;
use crate::api::responses::{ApiResponse, HealthResponse};
use crate::error::Result;
use crate::models::{BankAccountRequest, BankAccountResponse};
use crate::observability::HealthReport;

use super::routes::AppState;

/// Health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let store_healthy = match &state.health_checker {
        Some(checker) => checker.check_store().await.status.is_serving(),
        None => sqlx::query("SELECT 1").fetch_one(&state.pool).await.is_ok(),
    };

    Json(ApiResponse::success(HealthResponse {
        status: if store_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        store: store_healthy,
    }))
}

/// Per-component health report.
pub async fn detailed_health_check(
    State(state): State<AppState>,
) -> std::result::Result<Json<ApiResponse<HealthReport>>, StatusCode> {
    let checker = state
        .health_checker
        .as_ref()
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)?;

    Ok(Json(ApiResponse::success(checker.check_all().await)))
}

/// Readiness check endpoint.
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    let ready = match &state.health_checker {
        Some(checker) => checker.is_ready().await,
        None => sqlx::query("SELECT 1").fetch_one(&state.pool).await.is_ok(),
    };

    if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// Liveness check endpoint.
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

/// Prometheus scrape endpoint.
pub async fn metrics_endpoint(State(state): State<AppState>) -> Response {
    match &state.metrics_handle {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

// ============================================================================
// Bank account handlers
// ============================================================================

pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BankAccountResponse>>>> {
    let accounts = state.accounts.list_accounts().await?;
    let mapper = state.accounts.mapper();

    Ok(Json(ApiResponse::success(
        accounts.iter().map(|a| mapper.from_bank_account(a)).collect(),
    )))
}

pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BankAccountResponse>>> {
    let account = state.accounts.get_account(&id).await?;

    Ok(Json(ApiResponse::success(
        state.accounts.mapper().from_bank_account(&account),
    )))
}

/// Creates an account. Any `id` or `createdAt` in the body is ignored.
pub async fn create_account(
    State(state): State<AppState>,
    payload: std::result::Result<Json<BankAccountRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<BankAccountResponse>>)> {
    let request = validated_body(payload)?;
    let created = state.accounts.add_account(request).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

/// Partial update: absent fields keep their stored values.
pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<BankAccountRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<BankAccountResponse>>> {
    let patch = validated_body(payload)?;
    let updated = state.accounts.update_account(&id, patch).await?;

    Ok(Json(ApiResponse::success(
        state.accounts.mapper().from_bank_account(&updated),
    )))
}

pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.accounts.delete_account(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
