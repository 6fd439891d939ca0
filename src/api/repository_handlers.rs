//! Endpoints that expose the repositories directly under `/api`, returning
//! stored entities rather than response payloads.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};

use crate::api::requests::{query_params, ProjectionQuery, TypeSearchQuery};
use crate::api::responses::ApiResponse;
use crate::error::{AppError, Result};
use crate::models::{BankAccount, Customer};

use super::routes::AppState;

/// `GET /api/bankAccounts[?projection=p1]`
pub async fn list_bank_accounts(
    State(state): State<AppState>,
    query: std::result::Result<Query<ProjectionQuery>, QueryRejection>,
) -> Result<Response> {
    if query_params(query)?.is_narrow()? {
        let views = state.accounts.list_projections().await?;
        return Ok(Json(ApiResponse::success(views)).into_response());
    }

    let accounts = state.accounts.list_accounts().await?;
    Ok(Json(ApiResponse::success(accounts)).into_response())
}

/// `GET /api/bankAccounts/:id[?projection=p1]`
pub async fn get_bank_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: std::result::Result<Query<ProjectionQuery>, QueryRejection>,
) -> Result<Response> {
    if query_params(query)?.is_narrow()? {
        let view = state.accounts.get_projection(&id).await?;
        return Ok(Json(ApiResponse::success(view)).into_response());
    }

    let account = state.accounts.get_account(&id).await?;
    Ok(Json(ApiResponse::success(account)).into_response())
}

/// `GET /api/bankAccounts/search/byType?t=SAVING_ACCOUNT`
pub async fn search_by_type(
    State(state): State<AppState>,
    query: std::result::Result<Query<TypeSearchQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<BankAccount>>>> {
    let TypeSearchQuery { t } = query_params(query)?;
    let accounts = state.accounts.accounts_by_type(t).await?;

    Ok(Json(ApiResponse::success(accounts)))
}

pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Customer>>>> {
    let customers = state.customers.list_customers().await?;
    Ok(Json(ApiResponse::success(customers)))
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Customer>>> {
    let customer = state.customers.get_customer(parse_customer_id(&id)?).await?;
    Ok(Json(ApiResponse::success(customer)))
}

/// `GET /api/customers/:id/bankAccounts`
pub async fn customer_bank_accounts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<BankAccount>>>> {
    let accounts = state
        .customers
        .customer_accounts(parse_customer_id(&id)?)
        .await?;
    Ok(Json(ApiResponse::success(accounts)))
}

fn parse_customer_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| AppError::Validation(format!("Invalid customer id '{}'", raw)))
}
