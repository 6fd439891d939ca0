use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{AccountType, BankAccountRequest};

/// Name of the narrow (id, type, balance) projection.
pub const NARROW_PROJECTION: &str = "p1";

/// Optional projection selector on repository reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionQuery {
    pub projection: Option<String>,
}

impl ProjectionQuery {
    /// True when the narrow projection was requested. Unknown names are
    /// rejected rather than silently ignored.
    pub fn is_narrow(&self) -> Result<bool> {
        match self.projection.as_deref() {
            None => Ok(false),
            Some(NARROW_PROJECTION) => Ok(true),
            Some(other) => Err(AppError::Validation(format!(
                "Unknown projection '{}', expected '{}'",
                other, NARROW_PROJECTION
            ))),
        }
    }
}

/// Query string of `/api/bankAccounts/search/byType`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSearchQuery {
    pub t: AccountType,
}

/// Unwraps a JSON body and applies the field rules.
pub fn validated_body(payload: std::result::Result<Json<BankAccountRequest>, JsonRejection>) -> Result<BankAccountRequest> {
    let Json(request) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    request.validate()?;
    Ok(request)
}

/// Unwraps a query string, turning a rejection into a validation error.
pub fn query_params<T>(query: std::result::Result<Query<T>, QueryRejection>) -> Result<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}
