use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::AccountType;

/// Read-only view of an account: identifier, type and balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AccountProjection {
    pub id: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub account_type: Option<AccountType>,
    pub balance: Option<f64>,
}
