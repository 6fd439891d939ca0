use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::BankAccountRequest;

/// Kind of bank account. The set is closed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, async_graphql::Enum,
)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    CurrentAccount,
    SavingAccount,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::CurrentAccount => "CURRENT_ACCOUNT",
            AccountType::SavingAccount => "SAVING_ACCOUNT",
        }
    }
}

/// A persisted bank account.
///
/// `balance`, `currency` and `account_type` are nullable in the store; nothing
/// above the boundary validation requires them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, async_graphql::SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(complex)]
pub struct BankAccount {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub balance: Option<f64>,
    pub currency: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    #[graphql(name = "type")]
    pub account_type: Option<AccountType>,
    #[graphql(skip)]
    pub customer_id: Option<i64>,
}

impl BankAccount {
    /// Overwrites the fields present in `patch`, leaving the others as they are.
    ///
    /// `id` and `created_at` are never touched.
    pub fn apply(&mut self, patch: &BankAccountRequest) {
        if let Some(balance) = patch.balance {
            self.balance = Some(balance);
        }
        if let Some(currency) = &patch.currency {
            self.currency = Some(currency.clone());
        }
        if let Some(account_type) = patch.account_type {
            self.account_type = Some(account_type);
        }
    }

    /// Links the account to its owning customer.
    pub fn with_customer(mut self, customer_id: i64) -> Self {
        self.customer_id = Some(customer_id);
        self
    }
}
