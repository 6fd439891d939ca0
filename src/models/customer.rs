use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Owner of zero or more bank accounts.
///
/// The accounts themselves hold the relation; see
/// `BankAccountRepository::find_by_customer` for the back-reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, async_graphql::SimpleObject)]
#[graphql(complex)]
pub struct Customer {
    pub id: i64,
    pub name: String,
}
