pub mod bank_account_repository;
pub mod customer_repository;

pub use bank_account_repository::SqliteBankAccountRepository;
pub use customer_repository::SqliteCustomerRepository;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

use crate::config::DatabaseSettings;
use crate::error::{AppError, Result};
use crate::models::{AccountProjection, AccountType, BankAccount, Customer};

/// Database connection pool type alias.
pub type DbPool = SqlitePool;

/// Storage contract for bank accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BankAccountRepository: Send + Sync {
    /// All accounts in insertion order.
    async fn find_all(&self) -> Result<Vec<BankAccount>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<BankAccount>>;

    /// Inserts the account, or overwrites the stored one with the same id.
    async fn save(&self, account: &BankAccount) -> Result<BankAccount>;

    /// Returns whether a row was removed.
    async fn delete_by_id(&self, id: &str) -> Result<bool>;

    async fn find_by_type(&self, account_type: AccountType) -> Result<Vec<BankAccount>>;

    async fn find_by_customer(&self, customer_id: i64) -> Result<Vec<BankAccount>>;

    async fn find_projection_by_id(&self, id: &str) -> Result<Option<AccountProjection>>;

    async fn find_all_projections(&self) -> Result<Vec<AccountProjection>>;
}

/// Storage contract for customers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Customer>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>>;

    /// Inserts a customer and returns it with its store-assigned id.
    async fn insert(&self, name: &str) -> Result<Customer>;

    /// Inserts or overwrites the customer with `customer.id`.
    async fn save(&self, customer: &Customer) -> Result<Customer>;

    async fn delete_by_id(&self, id: i64) -> Result<bool>;
}

/// Opens the pool and applies the embedded schema.
///
/// An in-memory database lives only as long as its connection, so the pool is
/// pinned to a single connection that is never recycled.
pub async fn connect(settings: &DatabaseSettings) -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str(&settings.url)
        .map_err(AppError::Database)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if settings.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(settings.pool_size)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(AppError::Database)?;

    info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(AppError::Migration)?;
    info!("Migrations applied successfully");

    Ok(pool)
}
