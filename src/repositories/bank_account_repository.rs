use async_trait::async_trait;
use sqlx::SqlitePool;

use super::BankAccountRepository;
use crate::error::{AppError, Result};
use crate::models::{AccountProjection, AccountType, BankAccount};

/// SQLite-backed account storage. Rows are returned in `rowid` order, which
/// an upsert leaves unchanged.
#[derive(Clone)]
pub struct SqliteBankAccountRepository {
    pool: SqlitePool,
}

impl SqliteBankAccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BankAccountRepository for SqliteBankAccountRepository {
    async fn find_all(&self) -> Result<Vec<BankAccount>> {
        let rows = sqlx::query_as::<_, BankAccount>(
            r#"
            SELECT id, created_at, balance, currency, type, customer_id
            FROM bank_accounts
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<BankAccount>> {
        let row = sqlx::query_as::<_, BankAccount>(
            r#"
            SELECT id, created_at, balance, currency, type, customer_id
            FROM bank_accounts
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(row)
    }

    async fn save(&self, account: &BankAccount) -> Result<BankAccount> {
        let row = sqlx::query_as::<_, BankAccount>(
            r#"
            INSERT INTO bank_accounts (id, created_at, balance, currency, type, customer_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT (id) DO UPDATE SET
                created_at = excluded.created_at,
                balance = excluded.balance,
                currency = excluded.currency,
                type = excluded.type,
                customer_id = excluded.customer_id
            RETURNING id, created_at, balance, currency, type, customer_id
            "#,
        )
        .bind(&account.id)
        .bind(account.created_at)
        .bind(account.balance)
        .bind(&account.currency)
        .bind(account.account_type)
        .bind(account.customer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(row)
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bank_accounts WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_type(&self, account_type: AccountType) -> Result<Vec<BankAccount>> {
        let rows = sqlx::query_as::<_, BankAccount>(
            r#"
            SELECT id, created_at, balance, currency, type, customer_id
            FROM bank_accounts
            WHERE type = ?1
            ORDER BY rowid
            "#,
        )
        .bind(account_type)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(rows)
    }

    async fn find_by_customer(&self, customer_id: i64) -> Result<Vec<BankAccount>> {
        let rows = sqlx::query_as::<_, BankAccount>(
            r#"
            SELECT id, created_at, balance, currency, type, customer_id
            FROM bank_accounts
            WHERE customer_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(rows)
    }

    async fn find_projection_by_id(&self, id: &str) -> Result<Option<AccountProjection>> {
        let row = sqlx::query_as::<_, AccountProjection>(
            "SELECT id, type, balance FROM bank_accounts WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(row)
    }

    async fn find_all_projections(&self) -> Result<Vec<AccountProjection>> {
        let rows = sqlx::query_as::<_, AccountProjection>(
            "SELECT id, type, balance FROM bank_accounts ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(rows)
    }
}
