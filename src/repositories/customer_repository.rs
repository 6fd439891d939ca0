use async_trait::async_trait;
use sqlx::SqlitePool;

use super::CustomerRepository;
use crate::error::{AppError, Result};
use crate::models::Customer;

/// SQLite-backed customer storage.
#[derive(Clone)]
pub struct SqliteCustomerRepository {
    pool: SqlitePool,
}

impl SqliteCustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for SqliteCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>> {
        let rows = sqlx::query_as::<_, Customer>("SELECT id, name FROM customers ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>> {
        let row = sqlx::query_as::<_, Customer>("SELECT id, name FROM customers WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(row)
    }

    async fn insert(&self, name: &str) -> Result<Customer> {
        let row = sqlx::query_as::<_, Customer>(
            "INSERT INTO customers (name) VALUES (?1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(row)
    }

    async fn save(&self, customer: &Customer) -> Result<Customer> {
        let row = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (id, name)
            VALUES (?1, ?2)
            ON CONFLICT (id) DO UPDATE SET name = excluded.name
            RETURNING id, name
            "#,
        )
        .bind(customer.id)
        .bind(&customer.name)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(row)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }
}
