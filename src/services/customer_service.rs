use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{BankAccount, Customer};
use crate::observability::get_metrics;
use crate::repositories::{BankAccountRepository, CustomerRepository};

/// Read access to customers and their accounts.
pub struct CustomerService {
    customers: Arc<dyn CustomerRepository>,
    accounts: Arc<dyn BankAccountRepository>,
}

impl CustomerService {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        accounts: Arc<dyn BankAccountRepository>,
    ) -> Self {
        Self { customers, accounts }
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        self.customers.find_all().await
    }

    pub async fn get_customer(&self, id: i64) -> Result<Customer> {
        self.customers.find_by_id(id).await?.ok_or_else(|| {
            get_metrics().record_lookup_miss("customer");
            AppError::NotFound(format!("Customer {} not found", id))
        })
    }

    /// Accounts owned by the customer, in stored order.
    pub async fn customer_accounts(&self, id: i64) -> Result<Vec<BankAccount>> {
        self.get_customer(id).await?;
        self.accounts.find_by_customer(id).await
    }

    /// Inserts a customer directly. Used by startup seeding only.
    pub async fn register(&self, name: &str) -> Result<Customer> {
        self.customers.insert(name).await
    }
}
