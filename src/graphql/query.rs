use async_graphql::{ComplexObject, Context, ErrorExtensions, Object, Result};
use std::sync::Arc;

use crate::models::{AccountType, BankAccount, Customer};
use crate::services::{AccountService, CustomerService};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn accounts_list(&self, ctx: &Context<'_>) -> Result<Vec<BankAccount>> {
        let accounts = ctx.data::<Arc<AccountService>>()?;
        accounts.list_accounts().await.map_err(|e| e.extend())
    }

    async fn bank_account_by_id(&self, ctx: &Context<'_>, id: String) -> Result<BankAccount> {
        let accounts = ctx.data::<Arc<AccountService>>()?;
        accounts.get_account(&id).await.map_err(|e| e.extend())
    }

    async fn accounts_by_type(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "type")] account_type: AccountType,
    ) -> Result<Vec<BankAccount>> {
        let accounts = ctx.data::<Arc<AccountService>>()?;
        accounts
            .accounts_by_type(account_type)
            .await
            .map_err(|e| e.extend())
    }

    async fn customers(&self, ctx: &Context<'_>) -> Result<Vec<Customer>> {
        let customers = ctx.data::<Arc<CustomerService>>()?;
        customers.list_customers().await.map_err(|e| e.extend())
    }

    async fn customer_by_id(&self, ctx: &Context<'_>, id: i64) -> Result<Customer> {
        let customers = ctx.data::<Arc<CustomerService>>()?;
        customers.get_customer(id).await.map_err(|e| e.extend())
    }
}

#[ComplexObject]
impl BankAccount {
    /// Owning customer, if any.
    async fn customer(&self, ctx: &Context<'_>) -> Result<Option<Customer>> {
        let Some(customer_id) = self.customer_id else {
            return Ok(None);
        };

        let customers = ctx.data::<Arc<CustomerService>>()?;
        customers
            .get_customer(customer_id)
            .await
            .map(Some)
            .map_err(|e| e.extend())
    }
}

#[ComplexObject]
impl Customer {
    async fn bank_accounts(&self, ctx: &Context<'_>) -> Result<Vec<BankAccount>> {
        let accounts = ctx.data::<Arc<AccountService>>()?;
        accounts
            .customer_accounts(self.id)
            .await
            .map_err(|e| e.extend())
    }
}
