use async_graphql::{Context, ErrorExtensions, Object, Result};
use std::sync::Arc;
use validator::Validate;

use crate::error::AppError;
use crate::models::{BankAccount, BankAccountRequest, BankAccountResponse};
use crate::services::AccountService;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Creates an account; id and createdAt are assigned by the server.
    async fn add_account(
        &self,
        ctx: &Context<'_>,
        bank_account: BankAccountRequest,
    ) -> Result<BankAccountResponse> {
        validate(&bank_account)?;
        let accounts = ctx.data::<Arc<AccountService>>()?;
        accounts.add_account(bank_account).await.map_err(|e| e.extend())
    }

    /// Overwrites only the fields present in `bankAccount`.
    async fn update_account(
        &self,
        ctx: &Context<'_>,
        id: String,
        bank_account: BankAccountRequest,
    ) -> Result<BankAccount> {
        validate(&bank_account)?;
        let accounts = ctx.data::<Arc<AccountService>>()?;
        accounts
            .update_account(&id, bank_account)
            .await
            .map_err(|e| e.extend())
    }

    /// Always true once the id is gone, whether or not it existed.
    async fn delete_account(&self, ctx: &Context<'_>, id: String) -> Result<bool> {
        let accounts = ctx.data::<Arc<AccountService>>()?;
        accounts.delete_account(&id).await.map_err(|e| e.extend())?;
        Ok(true)
    }
}

fn validate(request: &BankAccountRequest) -> Result<()> {
    request
        .validate()
        .map_err(|errors| AppError::Invalid(errors).extend())
}
