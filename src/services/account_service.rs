use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info};

use super::AccountMapper;
use crate::error::{AppError, Result};
use crate::models::{AccountType, BankAccount, BankAccountRequest, BankAccountResponse};
use crate::observability::get_metrics;
use crate::repositories::BankAccountRepository;

/// Service for bank account operations. Every front end goes through it.
pub struct AccountService {
    repository: Arc<dyn BankAccountRepository>,
    mapper: AccountMapper,
    record_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl AccountService {
    pub fn new(repository: Arc<dyn BankAccountRepository>) -> Self {
        Self {
            repository,
            mapper: AccountMapper,
            record_locks: DashMap::new(),
        }
    }

    pub fn mapper(&self) -> &AccountMapper {
        &self.mapper
    }

    /// Creates an account from the request. Identity and creation time are
    /// assigned here regardless of what the caller sent.
    pub async fn add_account(&self, request: BankAccountRequest) -> Result<BankAccountResponse> {
        let account = self.mapper.from_request(&request);
        let saved = self.repository.save(&account).await?;

        info!(account_id = %saved.id, account_type = ?saved.account_type, "Account created");
        get_metrics().record_account_created(type_label(saved.account_type));

        Ok(self.mapper.from_bank_account(&saved))
    }

    pub async fn list_accounts(&self) -> Result<Vec<BankAccount>> {
        self.repository.find_all().await
    }

    /// Finds an account by id, failing with `NotFound` when it is absent.
    pub async fn get_account(&self, id: &str) -> Result<BankAccount> {
        self.repository.find_by_id(id).await?.ok_or_else(|| {
            get_metrics().record_lookup_miss("bank_account");
            AppError::NotFound(format!("Account {} not found", id))
        })
    }

    /// Overwrites the fields present in `patch`. `created_at` is kept.
    pub async fn update_account(&self, id: &str, patch: BankAccountRequest) -> Result<BankAccount> {
        let _record = self.lock_record(id).await;

        let mut account = self.get_account(id).await?;
        account.apply(&patch);
        let saved = self.repository.save(&account).await?;

        debug!(account_id = %saved.id, "Account updated");
        get_metrics().record_account_updated();

        Ok(saved)
    }

    /// Attaches an existing account to a customer.
    pub async fn assign_customer(&self, id: &str, customer_id: i64) -> Result<BankAccount> {
        let _record = self.lock_record(id).await;

        let account = self.get_account(id).await?.with_customer(customer_id);
        self.repository.save(&account).await
    }

    /// Removes the account. Deleting an unknown id succeeds without effect.
    pub async fn delete_account(&self, id: &str) -> Result<()> {
        let existed = {
            let _record = self.lock_record(id).await;
            self.repository.delete_by_id(id).await?
        };

        debug!(account_id = %id, existed, "Account delete requested");
        get_metrics().record_account_deleted(existed);

        Ok(())
    }

    pub async fn accounts_by_type(&self, account_type: AccountType) -> Result<Vec<BankAccount>> {
        self.repository.find_by_type(account_type).await
    }

    pub async fn customer_accounts(&self, customer_id: i64) -> Result<Vec<BankAccount>> {
        self.repository.find_by_customer(customer_id).await
    }

    /// Narrow (id, type, balance) view of one account.
    pub async fn get_projection(&self, id: &str) -> Result<BankAccountResponse> {
        let projection = self
            .repository
            .find_projection_by_id(id)
            .await?
            .ok_or_else(|| {
                get_metrics().record_lookup_miss("bank_account");
                AppError::NotFound(format!("Account {} not found", id))
            })?;

        Ok(self.mapper.from_projection(&projection))
    }

    pub async fn list_projections(&self) -> Result<Vec<BankAccountResponse>> {
        let projections = self.repository.find_all_projections().await?;

        Ok(projections
            .iter()
            .map(|p| self.mapper.from_projection(p))
            .collect())
    }

    /// Serializes writers of one record. The map entry lives only while some
    /// caller holds or waits for it.
    async fn lock_record(&self, id: &str) -> RecordGuard<'_> {
        let lock = self.record_locks.entry(id.to_string()).or_default().clone();
        let mut record = RecordGuard {
            locks: &self.record_locks,
            id: id.to_string(),
            guard: None,
        };
        record.guard = Some(lock.lock_owned().await);
        record
    }
}

struct RecordGuard<'a> {
    locks: &'a DashMap<String, Arc<Mutex<()>>>,
    id: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for RecordGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        // Only the map's own reference left: nobody else is waiting.
        self.locks
            .remove_if(self.id.as_str(), |_, lock| Arc::strong_count(lock) == 1);
    }
}

fn type_label(account_type: Option<AccountType>) -> &'static str {
    account_type.map(|t| t.as_str()).unwrap_or("UNSPECIFIED")
}
