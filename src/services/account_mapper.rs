use chrono::Utc;
use uuid::Uuid;

use crate::models::{AccountProjection, BankAccount, BankAccountRequest, BankAccountResponse};

/// Conversions between stored accounts and the boundary payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountMapper;

impl AccountMapper {
    /// Copies id, created_at, balance, currency and type.
    pub fn from_bank_account(&self, account: &BankAccount) -> BankAccountResponse {
        BankAccountResponse {
            id: account.id.clone(),
            created_at: Some(account.created_at),
            balance: account.balance,
            currency: account.currency.clone(),
            account_type: account.account_type,
        }
    }

    /// Builds a new, unsaved account. The id and creation time are always
    /// generated here.
    pub fn from_request(&self, request: &BankAccountRequest) -> BankAccount {
        BankAccount {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            balance: request.balance,
            currency: request.currency.clone(),
            account_type: request.account_type,
            customer_id: None,
        }
    }

    /// Copies id, type and balance only.
    pub fn from_projection(&self, projection: &AccountProjection) -> BankAccountResponse {
        BankAccountResponse {
            id: projection.id.clone(),
            created_at: None,
            balance: projection.balance,
            currency: None,
            account_type: projection.account_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountType;

    #[test]
    fn test_from_request_stamps_identity() {
        let mapper = AccountMapper;
        let request = BankAccountRequest {
            balance: Some(9800.0),
            currency: Some("MAD".to_string()),
            account_type: Some(AccountType::SavingAccount),
        };

        let before = Utc::now();
        let first = mapper.from_request(&request);
        let second = mapper.from_request(&request);

        assert_ne!(first.id, second.id);
        assert!(Uuid::parse_str(&first.id).is_ok());
        assert!(first.created_at >= before);
        assert_eq!(first.balance, Some(9800.0));
        assert_eq!(first.currency.as_deref(), Some("MAD"));
        assert_eq!(first.account_type, Some(AccountType::SavingAccount));
        assert!(first.customer_id.is_none());
    }

    #[test]
    fn test_from_bank_account_copies_listed_fields() {
        let mapper = AccountMapper;
        let account = mapper
            .from_request(&BankAccountRequest {
                balance: Some(1.5),
                currency: Some("USD".to_string()),
                account_type: Some(AccountType::CurrentAccount),
            })
            .with_customer(7);

        let response = mapper.from_bank_account(&account);

        assert_eq!(response.id, account.id);
        assert_eq!(response.created_at, Some(account.created_at));
        assert_eq!(response.balance, Some(1.5));
        assert_eq!(response.currency.as_deref(), Some("USD"));
        assert_eq!(response.account_type, Some(AccountType::CurrentAccount));
    }

    #[test]
    fn test_from_projection_is_narrow() {
        let projection = AccountProjection {
            id: "acc-9".to_string(),
            account_type: Some(AccountType::SavingAccount),
            balance: Some(42.0),
        };

        let response = AccountMapper.from_projection(&projection);

        assert_eq!(response.id, "acc-9");
        assert_eq!(response.balance, Some(42.0));
        assert_eq!(response.account_type, Some(AccountType::SavingAccount));
        assert!(response.currency.is_none());
        assert!(response.created_at.is_none());
    }
}
