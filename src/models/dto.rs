use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::AccountType;

/// Payload accepted when creating or updating an account.
///
/// Every field is optional. On update an absent field keeps its stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, async_graphql::InputObject)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountRequest {
    pub balance: Option<f64>,
    #[validate(custom = "validate_currency")]
    pub currency: Option<String>,
    #[serde(rename = "type")]
    #[graphql(name = "type")]
    pub account_type: Option<AccountType>,
}

/// Currency codes are free text but must be a single non-blank token.
fn validate_currency(currency: &str) -> Result<(), ValidationError> {
    if currency.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("currency cannot be blank".into());
        return Err(error);
    }
    if currency.len() > 16 || currency.chars().any(char::is_whitespace) {
        let mut error = ValidationError::new("format");
        error.message = Some("currency must be a single code of at most 16 characters".into());
        return Err(error);
    }
    Ok(())
}

/// Account as returned to callers of the service.
///
/// When built from a projection only `id`, `type` and `balance` are set and
/// the remaining fields are left out of the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, async_graphql::SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(rename = "type")]
    #[graphql(name = "type")]
    pub account_type: Option<AccountType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_missing_fields() {
        let request: BankAccountRequest = serde_json::from_str(r#"{"balance": 12.5}"#).unwrap();
        assert_eq!(request.balance, Some(12.5));
        assert!(request.currency.is_none());
        assert!(request.account_type.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_ignores_identity_fields() {
        let request: BankAccountRequest = serde_json::from_str(
            r#"{"id": "mine", "createdAt": "2020-01-01T00:00:00Z", "type": "SAVING_ACCOUNT"}"#,
        )
        .unwrap();
        assert_eq!(request.account_type, Some(AccountType::SavingAccount));
    }

    #[test]
    fn test_request_rejects_unknown_type() {
        let result = serde_json::from_str::<BankAccountRequest>(r#"{"type": "GOLD_ACCOUNT"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_currency_validation() {
        let blank = BankAccountRequest {
            currency: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(blank.validate().is_err());

        let spaced = BankAccountRequest {
            currency: Some("US D".to_string()),
            ..Default::default()
        };
        assert!(spaced.validate().is_err());

        let ok = BankAccountRequest {
            currency: Some("MAD".to_string()),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_narrow_response_omits_absent_fields() {
        let response = BankAccountResponse {
            id: "acc-1".to_string(),
            created_at: None,
            balance: Some(10.0),
            currency: None,
            account_type: Some(AccountType::CurrentAccount),
        };

        let json = serde_json::to_value(&response).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(json["type"], "CURRENT_ACCOUNT");
        assert!(object.get("currency").is_none());
        assert!(object.get("createdAt").is_none());
    }
}
