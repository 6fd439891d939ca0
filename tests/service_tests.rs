mod common;

use bank_account_service::error::AppError;
use bank_account_service::models::{AccountType, BankAccountRequest};
use bank_account_service::seed::seed_demo_data;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;

fn request(balance: f64, currency: &str, account_type: AccountType) -> BankAccountRequest {
    BankAccountRequest {
        balance: Some(balance),
        currency: Some(currency.to_string()),
        account_type: Some(account_type),
    }
}

#[tokio::test]
async fn test_create_then_get() {
    let state = common::setup_state().await;
    let before = Utc::now();

    let created = state
        .accounts
        .add_account(request(9800.0, "MAD", AccountType::SavingAccount))
        .await
        .expect("Failed to create account");

    let fetched = state.accounts.get_account(&created.id).await.unwrap();
    assert_eq!(fetched.balance, Some(9800.0));
    assert_eq!(fetched.currency.as_deref(), Some("MAD"));
    assert_eq!(fetched.account_type, Some(AccountType::SavingAccount));
    assert!(fetched.created_at >= before);
    assert_eq!(Some(fetched.created_at), created.created_at);
}

#[tokio::test]
async fn test_partial_update_leaves_other_fields() {
    let state = common::setup_state().await;
    let created = state
        .accounts
        .add_account(request(100.0, "USD", AccountType::CurrentAccount))
        .await
        .unwrap();
    let original = state.accounts.get_account(&created.id).await.unwrap();

    let updated = state
        .accounts
        .update_account(
            &created.id,
            BankAccountRequest {
                balance: Some(42.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.balance, Some(42.0));
    assert_eq!(updated.currency.as_deref(), Some("USD"));
    assert_eq!(updated.account_type, Some(AccountType::CurrentAccount));
    assert_eq!(updated.created_at, original.created_at);

    let stored = state.accounts.get_account(&created.id).await.unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let state = common::setup_state().await;
    let created = state
        .accounts
        .add_account(request(1.0, "EUR", AccountType::CurrentAccount))
        .await
        .unwrap();

    state.accounts.delete_account(&created.id).await.unwrap();

    let err = state.accounts.get_account(&created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // A second delete is accepted without complaint.
    assert!(state.accounts.delete_account(&created.id).await.is_ok());
}

#[tokio::test]
async fn test_filter_by_type_returns_exact_subset() {
    let state = common::setup_state().await;
    let types = [
        AccountType::CurrentAccount,
        AccountType::SavingAccount,
        AccountType::SavingAccount,
        AccountType::CurrentAccount,
        AccountType::CurrentAccount,
    ];

    let mut expected = Vec::new();
    for (i, account_type) in types.iter().enumerate() {
        let created = state
            .accounts
            .add_account(request(i as f64, "MAD", *account_type))
            .await
            .unwrap();
        if *account_type == AccountType::CurrentAccount {
            expected.push(created.id);
        }
    }

    let current: Vec<String> = state
        .accounts
        .accounts_by_type(AccountType::CurrentAccount)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(current, expected);
}

#[tokio::test]
async fn test_projection_is_narrow() {
    let state = common::setup_state().await;
    let created = state
        .accounts
        .add_account(request(310.0, "MAD", AccountType::SavingAccount))
        .await
        .unwrap();

    let view = state.accounts.get_projection(&created.id).await.unwrap();
    assert_eq!(view.id, created.id);
    assert_eq!(view.balance, Some(310.0));
    assert_eq!(view.account_type, Some(AccountType::SavingAccount));
    assert!(view.currency.is_none());
    assert!(view.created_at.is_none());

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json.as_object().unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_all_after_seed_has_no_duplicates() {
    let state = common::setup_state().await;
    let seeded = seed_demo_data(&state.accounts, &state.customers).await.unwrap();

    let mut created = HashSet::new();
    for i in 0..5 {
        let response = state
            .accounts
            .add_account(request(i as f64, "USD", AccountType::CurrentAccount))
            .await
            .unwrap();
        created.insert(response.id);
    }

    let all = state.accounts.list_accounts().await.unwrap();
    assert_eq!(all.len(), seeded + 5);

    let ids: HashSet<String> = all.iter().map(|a| a.id.clone()).collect();
    assert_eq!(ids.len(), all.len());
    assert!(created.is_subset(&ids));
}

#[tokio::test]
async fn test_seeded_customers_own_their_accounts() {
    let state = common::setup_state().await;
    seed_demo_data(&state.accounts, &state.customers).await.unwrap();

    let customers = state.customers.list_customers().await.unwrap();
    assert_eq!(customers.len(), 4);
    assert_eq!(customers[0].name, "Mohamed");

    for customer in &customers {
        let owned = state.customers.customer_accounts(customer.id).await.unwrap();
        assert_eq!(owned.len(), 2);
        assert!(owned.iter().all(|a| a.customer_id == Some(customer.id)));
    }
}

#[tokio::test]
async fn test_concurrent_partial_updates_keep_every_field() {
    let state = common::setup_state().await;
    let created = state
        .accounts
        .add_account(request(0.0, "MAD", AccountType::CurrentAccount))
        .await
        .unwrap();

    let accounts = Arc::clone(&state.accounts);
    let id = created.id.clone();
    let balance_update = tokio::spawn(async move {
        accounts
            .update_account(
                &id,
                BankAccountRequest {
                    balance: Some(500.0),
                    ..Default::default()
                },
            )
            .await
    });

    let accounts = Arc::clone(&state.accounts);
    let id = created.id.clone();
    let currency_update = tokio::spawn(async move {
        accounts
            .update_account(
                &id,
                BankAccountRequest {
                    currency: Some("EUR".to_string()),
                    ..Default::default()
                },
            )
            .await
    });

    balance_update.await.unwrap().unwrap();
    currency_update.await.unwrap().unwrap();

    let stored = state.accounts.get_account(&created.id).await.unwrap();
    assert_eq!(stored.balance, Some(500.0));
    assert_eq!(stored.currency.as_deref(), Some("EUR"));
}

#[tokio::test]
async fn test_missing_customer_is_not_found() {
    let state = common::setup_state().await;
    let err = state.customers.get_customer(12345).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
