use tracing::info;

use crate::error::Result;
use crate::models::{AccountType, BankAccountRequest};
use crate::services::{AccountService, CustomerService};

const SEED_CUSTOMERS: [&str; 4] = ["Mohamed", "Yassine", "Hanae", "Imane"];
const SEED_CURRENCY: &str = "MAD";

/// Inserts the demo customers, each owning one current and one saving
/// account. Returns the number of accounts created.
pub async fn seed_demo_data(accounts: &AccountService, customers: &CustomerService) -> Result<usize> {
    let mut created = 0;

    for (index, name) in SEED_CUSTOMERS.iter().enumerate() {
        let customer = customers.register(name).await?;
        let base = 1_000.0 * (index as f64 + 1.0);

        for (account_type, balance) in [
            (AccountType::CurrentAccount, base),
            (AccountType::SavingAccount, base * 10.0),
        ] {
            let account = accounts
                .add_account(BankAccountRequest {
                    balance: Some(balance),
                    currency: Some(SEED_CURRENCY.to_string()),
                    account_type: Some(account_type),
                })
                .await?;
            accounts.assign_customer(&account.id, customer.id).await?;
            created += 1;
        }
    }

    info!(customers = SEED_CUSTOMERS.len(), accounts = created, "Demo data seeded");
    Ok(created)
}
