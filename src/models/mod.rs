pub mod bank_account;
pub mod customer;
pub mod dto;
pub mod projection;

pub use bank_account::{AccountType, BankAccount};
pub use customer::Customer;
pub use dto::{BankAccountRequest, BankAccountResponse};
pub use projection::AccountProjection;
