pub mod account_mapper;
pub mod account_service;
pub mod customer_service;

pub use account_mapper::AccountMapper;
pub use account_service::AccountService;
pub use customer_service::CustomerService;
