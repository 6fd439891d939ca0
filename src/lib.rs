pub mod api;
pub mod config;
pub mod error;
pub mod graphql;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod seed;
pub mod services;
