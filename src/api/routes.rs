use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use super::{handlers, middleware::track_metrics, repository_handlers};
use crate::graphql::{self, BankSchema};
use crate::observability::HealthChecker;
use crate::repositories::{DbPool, SqliteBankAccountRepository, SqliteCustomerRepository};
use crate::services::{AccountService, CustomerService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub accounts: Arc<AccountService>,
    pub customers: Arc<CustomerService>,
    pub schema: BankSchema,
    pub metrics_handle: Option<PrometheusHandle>,
    pub health_checker: Option<Arc<HealthChecker>>,
}

impl AppState {
    /// Wires the SQLite repositories into the services and the GraphQL schema.
    pub fn new(pool: DbPool) -> Self {
        let account_repo = Arc::new(SqliteBankAccountRepository::new(pool.clone()));
        let customer_repo = Arc::new(SqliteCustomerRepository::new(pool.clone()));

        let accounts = Arc::new(AccountService::new(account_repo.clone()));
        let customers = Arc::new(CustomerService::new(customer_repo, account_repo));
        let schema = graphql::build_schema(accounts.clone(), customers.clone());

        Self {
            pool,
            accounts,
            customers,
            schema,
            metrics_handle: None,
            health_checker: None,
        }
    }

    /// Adds metrics handle to the state.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    /// Adds health checker to the state.
    pub fn with_health_checker(mut self, checker: Arc<HealthChecker>) -> Self {
        self.health_checker = Some(checker);
        self
    }
}

/// Creates the main router: REST, repository and GraphQL surfaces plus
/// health and metrics.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health_check))
        .route("/health/detailed", get(handlers::detailed_health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/live", get(handlers::liveness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        // REST
        .route(
            "/bankAccounts",
            get(handlers::list_accounts).post(handlers::create_account),
        )
        .route(
            "/bankAccounts/:id",
            get(handlers::get_account)
                .put(handlers::update_account)
                .delete(handlers::delete_account),
        )
        // Repository endpoints
        .route("/api/bankAccounts", get(repository_handlers::list_bank_accounts))
        .route(
            "/api/bankAccounts/search/byType",
            get(repository_handlers::search_by_type),
        )
        .route("/api/bankAccounts/:id", get(repository_handlers::get_bank_account))
        .route("/api/customers", get(repository_handlers::list_customers))
        .route("/api/customers/:id", get(repository_handlers::get_customer))
        .route(
            "/api/customers/:id/bankAccounts",
            get(repository_handlers::customer_bank_accounts),
        )
        // GraphQL
        .route("/graphql", post(graphql::graphql_handler))
        .route("/graphiql", get(graphql::graphiql))
        .layer(middleware::from_fn(track_metrics))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
