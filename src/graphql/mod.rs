//! GraphQL surface over the account and customer services.

pub mod mutation;
pub mod query;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

use async_graphql::parser::{
    parse_query,
    types::{DocumentOperations, OperationType},
};
use async_graphql::{http::GraphiQLSource, EmptySubscription, ErrorExtensions, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::api::AppState;
use crate::error::AppError;
use crate::observability::get_metrics;
use crate::services::{AccountService, CustomerService};

pub type BankSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(accounts: Arc<AccountService>, customers: Arc<CustomerService>) -> BankSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(accounts)
        .data(customers)
        .finish()
}

/// `POST /graphql`
pub async fn graphql_handler(State(state): State<AppState>, request: GraphQLRequest) -> GraphQLResponse {
    let request = request.into_inner();
    let kind = operation_kind(&request);

    let response = state.schema.execute(request).await;
    get_metrics().record_graphql_operation(kind, response.is_ok());

    response.into()
}

/// Metrics label for a request. Client-chosen operation names are not used,
/// so the label set stays fixed.
fn operation_kind(request: &async_graphql::Request) -> &'static str {
    let Ok(document) = parse_query(&request.query) else {
        return "invalid";
    };

    let ty = match &document.operations {
        DocumentOperations::Single(operation) => Some(operation.node.ty),
        DocumentOperations::Multiple(operations) => request
            .operation_name
            .as_deref()
            .and_then(|name| {
                operations
                    .iter()
                    .find(|(candidate, _)| candidate.as_str() == name)
            })
            .map(|(_, operation)| operation.node.ty),
    };

    match ty {
        Some(OperationType::Query) => "query",
        Some(OperationType::Mutation) => "mutation",
        Some(OperationType::Subscription) => "subscription",
        None => "unknown",
    }
}

/// `GET /graphiql`
pub async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

impl ErrorExtensions for AppError {
    /// Field error carrying `extensions.code`, so clients can tell a missing
    /// account from a server fault.
    fn extend(&self) -> async_graphql::Error {
        if self.is_internal() {
            tracing::error!(error = %self, "GraphQL resolver failed");
        }

        let code = self.code();
        async_graphql::Error::new(self.public_message()).extend_with(|_, e| e.set("code", code))
    }
}
