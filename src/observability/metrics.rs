use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Instant;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Global metrics instance.
pub static METRICS: OnceLock<Metrics> = OnceLock::new();

/// Metrics recorder facade for the account service.
///
/// Without an installed recorder every call is a no-op, which keeps tests free
/// of global state.
#[derive(Debug, Clone, Default)]
pub struct Metrics;

impl Metrics {
    pub fn record_account_created(&self, account_type: &str) {
        counter!("bank_accounts_created_total", "type" => account_type.to_string()).increment(1);
    }

    pub fn record_account_updated(&self) {
        counter!("bank_accounts_updated_total").increment(1);
    }

    pub fn record_account_deleted(&self, existed: bool) {
        counter!("bank_accounts_deleted_total", "existed" => existed.to_string()).increment(1);
    }

    pub fn record_lookup_miss(&self, entity: &str) {
        counter!("bank_lookup_misses_total", "entity" => entity.to_string()).increment(1);
    }

    pub fn record_http_request(&self, method: &str, path: &str, status: u16, duration_ms: f64) {
        counter!("http_requests_total", "method" => method.to_string(), "path" => path.to_string(), "status" => status.to_string()).increment(1);
        histogram!("http_request_duration_ms", "method" => method.to_string(), "path" => path.to_string()).record(duration_ms);
    }

    /// `kind` is the operation type (`query`, `mutation`, ...), never a name
    /// chosen by the client.
    pub fn record_graphql_operation(&self, kind: &'static str, success: bool) {
        counter!("graphql_operations_total", "kind" => kind, "success" => success.to_string()).increment(1);
    }
}

/// Timer for measuring operation latency.
pub struct LatencyTimer {
    start: Instant,
}

impl LatencyTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for LatencyTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Installs the Prometheus recorder once and returns its handle.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    if let Some(handle) = METRICS_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_metrics();
    let handle = METRICS_HANDLE.get_or_init(|| handle).clone();
    METRICS.get_or_init(Metrics::default);

    Ok(handle)
}

fn describe_metrics() {
    describe_counter!("bank_accounts_created_total", Unit::Count, "Accounts created, by type");
    describe_counter!("bank_accounts_updated_total", Unit::Count, "Partial account updates applied");
    describe_counter!("bank_accounts_deleted_total", Unit::Count, "Delete requests, by whether the account existed");
    describe_counter!("bank_lookup_misses_total", Unit::Count, "Lookups by id that found nothing");
    describe_counter!("graphql_operations_total", Unit::Count, "GraphQL operations executed, by operation type");

    describe_counter!("http_requests_total", Unit::Count, "Total HTTP requests");
    describe_histogram!("http_request_duration_ms", Unit::Milliseconds, "HTTP request latency in milliseconds");
}

/// Returns the global metrics instance.
pub fn get_metrics() -> &'static Metrics {
    METRICS.get_or_init(Metrics::default)
}
