use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::time::{Duration, Instant};

const CHECK_TIMEOUT: Duration = Duration::from_secs(2);
const SLOW_QUERY_MS: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }

    /// Healthy or degraded: the service can still answer requests.
    pub fn is_serving(&self) -> bool {
        !matches!(self, HealthStatus::Unhealthy)
    }
}

/// Result of probing one part of the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    pub latency_ms: Option<f64>,
    pub message: Option<String>,
}

impl ComponentHealth {
    /// Classifies a successful probe by how long it took.
    pub fn from_latency(name: &str, latency_ms: f64) -> Self {
        let slow = latency_ms > SLOW_QUERY_MS;
        Self {
            name: name.to_string(),
            status: if slow { HealthStatus::Degraded } else { HealthStatus::Healthy },
            latency_ms: Some(latency_ms),
            message: slow.then(|| "High latency detected".to_string()),
        }
    }

    pub fn failed(name: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: HealthStatus::Unhealthy,
            latency_ms: None,
            message: Some(message.into()),
        }
    }
}

/// Health report returned by `/health/detailed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: Vec<ComponentHealth>,
}

impl HealthReport {
    pub fn new(uptime_seconds: u64, components: Vec<ComponentHealth>) -> Self {
        let status = components
            .iter()
            .map(|c| c.status)
            .max_by_key(|s| match s {
                HealthStatus::Healthy => 0,
                HealthStatus::Degraded => 1,
                HealthStatus::Unhealthy => 2,
            })
            .unwrap_or(HealthStatus::Healthy);

        Self {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds,
            components,
        }
    }
}

/// Probes the account store.
pub struct HealthChecker {
    pool: SqlitePool,
    start_time: Instant,
}

impl HealthChecker {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            start_time: Instant::now(),
        }
    }

    pub async fn check_all(&self) -> HealthReport {
        let components = vec![self.check_store().await, self.check_schema().await];
        HealthReport::new(self.uptime_seconds(), components)
    }

    /// The store answers a trivial query.
    pub async fn check_store(&self) -> ComponentHealth {
        self.probe("store", "SELECT 1").await
    }

    /// The account table exists and can be scanned.
    pub async fn check_schema(&self) -> ComponentHealth {
        self.probe("schema", "SELECT COUNT(*) FROM bank_accounts").await
    }

    async fn probe(&self, name: &str, sql: &str) -> ComponentHealth {
        let start = Instant::now();

        match tokio::time::timeout(CHECK_TIMEOUT, sqlx::query(sql).fetch_one(&self.pool)).await {
            Ok(Ok(_)) => ComponentHealth::from_latency(name, start.elapsed().as_secs_f64() * 1000.0),
            Ok(Err(e)) => ComponentHealth::failed(name, format!("Query failed: {}", e)),
            Err(_) => ComponentHealth::failed(name, "Query timeout"),
        }
    }

    pub async fn is_ready(&self) -> bool {
        self.check_store().await.status.is_serving()
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
