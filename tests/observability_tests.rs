mod common;

use axum::http::StatusCode;
use bank_account_service::api::create_router;
use bank_account_service::config::ApplicationSettings;
use bank_account_service::observability::{HealthChecker, HealthStatus, LogConfig, LogFormat};
use std::sync::Arc;

#[test]
fn test_log_config_keeps_directive_strings() {
    let settings = ApplicationSettings {
        host: "127.0.0.1".to_string(),
        port: 8082,
        log_level: "bank_account_service=trace,sqlx=warn".to_string(),
        log_format: "Compact".to_string(),
    };

    let config = LogConfig::from(&settings);
    assert_eq!(config.level, "bank_account_service=trace,sqlx=warn");
    assert_eq!(config.format, LogFormat::Compact);
    assert!(!config.include_file);
}

#[test]
fn test_unknown_log_format_falls_back_to_pretty() {
    assert_eq!(LogFormat::from("compact"), LogFormat::Compact);
    assert_eq!(LogFormat::from("xml"), LogFormat::Pretty);
}

#[tokio::test]
async fn test_health_checker_on_live_store() {
    let pool = common::setup_test_db().await;
    let checker = HealthChecker::new(pool);

    let store = checker.check_store().await;
    assert_eq!(store.name, "store");
    assert!(store.status.is_serving());
    assert!(store.latency_ms.is_some());

    let report = checker.check_all().await;
    assert_eq!(report.components.len(), 2);
    assert_ne!(report.status, HealthStatus::Unhealthy);
    assert!(checker.is_ready().await);
}

#[tokio::test]
async fn test_closed_store_is_unhealthy() {
    let pool = common::setup_test_db().await;
    let checker = HealthChecker::new(pool.clone());
    pool.close().await;

    let store = checker.check_store().await;
    assert_eq!(store.status, HealthStatus::Unhealthy);
    assert!(store.message.is_some());
    assert!(!checker.is_ready().await);
}

#[tokio::test]
async fn test_detailed_health_endpoint() {
    let state = common::setup_state().await;
    let checker = Arc::new(HealthChecker::new(state.pool.clone()));
    let app = create_router(state.with_health_checker(checker));

    let (status, json) = common::send(&app, "GET", "/health/detailed", None).await;

    assert_eq!(status, StatusCode::OK);
    let report = &json["data"];
    assert_eq!(report["version"], env!("CARGO_PKG_VERSION"));
    let names: Vec<&str> = report["components"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["store", "schema"]);
}
