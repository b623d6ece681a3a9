use axum::http::{Method, StatusCode};
use birthbook_server::app::AppState;
use birthbook_server::config::{MetricsConfig, MetricsProfile, ServerConfig};
use birthbook_server::infra::metrics;
use serde_json::json;

mod support;

#[tokio::test]
async fn metrics_endpoint_exports_http_and_user_metrics() {
    support::init_test_tracing();
    let metrics_config = MetricsConfig {
        enabled: true,
        endpoint: "/metrics".to_string(),
        profile: Some(MetricsProfile::Prod),
    };
    metrics::set_profile(metrics_config.effective_profile());
    let store = support::temp_store().await;
    let state = AppState::new(store.clone(), ServerConfig::default());
    let app = support::TestApp {
        app: birthbook_server::bootstrap::build_app(&metrics_config, state),
        store,
    };

    let health = app.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
    let created = app
        .send_json(
            Method::POST,
            "/users",
            json!({ "name": "Ada", "birthday": "1990-06-15" }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert!(created
        .content_type
        .as_deref()
        .is_some_and(|value| value.starts_with("application/json")));

    let response = app.get("/metrics").await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.text();
    assert!(body.contains("birthbook_http_requests_total"));
    assert!(body.contains("birthbook_http_request_duration_seconds"));
    assert!(body.contains(r#"route="/users""#));
    assert!(body.contains(r#"birthbook_user_operations_total{operation="create",result="ok"}"#));
}
