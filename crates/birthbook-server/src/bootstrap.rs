use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use birthbook_core::{StoreError, UserStore};
use opentelemetry::global;
use opentelemetry::propagation::Extractor;
use prometheus::Encoder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::app::{self, AppState};
use crate::config::{MetricsConfig, MetricsProfile};
use crate::infra::metrics;
use crate::runtime;
use crate::settings;

struct HeaderExtractor<'a>(&'a axum::http::HeaderMap);

impl<'a> Extractor for HeaderExtractor<'a> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|key| key.as_str()).collect()
    }
}

pub fn init_sentry(settings: &settings::Settings) -> Option<sentry::ClientInitGuard> {
    let sentry_enabled = settings.config.sentry.enabled && !settings.config.sentry.dsn.is_empty();
    if !sentry_enabled {
        return None;
    }
    let environment = settings.config.sentry.environment.clone();
    let release = settings.config.sentry.release.clone();
    Some(sentry::init((
        settings.config.sentry.dsn.as_str(),
        sentry::ClientOptions {
            environment: environment.map(Into::into),
            release: release.map(Into::into),
            ..Default::default()
        },
    )))
}

pub fn init_tracing(
    sentry_enabled: bool,
    settings: &settings::Settings,
) -> Option<runtime::OtelGuard> {
    runtime::init_tracing(sentry_enabled, settings)
}

pub fn log_startup(settings: &settings::Settings, metrics_config: &MetricsConfig) {
    let metrics_profile = metrics_config.effective_profile();
    tracing::info!(
        event = "server_startup",
        addr = %settings.addr,
        db_url = %birthbook_db::redact_url(&settings.db_url),
        db_pool_max = settings.db_pool_max,
        auto_migrate = settings.config.database.auto_migrate,
        malformed_birthdays = ?settings.config.search.malformed_birthdays,
        max_body_bytes = settings.config.server.max_body_bytes,
        otel_enabled = settings.config.tracing.otel.enabled,
        metrics_enabled = metrics_config.enabled,
        metrics_profile = ?metrics_profile,
        server_name = ?settings.config.server.name,
        "Server configuration loaded"
    );
    if metrics_config.enabled && metrics_profile != MetricsProfile::Prod {
        tracing::warn!(
            event = "metrics_profile_non_prod",
            profile = ?metrics_profile,
            "Non-prod metrics profile enabled"
        );
    }
}

pub fn init_metrics_registry(metrics_config: &MetricsConfig) {
    metrics::set_profile(metrics_config.effective_profile());
    if !metrics_config.enabled {
        return;
    }
    #[cfg(target_os = "linux")]
    {
        let process_collector = prometheus::process_collector::ProcessCollector::for_self();
        if prometheus::default_registry()
            .register(Box::new(process_collector))
            .is_err()
        {
            tracing::warn!("failed to register process metrics");
        }
    }
    #[cfg(not(target_os = "linux"))]
    {
        tracing::warn!("process metrics are only available on linux");
    }
}

/// Opens the configured store and, when `database.auto_migrate` is set,
/// brings its schema up to date.
pub async fn connect_store(
    settings: &settings::Settings,
) -> Result<Arc<dyn UserStore>, StoreError> {
    let store = birthbook_db::open_store(&settings.db_url, settings.db_pool_max).await?;
    tracing::info!(event = "store_connected", backend = store.backend());
    if settings.config.database.auto_migrate {
        store.migrate().await?;
        tracing::info!(event = "store_migrated", backend = store.backend());
    }
    Ok(store)
}

pub fn build_state(settings: &settings::Settings, store: Arc<dyn UserStore>) -> AppState {
    AppState::new(store, settings.config.clone())
}

pub fn build_app(metrics_config: &MetricsConfig, state: AppState) -> Router {
    let request_id_header = axum::http::HeaderName::from_static("x-request-id");
    let mut app = app::build_router(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("unknown");
                let matched = request
                    .extensions()
                    .get::<axum::extract::MatchedPath>()
                    .map(axum::extract::MatchedPath::as_str)
                    .unwrap_or("unmatched");
                let span = tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %matched,
                    request_id = %request_id,
                );
                let parent = global::get_text_map_propagator(|prop| {
                    prop.extract(&HeaderExtractor(request.headers()))
                });
                span.set_parent(parent);
                span
            }),
        )
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(CatchPanicLayer::custom(|err| {
            tracing::error!(event = "panic_recovered", error = ?err, "handler panicked");
            let body = serde_json::json!({ "error": "internal_error" }).to_string();
            match axum::response::Response::builder()
                .status(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(body))
            {
                Ok(response) => response,
                Err(err) => {
                    tracing::error!(event = "panic_response_failed", error = %err);
                    axum::response::Response::new(axum::body::Body::empty())
                }
            }
        }));
    if metrics_config.enabled {
        app = app.route_layer(middleware::from_fn(metrics::http_metrics));
        let (layer, handle) = axum_prometheus::PrometheusMetricLayer::pair();
        let path = metrics_config.endpoint.clone();
        app = app.layer(layer).route(
            &path,
            axum::routing::get(move || async move {
                let mut body = String::new();
                body.push_str(&handle.render());
                let encoder = prometheus::TextEncoder::new();
                let metric_families = prometheus::gather();
                let mut buffer = Vec::new();
                if encoder.encode(&metric_families, &mut buffer).is_ok() && !buffer.is_empty() {
                    body.push('\n');
                    body.push_str(&String::from_utf8_lossy(&buffer));
                }

                let content_type = encoder.format_type().to_string();
                let mut response = axum::response::Response::new(axum::body::Body::from(body));
                if let Ok(value) = axum::http::HeaderValue::from_str(&content_type) {
                    response
                        .headers_mut()
                        .insert(axum::http::header::CONTENT_TYPE, value);
                }
                response
            }),
        );
    }
    app
}

pub async fn serve(settings: &settings::Settings, app: Router) -> Result<(), std::io::Error> {
    let addr: SocketAddr = settings.addr;
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|err| {
        tracing::error!(event = "server_bind_failed", %addr, error = %err);
        err
    })?;
    tracing::info!(event = "server_listening", %addr, "listening");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(runtime::shutdown_signal())
    .await
    .map_err(|err| {
        tracing::error!(event = "server_failed", error = %err);
        err
    })
}
