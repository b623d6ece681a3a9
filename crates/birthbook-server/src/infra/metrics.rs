use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, register_int_gauge,
    HistogramVec, IntCounter, IntCounterVec, IntGauge,
};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::LazyLock;
use std::time::Instant;
use tracing::warn;

use crate::config::MetricsProfile;

const PROFILE_PROD: u8 = 0;
const PROFILE_STAGING: u8 = 1;
const PROFILE_DEBUG: u8 = 2;

static METRICS_PROFILE: AtomicU8 = AtomicU8::new(PROFILE_PROD);

pub fn set_profile(profile: MetricsProfile) {
    let value = match profile {
        MetricsProfile::Prod => PROFILE_PROD,
        MetricsProfile::Staging => PROFILE_STAGING,
        MetricsProfile::Debug => PROFILE_DEBUG,
    };
    METRICS_PROFILE.store(value, Ordering::Relaxed);
}

pub(crate) fn active_profile() -> MetricsProfile {
    match METRICS_PROFILE.load(Ordering::Relaxed) {
        PROFILE_STAGING => MetricsProfile::Staging,
        PROFILE_DEBUG => MetricsProfile::Debug,
        _ => MetricsProfile::Prod,
    }
}

// A metric that fails to register is logged once and then silently skipped.
fn registered<T>(name: &str, result: prometheus::Result<T>) -> Option<T> {
    match result {
        Ok(metric) => Some(metric),
        Err(err) => {
            warn!(event = "metrics_register_failed", metric = name, error = %err);
            None
        }
    }
}

fn http_buckets() -> Vec<f64> {
    vec![
        0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ]
}

static HTTP_IN_FLIGHT: LazyLock<Option<IntGauge>> = LazyLock::new(|| {
    registered(
        "birthbook_http_in_flight",
        register_int_gauge!("birthbook_http_in_flight", "HTTP requests in flight"),
    )
});

static HTTP_REQUESTS: LazyLock<Option<IntCounterVec>> = LazyLock::new(|| {
    registered(
        "birthbook_http_requests_total",
        register_int_counter_vec!(
            "birthbook_http_requests_total",
            "HTTP requests",
            &["method", "route", "status_class"]
        ),
    )
});

static HTTP_REQUESTS_BY_STATUS: LazyLock<Option<IntCounterVec>> = LazyLock::new(|| {
    registered(
        "birthbook_http_requests_by_status_total",
        register_int_counter_vec!(
            "birthbook_http_requests_by_status_total",
            "HTTP requests by status",
            &["method", "route", "status"]
        ),
    )
});

static HTTP_LATENCY: LazyLock<Option<HistogramVec>> = LazyLock::new(|| {
    registered(
        "birthbook_http_request_duration_seconds",
        register_histogram_vec!(
            "birthbook_http_request_duration_seconds",
            "HTTP request latency",
            &["route"],
            http_buckets()
        ),
    )
});

static USER_OPERATIONS: LazyLock<Option<IntCounterVec>> = LazyLock::new(|| {
    registered(
        "birthbook_user_operations_total",
        register_int_counter_vec!(
            "birthbook_user_operations_total",
            "User record operations",
            &["operation", "result"]
        ),
    )
});

static SEARCH_SKIPPED: LazyLock<Option<IntCounter>> = LazyLock::new(|| {
    registered(
        "birthbook_search_skipped_records_total",
        register_int_counter!(
            "birthbook_search_skipped_records_total",
            "Records left out of age searches because their birthday did not parse"
        ),
    )
});

pub fn user_operation(operation: &str, result: &str) {
    if let Some(counter) = USER_OPERATIONS.as_ref() {
        counter.with_label_values(&[operation, result]).inc();
    }
}

pub fn search_skipped(count: usize) {
    if let Some(counter) = SEARCH_SKIPPED.as_ref() {
        counter.inc_by(u64::try_from(count).unwrap_or(u64::MAX));
    }
}

pub async fn http_metrics(req: Request<Body>, next: Next) -> Response {
    let method = req.method().as_str().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str)
        .unwrap_or("unmatched")
        .to_string();
    let in_flight = HTTP_IN_FLIGHT.as_ref();
    if let Some(gauge) = in_flight {
        gauge.inc();
    }
    let start = Instant::now();
    let response = next.run(req).await;
    let elapsed = start.elapsed().as_secs_f64();
    if let Some(gauge) = in_flight {
        gauge.dec();
    }
    record_http_request(&method, &route, response.status().as_u16(), elapsed);
    response
}

pub fn record_http_request(method: &str, route: &str, status: u16, duration_seconds: f64) {
    let status_class = match status / 100 {
        1 => "1xx",
        2 => "2xx",
        3 => "3xx",
        4 => "4xx",
        5 => "5xx",
        _ => "unknown",
    };
    if let Some(counter) = HTTP_REQUESTS.as_ref() {
        counter
            .with_label_values(&[method, route, status_class])
            .inc();
    }
    if let Some(histogram) = HTTP_LATENCY.as_ref() {
        histogram
            .with_label_values(&[route])
            .observe(duration_seconds);
    }

    match active_profile() {
        MetricsProfile::Prod => {}
        MetricsProfile::Staging | MetricsProfile::Debug => {
            if let Some(counter) = HTTP_REQUESTS_BY_STATUS.as_ref() {
                counter
                    .with_label_values(&[method, route, &status.to_string()])
                    .inc();
            }
        }
    }
}
