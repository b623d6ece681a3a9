#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::manual_let_else)]
#![allow(clippy::single_match_else)]

use std::process::ExitCode;

use birthbook_server::{bootstrap, http, settings};

mod cli;

fn write_openapi(out: Option<std::path::PathBuf>) -> ExitCode {
    let spec = http::openapi::build_openapi();
    let json = match serde_json::to_string_pretty(&spec) {
        Ok(json) => json,
        Err(err) => {
            eprintln!("failed to render openapi spec: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(path) = out {
        if let Err(err) = std::fs::write(&path, json) {
            eprintln!("failed to write openapi spec: {err}");
            return ExitCode::FAILURE;
        }
    } else {
        println!("{json}");
    }
    ExitCode::SUCCESS
}

#[tokio::main]
async fn main() -> ExitCode {
    let run_mode = cli::parse_args();
    if let cli::RunMode::OpenApi { out } = run_mode {
        return write_openapi(out);
    }

    let settings = settings::Settings::from_env();
    let sentry_guard = bootstrap::init_sentry(&settings);
    let sentry_enabled = sentry_guard.is_some();
    let otel_guard = bootstrap::init_tracing(sentry_enabled, &settings);
    settings.log_warnings();
    let metrics_config = settings.config.metrics.clone();
    if run_mode == cli::RunMode::Migrate {
        let store = match birthbook_db::open_store(&settings.db_url, settings.db_pool_max).await {
            Ok(store) => store,
            Err(err) => {
                tracing::error!(event = "store_connect_failed", error = %err);
                return ExitCode::FAILURE;
            }
        };
        let result = store.migrate().await;
        store.close().await;
        return match result {
            Ok(()) => {
                tracing::info!(event = "migrations_applied", backend = store.backend());
                ExitCode::SUCCESS
            }
            Err(err) => {
                tracing::error!(event = "migration_failed", error = %err);
                ExitCode::FAILURE
            }
        };
    }

    if let Err(problems) = settings::preflight(&settings) {
        tracing::error!(
            event = "preflight_failed",
            problems = ?problems,
            "Configuration is not usable"
        );
        return ExitCode::FAILURE;
    }
    bootstrap::log_startup(&settings, &metrics_config);
    bootstrap::init_metrics_registry(&metrics_config);

    let store = match bootstrap::connect_store(&settings).await {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(event = "store_connect_failed", error = %err);
            return ExitCode::FAILURE;
        }
    };
    let state = bootstrap::build_state(&settings, store.clone());
    let app = bootstrap::build_app(&metrics_config, state);
    let served = bootstrap::serve(&settings, app).await;
    store.close().await;
    tracing::info!(event = "server_stopped", "Store closed");

    drop(otel_guard);
    drop(sentry_guard);
    if served.is_err() {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
