//! News digest service: boots the Axum HTTP server on the Shuttle runtime.

use news_digest::api::{self, AppState};
use news_digest::config::AppConfig;
use news_digest::metrics::Metrics;
use news_digest::NewsService;
use shuttle_axum::ShuttleAxum;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    news_digest::init_tracing();

    let cfg = AppConfig::from_env().expect("Failed to load news configuration");
    let news = NewsService::from_config(&cfg).expect("Failed to build news service");

    let mut state = AppState::new(news);
    match Metrics::init() {
        Ok(m) => state = state.with_metrics(m.handle),
        Err(e) => tracing::warn!(error = ?e, "metrics disabled"),
    }

    tracing::info!(
        dedup_path = %cfg.fetch.dedup_path,
        timeout_secs = cfg.fetch.timeout_secs,
        "news digest service ready"
    );

    Ok(api::router(state).into())
}
