use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use shuttle_axum::axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::ingest::types::Entry;
use crate::news::{Category, NewsService};

#[derive(Clone)]
pub struct AppState {
    pub news: Arc<NewsService>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(news: NewsService) -> Self {
        Self {
            news: Arc::new(news),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

pub fn router(state: AppState) -> Router {
    let metrics = crate::metrics::router(state.metrics.clone());
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/news/{category}", get(category_news))
        .route("/digest", get(digest))
        .with_state(state)
        .merge(metrics)
        .layer(CorsLayer::very_permissive())
}

async fn category_news(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Entry>>, Response> {
    let Some(c) = Category::from_key(&category) else {
        return Err((StatusCode::NOT_FOUND, format!("unknown category: {category}")).into_response());
    };
    Ok(Json(state.news.entries(c).await))
}

async fn digest(State(state): State<AppState>) -> String {
    state.news.digest().await
}
