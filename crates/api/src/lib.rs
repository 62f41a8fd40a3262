//! House Price Predictor API Server
//!
//! Serves the input form and the REST endpoints behind it.

use anyhow::Context;
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
mod error;
mod routes;

pub use crate::config::AppConfig;
pub use error::ApiError;

use crate::config::LoggingConfig;
use data_validator::Validator;
use feature_engine::{FeatureAssembler, FeatureSpec};
use inference_engine::{load_model, InferenceEngine};
use reporter::{render_chart, ChartStyle, PredictionReporter, CSV_FILENAME};

/// Read-only state built once at startup and shared by every handler
pub struct AppState {
    pub assembler: FeatureAssembler,
    pub validator: Validator,
    pub reporter: PredictionReporter,
    /// Importance chart, rendered once since the model never changes
    pub chart_png: Vec<u8>,
    /// Attachment name for CSV downloads
    pub csv_filename: String,
    pub version: String,
    pub start_time: std::time::Instant,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Wire the components around an already loaded engine
    pub fn new(engine: InferenceEngine, top_n: usize) -> anyhow::Result<Self> {
        let engine = Arc::new(engine);
        let assembler = FeatureAssembler::new(Arc::clone(engine.spec()));
        let reporter = PredictionReporter::new(engine, top_n);
        let chart_png = render_chart(reporter.top_features(), &ChartStyle::default())
            .context("rendering importance chart")?;

        Ok(Self {
            assembler,
            validator: Validator::default(),
            reporter,
            chart_png,
            csv_filename: CSV_FILENAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            metrics: None,
        })
    }

    /// Load the feature list and model artifacts named in the configuration
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let spec = FeatureSpec::load(&config.model.features_path)
            .context("loading feature list")?;
        let artifact = load_model(
            &config.model.path,
            config.model.format,
            config.model.importances_path.as_deref(),
        )
        .context("loading model")?;
        let engine = InferenceEngine::new(artifact, Arc::new(spec))?;

        Ok(Self::new(engine, config.report.top_n)?
            .with_csv_filename(config.report.csv_filename.clone()))
    }

    pub fn with_csv_filename(mut self, name: impl Into<String>) -> Self {
        self.csv_filename = name.into();
        self
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub model_backend: String,
    pub feature_count: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index::index))
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/fields", get(routes::model::get_fields))
        .route("/api/v1/model", get(routes::model::get_model))
        .route("/api/v1/importances", get(routes::model::get_importances))
        .route("/api/v1/importances/chart", get(routes::model::get_chart))
        .route("/api/v1/assemble", post(routes::predictions::assemble))
        .route("/api/v1/predict", post(routes::predictions::predict))
        .route("/api/v1/predict/csv", post(routes::predictions::predict_csv))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let engine = state.reporter.engine();

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model_backend: engine.metadata().backend.clone(),
        feature_count: engine.spec().len(),
    })
}

/// Prometheus scrape endpoint
async fn metrics_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let handle = state.metrics.as_ref().ok_or(ApiError::MetricsUnavailable)?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let level: Level = config
        .level
        .parse()
        .with_context(|| format!("invalid log level {:?}", config.level))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    }
    .context("failed to set tracing subscriber")
}

/// Load artifacts and run the server until it exits
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(&config)?;
    let metrics = PrometheusBuilder::new()
        .install_recorder()
        .context("installing metrics recorder")?;
    let app = create_router(Arc::new(state.with_metrics(metrics)));

    info!("Starting API server on {}", config.server.bind);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("binding {}", config.server.bind))?;
    axum::serve(listener, app).await?;

    Ok(())
}
