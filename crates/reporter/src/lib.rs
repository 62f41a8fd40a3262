//! Prediction Reporting
//!
//! Turns a model output into what the user sees: a rounded price, the most
//! influential features, a CSV download and a bar chart.

mod chart;
mod export;
mod format;
mod ranking;
mod reporter;

pub use chart::{render_chart, ChartStyle};
pub use export::{to_csv, CSV_FILENAME, PREDICTED_PRICE_COLUMN};
pub use format::format_price;
pub use ranking::{rank_importances, RankedFeature, DEFAULT_TOP_N};
pub use reporter::{PredictionReporter, PredictionResult};

use inference_engine::InferenceError;
use thiserror::Error;

/// Errors while producing a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Inference(#[from] InferenceError),
    #[error("CSV export failed: {0}")]
    Csv(String),
    #[error("Chart rendering failed: {0}")]
    Chart(String),
}
