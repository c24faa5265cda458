//! A text sentiment analysis service with pluggable backends, batch
//! processing, optional enrichment (emotion, explanations) and a held-out
//! evaluation endpoint computing per-label and aggregate classification
//! metrics.
//!
//! # Basic Usage
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use polarity::{AnalyzeRequest, LexiconBackend, SentimentService};
//! use std::sync::Arc;
//!
//! let service = SentimentService::builder()
//!     .with_backend(Arc::new(LexiconBackend::new()))
//!     .build()?;
//!
//! let response = service.analyze(&AnalyzeRequest::new("This is a great movie!"))?;
//! println!("label: {} ({:.2})", response.label, response.confidence);
//! # Ok(())
//! # }
//! ```
//!
//! # Evaluation
//!
//! Any type implementing [`SentimentBackend`] can be evaluated against
//! labeled samples; the metrics engine reports accuracy, per-label F1 and
//! macro/micro F1:
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use polarity::{EvaluateSample, LexiconBackend, SentimentService};
//! use std::sync::Arc;
//!
//! let service = SentimentService::builder()
//!     .with_backend(Arc::new(LexiconBackend::new()))
//!     .build()?;
//!
//! let samples = vec![
//!     EvaluateSample::new("I love this product", "positive"),
//!     EvaluateSample::new("This is the worst thing ever", "negative"),
//! ];
//! let report = service.evaluate(Some(&samples))?;
//! assert_eq!(report.accuracy, 1.0);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod cache;
pub mod config;
pub mod metrics;
pub mod service;

pub use backend::{
    BackendError, EmotionBackend, EmotionPrediction, Explainer, KeywordEmotionBackend,
    LexiconBackend, LexiconExplainer, Prediction, SentimentBackend, TokenWeight,
};
pub use cache::PredictionCache;
pub use config::ServiceConfig;
pub use metrics::{evaluate_pairs, ConfusionCounts, EvalError, LabelCounts, MetricsReport};
pub use service::{
    default_fixture, AnalyzeRequest, AnalyzeResponse, BatchItem, BatchResponse, EvaluateSample,
    SentimentService, ServiceBuilder, ServiceError, ServiceInfo,
};

pub fn init_logger() {
    env_logger::init();
}
