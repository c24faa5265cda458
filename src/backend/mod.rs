//! Backend capability traits and the built-in providers.
//!
//! The service core only depends on the contracts defined here; concrete
//! model providers are injected at construction time and can be swapped
//! without touching the evaluation or facade code.

mod emotion;
mod explain;
mod lexicon;

pub use emotion::KeywordEmotionBackend;
pub use explain::LexiconExplainer;
pub use lexicon::LexiconBackend;

use serde::{Deserialize, Serialize};

/// Errors originating from a backend collaborator.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The input failed the backend's own validation (empty text etc).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The backend could not produce a result for this input.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// A sentiment prediction for a single text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    /// Confidence in the predicted label, in [0, 1].
    pub confidence: f64,
}

/// An emotion prediction from the optional emotion side-channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionPrediction {
    pub label: String,
    pub confidence: f64,
}

/// One token's contribution to a prediction, as reported by an explainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenWeight {
    pub token: String,
    /// Signed contribution weight; positive values push towards the
    /// positive label.
    pub weight: f64,
}

/// The primary label predictor capability.
///
/// Implementations must be deterministic for a fixed configuration: repeated
/// calls with identical text return the identical label. This is what makes
/// memoizing results in the [`PredictionCache`](crate::PredictionCache)
/// sound.
pub trait SentimentBackend: Send + Sync {
    /// A short human-readable backend name, used for logging and `info()`.
    fn name(&self) -> &str;

    /// Predicts the sentiment label and confidence for the given text.
    fn predict(&self, text: &str) -> Result<Prediction, BackendError>;
}

/// The optional emotion side-channel capability.
///
/// Failures here are expected and non-fatal: the facade omits the emotion
/// fields rather than failing the request.
pub trait EmotionBackend: Send + Sync {
    fn name(&self) -> &str;

    fn predict_emotion(&self, text: &str) -> Result<EmotionPrediction, BackendError>;
}

/// The optional local-explanation capability.
pub trait Explainer: Send + Sync {
    fn name(&self) -> &str;

    /// Returns up to `max_features` token contributions, ordered by
    /// descending absolute weight.
    fn explain(&self, text: &str, max_features: usize) -> Result<Vec<TokenWeight>, BackendError>;
}
