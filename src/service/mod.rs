//! The service facade: request validation, single and batch analysis, and
//! the held-out evaluation run that feeds the metrics engine.

mod builder;
mod error;

pub use builder::ServiceBuilder;
pub use error::ServiceError;

use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::backend::{
    BackendError, EmotionBackend, Explainer, KeywordEmotionBackend, LexiconBackend,
    LexiconExplainer, Prediction, SentimentBackend, TokenWeight,
};
use crate::cache::PredictionCache;
use crate::config::ServiceConfig;
use crate::metrics::{self, MetricsReport};

/// A request to analyze a single text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    /// When true and an explainer is attached, the response carries token
    /// contribution weights.
    #[serde(default)]
    pub explain: bool,
}

impl AnalyzeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            explain: false,
        }
    }

    pub fn with_explanation(mut self) -> Self {
        self.explain = true;
        self
    }
}

/// The analysis result for a single text. Optional enrichment fields are
/// omitted from serialized output when the corresponding side-channel was
/// disabled or unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub label: String,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion_confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Vec<TokenWeight>>,
}

/// One analyzed item of a batch request; `text` is the trimmed input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItem {
    pub text: String,
    pub label: String,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion_confidence: Option<f64>,
}

/// The result of a batch analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    pub items: Vec<BatchItem>,
}

/// A labeled sample for evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluateSample {
    pub text: String,
    pub label: String,
}

impl EvaluateSample {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// The fixed fixture used when an evaluation request carries no samples.
pub fn default_fixture() -> Vec<EvaluateSample> {
    vec![
        EvaluateSample::new("I love this product", "positive"),
        EvaluateSample::new("This is the worst thing ever", "negative"),
        EvaluateSample::new("It works as expected", "neutral"),
        EvaluateSample::new("Absolutely fantastic experience", "positive"),
        EvaluateSample::new("Not good, very disappointed", "negative"),
    ]
}

/// A snapshot of the service's configuration, in the spirit of a health or
/// info endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceInfo {
    pub backend: String,
    pub emotion_backend: Option<String>,
    pub explainer: Option<String>,
    pub cache_capacity: usize,
    pub cached_predictions: usize,
    pub explain_features: usize,
}

/// The text sentiment service facade.
///
/// Holds the injected backend collaborators and a bounded prediction cache.
/// All state needed by one evaluation run is function-local, so any number
/// of analyze/evaluate calls may run concurrently over a shared reference.
///
/// # Example
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use polarity::{AnalyzeRequest, LexiconBackend, SentimentService};
/// use std::sync::Arc;
///
/// let service = SentimentService::builder()
///     .with_backend(Arc::new(LexiconBackend::new()))
///     .build()?;
///
/// let response = service.analyze(&AnalyzeRequest::new("This is a great movie!"))?;
/// assert_eq!(response.label, "positive");
/// # Ok(())
/// # }
/// ```
///
/// # Thread Safety
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use polarity::{AnalyzeRequest, LexiconBackend, SentimentService};
/// use std::sync::Arc;
/// use std::thread;
///
/// let service = Arc::new(
///     SentimentService::builder()
///         .with_backend(Arc::new(LexiconBackend::new()))
///         .build()?,
/// );
///
/// let mut handles = vec![];
/// for _ in 0..3 {
///     let service = Arc::clone(&service);
///     handles.push(thread::spawn(move || {
///         service.analyze(&AnalyzeRequest::new("test text")).unwrap();
///     }));
/// }
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// # Ok(())
/// # }
/// ```
pub struct SentimentService {
    backend: Arc<dyn SentimentBackend>,
    emotion: Option<Arc<dyn EmotionBackend>>,
    explainer: Option<Arc<dyn Explainer>>,
    cache: PredictionCache,
    explain_features: usize,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<SentimentService>();
    }
};

impl SentimentService {
    /// Creates a new ServiceBuilder for fluent construction
    pub fn builder() -> ServiceBuilder {
        ServiceBuilder::new()
    }

    /// Assembles a service from configuration using the built-in providers.
    ///
    /// Unknown backend names fall back to the lexicon backend with a
    /// warning, mirroring the configured-default behavior of the upstream
    /// deployment rather than failing startup.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ServiceError> {
        if config.backend != "lexicon" {
            warn!(
                "unknown backend {:?}, falling back to the lexicon backend",
                config.backend
            );
        }
        let mut builder = Self::builder()
            .with_backend(Arc::new(LexiconBackend::new()))
            .with_explainer(Arc::new(LexiconExplainer::new()))
            .with_cache_capacity(config.cache_capacity)
            .with_explain_features(config.explain_features);
        if config.emotion_enabled {
            builder = builder.with_emotion(Arc::new(KeywordEmotionBackend::new()));
        }
        builder.build()
    }

    /// Returns information about the service's current state
    pub fn info(&self) -> ServiceInfo {
        ServiceInfo {
            backend: self.backend.name().to_string(),
            emotion_backend: self.emotion.as_ref().map(|e| e.name().to_string()),
            explainer: self.explainer.as_ref().map(|e| e.name().to_string()),
            cache_capacity: self.cache.capacity(),
            cached_predictions: self.cache.len(),
            explain_features: self.explain_features,
        }
    }

    /// Analyzes a single text.
    ///
    /// The text is trimmed first; an empty result is a validation error. The
    /// emotion and explanation enrichment steps each return a tagged result
    /// internally: on failure the field is omitted and the request still
    /// succeeds.
    ///
    /// # Errors
    /// * [`ServiceError::ValidationError`] when the text is empty or
    ///   whitespace.
    /// * [`ServiceError::Prediction`] when the primary backend fails.
    pub fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, ServiceError> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(ServiceError::ValidationError("text is required".into()));
        }

        let prediction = self.predict_cached(text)?;
        let (emotion_label, emotion_confidence) = self.enrich_emotion(text);

        let explanation = if request.explain {
            self.enrich_explanation(text)
        } else {
            None
        };

        Ok(AnalyzeResponse {
            label: prediction.label,
            confidence: prediction.confidence,
            emotion_label,
            emotion_confidence,
            explanation,
        })
    }

    /// Analyzes a batch of texts.
    ///
    /// Blank entries are skipped. A primary-backend failure on one entry
    /// skips that entry with a warning instead of failing the whole batch,
    /// the same policy evaluation uses for failed predictions.
    ///
    /// # Errors
    /// [`ServiceError::ValidationError`] when the list is empty or nothing
    /// usable remains after filtering.
    pub fn analyze_batch(&self, texts: &[String]) -> Result<BatchResponse, ServiceError> {
        if texts.is_empty() {
            return Err(ServiceError::ValidationError(
                "texts must be a non-empty list".into(),
            ));
        }

        let mut items = Vec::with_capacity(texts.len());
        for raw in texts {
            let text = raw.trim();
            if text.is_empty() {
                continue;
            }
            let prediction = match self.predict_cached(text) {
                Ok(prediction) => prediction,
                Err(e) => {
                    warn!("skipping batch item after backend failure: {}", e);
                    continue;
                }
            };
            let (emotion_label, emotion_confidence) = self.enrich_emotion(text);
            items.push(BatchItem {
                text: text.to_string(),
                label: prediction.label,
                confidence: prediction.confidence,
                emotion_label,
                emotion_confidence,
            });
        }

        if items.is_empty() {
            return Err(ServiceError::ValidationError(
                "no valid texts provided".into(),
            ));
        }
        Ok(BatchResponse { items })
    }

    /// Runs a held-out evaluation and derives classification metrics.
    ///
    /// `None` substitutes the [`default_fixture`]. Samples with blank text
    /// are dropped; a backend failure on a sample skips that sample with a
    /// warning rather than aborting the run, since one bad prediction should
    /// not invalidate an entire batch evaluation. The surviving
    /// `(true, predicted)` pairs go to [`metrics::evaluate_pairs`].
    ///
    /// # Errors
    /// * [`ServiceError::ValidationError`] when an explicitly given sample
    ///   list is empty.
    /// * [`ServiceError::Evaluation`] when no usable samples survive
    ///   filtering.
    pub fn evaluate(
        &self,
        samples: Option<&[EvaluateSample]>,
    ) -> Result<MetricsReport, ServiceError> {
        let fixture;
        let samples = match samples {
            Some([]) => {
                return Err(ServiceError::ValidationError(
                    "at least one sample is required".into(),
                ));
            }
            Some(samples) => samples,
            None => {
                debug!("no samples given, evaluating against the default fixture");
                fixture = default_fixture();
                &fixture
            }
        };

        let mut pairs = Vec::with_capacity(samples.len());
        for sample in samples {
            let text = sample.text.trim();
            if text.is_empty() {
                continue;
            }
            match self.predict_cached(text) {
                Ok(prediction) => pairs.push((sample.label.clone(), prediction.label)),
                Err(e) => warn!("skipping evaluation sample after backend failure: {}", e),
            }
        }

        debug!("evaluating {} (true, predicted) pairs", pairs.len());
        Ok(metrics::evaluate_pairs(&pairs)?)
    }

    /// Predicts through the cache: identical text within the cache's
    /// lifetime never recomputes.
    fn predict_cached(&self, text: &str) -> Result<Prediction, BackendError> {
        if let Some(hit) = self.cache.get(text) {
            debug!("prediction cache hit");
            return Ok(hit);
        }
        let prediction = self.backend.predict(text)?;
        self.cache.insert(text, prediction.clone());
        Ok(prediction)
    }

    fn enrich_emotion(&self, text: &str) -> (Option<String>, Option<f64>) {
        match &self.emotion {
            Some(backend) => match backend.predict_emotion(text) {
                Ok(emotion) => (Some(emotion.label), Some(emotion.confidence)),
                Err(e) => {
                    debug!("emotion enrichment unavailable: {}", e);
                    (None, None)
                }
            },
            None => (None, None),
        }
    }

    fn enrich_explanation(&self, text: &str) -> Option<Vec<TokenWeight>> {
        match &self.explainer {
            Some(explainer) => match explainer.explain(text, self.explain_features) {
                Ok(weights) => Some(weights),
                Err(e) => {
                    debug!("explanation unavailable: {}", e);
                    None
                }
            },
            None => None,
        }
    }
}
