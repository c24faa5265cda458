use std::sync::Arc;

use log::info;

use super::error::ServiceError;
use super::SentimentService;
use crate::backend::{EmotionBackend, Explainer, SentimentBackend};
use crate::cache::PredictionCache;

const DEFAULT_CACHE_CAPACITY: usize = 4096;
const DEFAULT_EXPLAIN_FEATURES: usize = 10;

/// A builder for constructing a [`SentimentService`] with a fluent
/// interface.
///
/// The sentiment backend is the one required collaborator; the emotion
/// backend and explainer are optional enrichment channels.
///
/// # Example
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use polarity::{LexiconBackend, SentimentService};
/// use std::sync::Arc;
///
/// let service = SentimentService::builder()
///     .with_backend(Arc::new(LexiconBackend::new()))
///     .with_cache_capacity(1024)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ServiceBuilder {
    backend: Option<Arc<dyn SentimentBackend>>,
    emotion: Option<Arc<dyn EmotionBackend>>,
    explainer: Option<Arc<dyn Explainer>>,
    cache_capacity: Option<usize>,
    explain_features: Option<usize>,
}

impl ServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the primary sentiment backend. Required.
    pub fn with_backend(mut self, backend: Arc<dyn SentimentBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attaches an emotion side-channel backend.
    pub fn with_emotion(mut self, emotion: Arc<dyn EmotionBackend>) -> Self {
        self.emotion = Some(emotion);
        self
    }

    /// Attaches an explanation provider.
    pub fn with_explainer(mut self, explainer: Arc<dyn Explainer>) -> Self {
        self.explainer = Some(explainer);
        self
    }

    /// Sets the prediction cache capacity (default 4096, must be at least 1).
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    /// Sets the maximum number of token contributions returned per
    /// explanation (default 10, must be at least 1).
    pub fn with_explain_features(mut self, features: usize) -> Self {
        self.explain_features = Some(features);
        self
    }

    /// Builds the service.
    ///
    /// # Errors
    /// [`ServiceError::BuildError`] when no backend was provided or a
    /// numeric parameter is zero.
    pub fn build(self) -> Result<SentimentService, ServiceError> {
        let backend = self
            .backend
            .ok_or_else(|| ServiceError::BuildError("a sentiment backend is required".into()))?;

        let cache_capacity = self.cache_capacity.unwrap_or(DEFAULT_CACHE_CAPACITY);
        if cache_capacity == 0 {
            return Err(ServiceError::BuildError(
                "cache capacity must be at least 1".into(),
            ));
        }
        let explain_features = self.explain_features.unwrap_or(DEFAULT_EXPLAIN_FEATURES);
        if explain_features == 0 {
            return Err(ServiceError::BuildError(
                "explain features must be at least 1".into(),
            ));
        }

        info!(
            "building sentiment service: backend={}, emotion={}, explainer={}, cache_capacity={}",
            backend.name(),
            self.emotion.as_ref().map(|e| e.name()).unwrap_or("none"),
            self.explainer.as_ref().map(|e| e.name()).unwrap_or("none"),
            cache_capacity
        );

        Ok(SentimentService {
            backend,
            emotion: self.emotion,
            explainer: self.explainer,
            cache: PredictionCache::new(cache_capacity),
            explain_features,
        })
    }
}
