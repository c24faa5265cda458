use std::env;

use log::warn;

/// Runtime configuration for assembling a
/// [`SentimentService`](crate::SentimentService), read from `POLARITY_*`
/// environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Backend name; `lexicon` is the only built-in provider.
    pub backend: String,
    /// Whether the emotion side-channel is attached.
    pub emotion_enabled: bool,
    /// Maximum number of token contributions in an explanation.
    pub explain_features: usize,
    /// Prediction cache capacity.
    pub cache_capacity: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            backend: "lexicon".to_string(),
            emotion_enabled: true,
            explain_features: 10,
            cache_capacity: 4096,
        }
    }
}

impl ServiceConfig {
    /// Reads configuration from the environment:
    /// - `POLARITY_BACKEND` (default `lexicon`)
    /// - `POLARITY_EMOTION_ENABLED` (default `true`)
    /// - `POLARITY_EXPLAIN_FEATURES` (default `10`)
    /// - `POLARITY_CACHE_CAPACITY` (default `4096`)
    ///
    /// Unparsable numeric values fall back to the default with a warning.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: env::var("POLARITY_BACKEND")
                .map(|value| value.to_lowercase())
                .unwrap_or(defaults.backend),
            emotion_enabled: env::var("POLARITY_EMOTION_ENABLED")
                .map(|value| value.to_lowercase() == "true")
                .unwrap_or(defaults.emotion_enabled),
            explain_features: parse_env("POLARITY_EXPLAIN_FEATURES", defaults.explain_features),
            cache_capacity: parse_env("POLARITY_CACHE_CAPACITY", defaults.cache_capacity),
        }
    }
}

fn parse_env(name: &str, default: usize) -> usize {
    match env::var(name) {
        Ok(value) => match value.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("ignoring unparsable {} value {:?}", name, value);
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.backend, "lexicon");
        assert!(config.emotion_enabled);
        assert_eq!(config.explain_features, 10);
        assert_eq!(config.cache_capacity, 4096);
    }

    #[test]
    fn test_parse_env_fallback() {
        assert_eq!(parse_env("POLARITY_TEST_UNSET_VARIABLE", 7), 7);
    }
}
