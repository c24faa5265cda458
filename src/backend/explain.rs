use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::lexicon::{signed_polarities, tokenize};
use super::{BackendError, Explainer, TokenWeight};

/// A local explainer backed by the same lexicon and negation rules as
/// [`LexiconBackend`](super::LexiconBackend), so explanations always agree
/// with the prediction they describe.
///
/// Each distinct token's signed hits are accumulated and normalized by the
/// total token count; results are ordered by descending absolute weight with
/// an ascending-token tie-break, truncated to `max_features`.
#[derive(Debug, Default, Clone)]
pub struct LexiconExplainer;

impl LexiconExplainer {
    pub fn new() -> Self {
        Self
    }
}

impl Explainer for LexiconExplainer {
    fn name(&self) -> &str {
        "lexicon-contributions"
    }

    fn explain(&self, text: &str, max_features: usize) -> Result<Vec<TokenWeight>, BackendError> {
        if text.trim().is_empty() {
            return Err(BackendError::InvalidInput(
                "input text cannot be empty".into(),
            ));
        }

        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let mut contributions: BTreeMap<&str, f64> = BTreeMap::new();
        for (index, weight) in signed_polarities(&tokens) {
            *contributions.entry(tokens[index].as_str()).or_insert(0.0) += weight;
        }

        let token_count = tokens.len() as f64;
        let mut weights: Vec<TokenWeight> = contributions
            .into_iter()
            .map(|(token, weight)| TokenWeight {
                token: token.to_string(),
                weight: weight / token_count,
            })
            .collect();

        weights.sort_by(|a, b| {
            b.weight
                .abs()
                .partial_cmp(&a.weight.abs())
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.token.cmp(&b.token))
        });
        weights.truncate(max_features);
        Ok(weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_token_has_positive_weight() {
        let weights = LexiconExplainer::new()
            .explain("a great movie", 10)
            .unwrap();
        assert_eq!(weights.len(), 1);
        assert_eq!(weights[0].token, "great");
        assert!(weights[0].weight > 0.0);
    }

    #[test]
    fn test_negated_token_has_flipped_weight() {
        let weights = LexiconExplainer::new().explain("not good", 10).unwrap();
        assert_eq!(weights[0].token, "good");
        assert!(weights[0].weight < 0.0);
    }

    #[test]
    fn test_ordered_by_absolute_weight() {
        // "great" appears twice, "slow" once: |great| > |slow|.
        let weights = LexiconExplainer::new()
            .explain("great plot, great cast, slow start", 10)
            .unwrap();
        assert_eq!(weights[0].token, "great");
        assert_eq!(weights[1].token, "slow");
    }

    #[test]
    fn test_truncates_to_max_features() {
        let weights = LexiconExplainer::new()
            .explain("great awesome terrible boring lovely", 2)
            .unwrap();
        assert!(weights.len() <= 2);
    }

    #[test]
    fn test_no_lexicon_hits_gives_empty_explanation() {
        let weights = LexiconExplainer::new()
            .explain("the sky is blue", 10)
            .unwrap();
        assert!(weights.is_empty());
    }
}
