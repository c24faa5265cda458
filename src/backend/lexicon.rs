use std::collections::HashSet;

use lazy_static::lazy_static;
use log::debug;

use super::{BackendError, Prediction, SentimentBackend};

lazy_static! {
    static ref POSITIVE_WORDS: HashSet<&'static str> = [
        "good", "great", "excellent", "amazing", "awesome", "fantastic", "wonderful",
        "love", "loved", "loves", "best", "happy", "delighted", "pleased", "enjoy",
        "enjoyed", "enjoyable", "brilliant", "superb", "outstanding", "perfect",
        "impressive", "beautiful", "nice", "helpful", "recommend", "recommended",
        "satisfied", "solid", "smooth", "reliable", "friendly", "positive", "success",
        "successful", "favorite", "glad", "pleasant", "thrilled", "exceptional",
    ]
    .iter()
    .copied()
    .collect();
    static ref NEGATIVE_WORDS: HashSet<&'static str> = [
        "bad", "terrible", "awful", "horrible", "worst", "hate", "hated", "hates",
        "poor", "disappointing", "disappointed", "disappointment", "broken",
        "useless", "slow", "buggy", "annoying", "angry", "sad", "unhappy",
        "frustrating", "frustrated", "fail", "failed", "failure", "failing", "wrong",
        "waste", "garbage", "ugly", "boring", "mediocre", "negative", "lousy",
        "defective", "unreliable", "crash", "crashed", "crashes", "rude", "scam",
        "regret", "dreadful",
    ]
    .iter()
    .copied()
    .collect();
    static ref NEGATORS: HashSet<&'static str> = [
        "not", "no", "never", "none", "neither", "nor", "cannot", "cant", "dont",
        "doesnt", "didnt", "isnt", "wasnt", "wont", "wouldnt", "couldnt", "shouldnt",
    ]
    .iter()
    .copied()
    .collect();
}

/// How many tokens after a negator still have their polarity flipped.
const NEGATION_WINDOW: usize = 3;

/// Lowercases and splits on whitespace, trimming punctuation from token
/// edges. Apostrophes are kept so contractions like "don't" survive intact.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|raw| {
            raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

fn is_negator(token: &str) -> bool {
    NEGATORS.contains(token) || token.ends_with("n't")
}

/// Scans tokens for lexicon hits, returning `(token index, signed polarity)`
/// with +1.0 for positive and -1.0 for negative words. A negator flips the
/// polarity of the next lexicon hit within [`NEGATION_WINDOW`] tokens.
///
/// Shared between the backend and [`LexiconExplainer`](super::LexiconExplainer)
/// so predictions and explanations always agree.
pub(crate) fn signed_polarities(tokens: &[String]) -> Vec<(usize, f64)> {
    let mut hits = Vec::new();
    let mut negation_until: Option<usize> = None;
    for (index, token) in tokens.iter().enumerate() {
        if is_negator(token) {
            negation_until = Some(index + NEGATION_WINDOW);
            continue;
        }
        let base = if POSITIVE_WORDS.contains(token.as_str()) {
            1.0
        } else if NEGATIVE_WORDS.contains(token.as_str()) {
            -1.0
        } else {
            continue;
        };
        let weight = match negation_until {
            Some(limit) if index <= limit => {
                negation_until = None;
                -base
            }
            _ => base,
        };
        hits.push((index, weight));
    }
    hits
}

/// A deterministic sentiment backend scoring text against built-in polarity
/// word lists.
///
/// The label is decided by majority polarity among lexicon hits; texts with
/// no hits (or an exact tie) are `neutral`. Confidence is the dominant
/// polarity's share of all hits, or for neutral texts the share of tokens
/// that carried no polarity at all.
///
/// # Example
/// ```rust
/// use polarity::{LexiconBackend, SentimentBackend};
///
/// let backend = LexiconBackend::new();
/// let prediction = backend.predict("I love this product")?;
/// assert_eq!(prediction.label, "positive");
/// # Ok::<(), polarity::BackendError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct LexiconBackend;

impl LexiconBackend {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentBackend for LexiconBackend {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn predict(&self, text: &str) -> Result<Prediction, BackendError> {
        if text.trim().is_empty() {
            return Err(BackendError::InvalidInput(
                "input text cannot be empty".into(),
            ));
        }

        let tokens = tokenize(text);
        let hits = signed_polarities(&tokens);
        let positive = hits.iter().filter(|(_, w)| *w > 0.0).count();
        let negative = hits.iter().filter(|(_, w)| *w < 0.0).count();
        debug!(
            "lexicon scored {} tokens: {} positive hits, {} negative hits",
            tokens.len(),
            positive,
            negative
        );

        let (label, confidence) = if positive > negative {
            ("positive", positive as f64 / (positive + negative) as f64)
        } else if negative > positive {
            ("negative", negative as f64 / (positive + negative) as f64)
        } else if tokens.is_empty() {
            ("neutral", 1.0)
        } else {
            let unpolarized = tokens.len() - positive - negative;
            ("neutral", unpolarized as f64 / tokens.len() as f64)
        };

        Ok(Prediction {
            label: label.to_string(),
            confidence,
        })
    }
}
