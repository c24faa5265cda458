use std::collections::HashMap;

use lazy_static::lazy_static;
use log::debug;

use super::lexicon::tokenize;
use super::{BackendError, EmotionBackend, EmotionPrediction};

lazy_static! {
    static ref EMOTION_KEYWORDS: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        for word in [
            "love", "loved", "happy", "joy", "delighted", "fantastic", "wonderful",
            "excited", "thrilled", "glad", "fun", "laugh", "smile", "celebrate",
        ] {
            map.insert(word, "joy");
        }
        for word in [
            "sad", "unhappy", "disappointed", "disappointing", "cry", "miserable",
            "heartbroken", "lonely", "grief", "regret", "sorry",
        ] {
            map.insert(word, "sadness");
        }
        for word in [
            "angry", "furious", "hate", "hated", "outraged", "annoyed", "annoying",
            "irritated", "mad", "rage", "disgusted",
        ] {
            map.insert(word, "anger");
        }
        for word in [
            "afraid", "scared", "terrified", "worried", "anxious", "nervous",
            "fear", "panic", "dread",
        ] {
            map.insert(word, "fear");
        }
        for word in [
            "surprised", "shocked", "amazed", "astonished", "unexpected", "stunned",
            "unbelievable", "wow",
        ] {
            map.insert(word, "surprise");
        }
        map
    };
}

/// A keyword-table emotion backend.
///
/// Tallies emotion cue words per category and reports the dominant category;
/// ties break towards the lexicographically smallest label so repeated calls
/// stay deterministic. Text with no emotion cues at all yields
/// [`BackendError::Unavailable`], which the facade treats as "omit the
/// emotion fields", never as a request failure.
#[derive(Debug, Default, Clone)]
pub struct KeywordEmotionBackend;

impl KeywordEmotionBackend {
    pub fn new() -> Self {
        Self
    }
}

impl EmotionBackend for KeywordEmotionBackend {
    fn name(&self) -> &str {
        "keyword-emotion"
    }

    fn predict_emotion(&self, text: &str) -> Result<EmotionPrediction, BackendError> {
        if text.trim().is_empty() {
            return Err(BackendError::InvalidInput(
                "input text cannot be empty".into(),
            ));
        }

        let tokens = tokenize(text);
        let mut tallies: HashMap<&str, usize> = HashMap::new();
        for token in &tokens {
            if let Some(emotion) = EMOTION_KEYWORDS.get(token.as_str()) {
                *tallies.entry(emotion).or_insert(0) += 1;
            }
        }

        let total: usize = tallies.values().sum();
        if total == 0 {
            debug!("no emotion cues found in input");
            return Err(BackendError::Unavailable(
                "no emotion cues in input".into(),
            ));
        }

        // Highest tally wins; ties resolve to the smallest label.
        let (label, count) = tallies
            .into_iter()
            .min_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
            .unwrap_or(("neutral", 0));

        Ok(EmotionPrediction {
            label: label.to_string(),
            confidence: count as f64 / total as f64,
        })
    }
}
