use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use log::debug;

use crate::backend::Prediction;

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<String, Prediction>,
    order: VecDeque<String>,
}

/// A bounded memoization cache for backend predictions, keyed by exact input
/// text.
///
/// Eviction is first-in-first-out once the capacity is reached; the policy
/// only matters for performance, correctness needs boundedness plus the
/// guarantee that a cached text returns its previously computed result.
///
/// The cache is safe for concurrent use from multiple evaluation requests. A
/// poisoned lock is recovered with `into_inner` since every mutation leaves
/// the map and eviction queue consistent.
#[derive(Debug)]
pub struct PredictionCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

impl PredictionCache {
    /// Creates a cache holding at most `capacity` entries. A capacity of
    /// zero is treated as one so the cache never panics on insert.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(CacheInner::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the memoized prediction for `text`, if present.
    pub fn get(&self, text: &str) -> Option<Prediction> {
        self.lock().entries.get(text).cloned()
    }

    /// Stores a prediction, evicting the oldest entry when full. Inserting
    /// an already-cached text replaces its value without growing the cache.
    pub fn insert(&self, text: &str, prediction: Prediction) {
        let mut inner = self.lock();
        if inner.entries.contains_key(text) {
            inner.entries.insert(text.to_string(), prediction);
            return;
        }
        if inner.entries.len() >= self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                debug!("prediction cache full, evicting oldest entry");
                inner.entries.remove(&oldest);
            }
        }
        inner.entries.insert(text.to_string(), prediction);
        inner.order.push_back(text.to_string());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
