use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use serde_json::Value;

/// Default number of assembled presets kept by [`FifoCache`].
pub const DEFAULT_CACHE_CAPACITY: usize = 50;

/// Storage for assembled presets, keyed by `PresetInputs::cache_key`
/// (base fingerprint plus serialized inputs).
///
/// Passed into `build_preset` so callers own its lifetime; tests get a
/// fresh cache each and never see each other's entries.
pub trait PresetCache {
    fn get(&self, key: &str) -> Option<Arc<Value>>;
    fn insert(&mut self, key: String, preset: Arc<Value>);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bounded cache that evicts the oldest insertion when full.
///
/// Eviction follows insertion order, not access order: a frequently read
/// entry still leaves once it is the oldest.
#[derive(Debug, Clone)]
pub struct FifoCache {
    capacity: usize,
    order: VecDeque<String>,
    entries: HashMap<String, Arc<Value>>,
}

impl FifoCache {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity),
            entries: HashMap::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.entries.clear();
    }
}

impl Default for FifoCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl PresetCache for FifoCache {
    fn get(&self, key: &str) -> Option<Arc<Value>> {
        self.entries.get(key).cloned()
    }

    fn insert(&mut self, key: String, preset: Arc<Value>) {
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = preset;
            return;
        }
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            tracing::debug!(key = %oldest, "evicted cached preset");
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, preset);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A cache that stores nothing; every build recomputes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl PresetCache for NoCache {
    fn get(&self, _key: &str) -> Option<Arc<Value>> {
        None
    }

    fn insert(&mut self, _key: String, _preset: Arc<Value>) {}

    fn len(&self) -> usize {
        0
    }
}
