//! Sharded concurrent accumulator.
//!
//! A key -> value map split into a fixed number of shards, each behind its own
//! mutex. A key always lives in the shard selected by its hash, so `add` and
//! `erase` on unrelated keys only contend when the keys share a shard.
//!
//! [`ConcurrentAccumulator::snapshot`] merges the shards into one ordered map.
//! It must be called after every producer of the current phase has finished;
//! interleaving it with concurrent `add`/`erase` yields an arbitrary mix of
//! before and after states.
//!
//! # Examples
//!
//! ```
//! use rayon::prelude::*;
//! use search_server::search::accumulator::ConcurrentAccumulator;
//!
//! let accumulator = ConcurrentAccumulator::new(8);
//! (0..100).into_par_iter().for_each(|i| accumulator.add(i % 10, 1.0));
//!
//! let totals = accumulator.snapshot();
//! assert_eq!(totals.len(), 10);
//! assert_eq!(totals[&3], 10.0);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::ops::AddAssign;

use ahash::RandomState;
use parking_lot::Mutex;

/// A key -> accumulator map safe for concurrent increment and removal.
pub struct ConcurrentAccumulator<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
    hasher: RandomState,
}

impl<K, V> ConcurrentAccumulator<K, V>
where
    K: Ord + Hash + Clone,
    V: AddAssign + Copy,
{
    /// Create an accumulator with `shard_count` shards (at least one).
    pub fn new(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1))
            .map(|_| Mutex::new(BTreeMap::new()))
            .collect();

        ConcurrentAccumulator {
            shards,
            hasher: RandomState::new(),
        }
    }

    /// Get the number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard(&self, key: &K) -> &Mutex<BTreeMap<K, V>> {
        let index = (self.hasher.hash_one(key) % self.shards.len() as u64) as usize;
        &self.shards[index]
    }

    /// Add `delta` to the value of `key`, inserting `delta` if absent.
    pub fn add(&self, key: K, delta: V) {
        self.shard(&key)
            .lock()
            .entry(key)
            .and_modify(|value| *value += delta)
            .or_insert(delta);
    }

    /// Remove `key` if present.
    pub fn erase(&self, key: &K) {
        self.shard(key).lock().remove(key);
    }

    /// Merge all shards into one ordered map.
    pub fn snapshot(&self) -> BTreeMap<K, V> {
        let mut merged = BTreeMap::new();
        for shard in &self.shards {
            let shard = shard.lock();
            merged.extend(shard.iter().map(|(key, value)| (key.clone(), *value)));
        }
        merged
    }

    /// Consume the accumulator and merge its shards without cloning.
    pub fn into_snapshot(self) -> BTreeMap<K, V> {
        let mut merged = BTreeMap::new();
        for shard in self.shards {
            merged.append(&mut shard.into_inner());
        }
        merged
    }
}

impl<K, V> fmt::Debug for ConcurrentAccumulator<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentAccumulator")
            .field("shards", &self.shards.len())
            .finish()
    }
}
