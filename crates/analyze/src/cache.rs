// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Best holds cache shared by the workers.
use ahash::AHashMap;
use parking_lot::Mutex;
use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::HoldPattern;

/// Maps equivalence keys to the best hold pattern of their class.
///
/// Patterns are stored over the key positions. A lookup and the following
/// store are separate critical sections, so workers racing on the same key
/// may both compute it: the computation is deterministic and the stores are
/// equal.
#[derive(Debug)]
pub struct EquivalenceCache {
    /// The cached patterns, `None` when caching is disabled.
    entries: Option<Mutex<AHashMap<String, HoldPattern>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for EquivalenceCache {
    fn default() -> Self {
        Self::new()
    }
}

impl EquivalenceCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::with_entries(BTreeMap::new())
    }

    /// Creates a cache seeded with the entries saved by a previous run.
    pub fn with_entries(entries: BTreeMap<String, HoldPattern>) -> Self {
        Self {
            entries: Some(Mutex::new(entries.into_iter().collect())),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Creates a cache that never stores and always computes.
    pub fn disabled() -> Self {
        Self {
            entries: None,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Checks if this cache stores patterns.
    pub fn is_enabled(&self) -> bool {
        self.entries.is_some()
    }

    /// Returns the pattern for `key`, calling `compute` and storing its result
    /// on a miss.
    pub fn get_or_compute<F>(&self, key: &str, compute: F) -> HoldPattern
    where
        F: FnOnce() -> HoldPattern,
    {
        let Some(entries) = &self.entries else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return compute();
        };

        let cached = entries.lock().get(key).copied();
        if let Some(pattern) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return pattern;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let pattern = compute();
        entries.lock().insert(key.to_string(), pattern);
        pattern
    }

    /// The number of lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// The number of lookups that computed the pattern.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// The number of cached keys.
    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, |e| e.lock().len())
    }

    /// Checks if the cache has no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A sorted copy of the cache entries.
    pub fn snapshot(&self) -> BTreeMap<String, HoldPattern> {
        self.entries.as_ref().map_or_else(BTreeMap::new, |e| {
            e.lock().iter().map(|(k, v)| (k.clone(), *v)).collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Barrier, thread};

    #[test]
    fn hit_and_miss() {
        let cache = EquivalenceCache::new();
        assert!(cache.is_enabled());

        let p = cache.get_or_compute("2X-2Y-2Z", || HoldPattern::HOLD_ALL);
        assert_eq!(p, HoldPattern::HOLD_ALL);
        assert_eq!((cache.hits(), cache.misses()), (0, 1));

        let p = cache.get_or_compute("2X-2Y-2Z", || panic!("cached key computed"));
        assert_eq!(p, HoldPattern::HOLD_ALL);
        assert_eq!((cache.hits(), cache.misses()), (1, 1));

        cache.get_or_compute("2X-5Y-9Z", || HoldPattern::DISCARD_ALL);
        assert_eq!(cache.len(), 2);
        assert_eq!(
            cache.snapshot().into_iter().collect::<Vec<_>>(),
            vec![
                ("2X-2Y-2Z".to_string(), HoldPattern::HOLD_ALL),
                ("2X-5Y-9Z".to_string(), HoldPattern::DISCARD_ALL),
            ]
        );
    }

    #[test]
    fn disabled() {
        let cache = EquivalenceCache::disabled();
        assert!(!cache.is_enabled());

        let mut computed = 0;
        for _ in 0..3 {
            cache.get_or_compute("2X-2Y-2Z", || {
                computed += 1;
                HoldPattern::HOLD_ALL
            });
        }

        assert_eq!(computed, 3);
        assert_eq!((cache.hits(), cache.misses()), (0, 3));
        assert!(cache.is_empty());
        assert!(cache.snapshot().is_empty());
    }

    #[test]
    fn seeded() {
        let entries = BTreeMap::from([("AX-KX-QX".to_string(), HoldPattern::HOLD_ALL)]);
        let cache = EquivalenceCache::with_entries(entries.clone());

        let p = cache.get_or_compute("AX-KX-QX", || HoldPattern::DISCARD_ALL);
        assert_eq!(p, HoldPattern::HOLD_ALL);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.snapshot(), entries);
    }

    #[test]
    fn concurrent_access() {
        const NUM_TASKS: usize = 8;
        let cache = EquivalenceCache::new();
        let barrier = Barrier::new(NUM_TASKS);

        let results = thread::scope(|s| {
            let handles = (0..NUM_TASKS)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        (0..100)
                            .map(|_| cache.get_or_compute("5X-6X-JY", || HoldPattern::HOLD_ALL))
                            .collect::<Vec<_>>()
                    })
                })
                .collect::<Vec<_>>();

            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect::<Vec<_>>()
        });

        assert!(results.iter().all(|p| *p == HoldPattern::HOLD_ALL));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits() + cache.misses(), (NUM_TASKS * 100) as u64);
        assert!(cache.misses() >= 1);
    }
}
