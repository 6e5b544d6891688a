use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::game::{Game, State, Transition};

/// Hit and miss counts of a memoized game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

/// Thread-safe result cache for one game method
#[derive(Debug)]
struct Cache<K, V> {
    entries: Mutex<HashMap<K, V>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl<K: Eq + Hash, V: Clone> Cache<K, V> {
    fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    fn get_or_compute<F>(&self, key: K, compute: F) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
    {
        if let Ok(entries) = self.entries.lock() {
            if let Some(value) = entries.get(&key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(value.clone());
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        // Compute outside the lock; errors are not cached
        let value = compute()?;
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, value.clone());
        }
        Ok(value)
    }

    fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

/// Caches the `valid` and `step` results of a deterministic game
#[derive(Debug)]
pub struct Memoized<G> {
    inner: G,
    valid_cache: Cache<State, Vec<bool>>,
    step_cache: Cache<(State, usize), Transition>,
}

impl<G: Game> Memoized<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            valid_cache: Cache::new(),
            step_cache: Cache::new(),
        }
    }

    /// Combined statistics of both caches
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.valid_cache.hits.load(Ordering::Relaxed)
                + self.step_cache.hits.load(Ordering::Relaxed),
            misses: self.valid_cache.misses.load(Ordering::Relaxed)
                + self.step_cache.misses.load(Ordering::Relaxed),
            entries: self.valid_cache.len() + self.step_cache.len(),
        }
    }

    pub fn clear(&self) {
        self.valid_cache.clear();
        self.step_cache.clear();
    }
}

impl<G: Game> Game for Memoized<G> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn description(&self) -> &'static str {
        self.inner.description()
    }

    fn action_count(&self) -> usize {
        self.inner.action_count()
    }

    fn start(&self, rng: &mut dyn RngCore) -> State {
        self.inner.start(rng)
    }

    fn valid(&self, state: &State) -> Result<Vec<bool>> {
        self.valid_cache
            .get_or_compute(state.clone(), || self.inner.valid(state))
    }

    fn step(&self, state: &State, action: usize) -> Result<Transition> {
        self.step_cache
            .get_or_compute((state.clone(), action), || self.inner.step(state, action))
    }

    fn human(&self, state: &State) -> String {
        self.inner.human(state)
    }
}
