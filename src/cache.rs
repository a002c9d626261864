// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Per-year memoization of lunar windows.
//!
//! A window is a pure function of its year, so concurrent misses on the same
//! year only duplicate work: whichever insert lands first is kept and both
//! callers see equal values.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::lunar::WindowSource;
use crate::lunar_month::LunarWindow;

/// Thread-safe cache of [`LunarWindow`]s keyed by lunar year.
///
/// Failed computations are not cached.
#[derive(Debug, Default)]
pub struct TermCache {
    windows: RwLock<HashMap<i32, Arc<LunarWindow>>>,
}

impl TermCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Window of `year`, computed on first use.
    pub fn window(&self, year: i32) -> Result<Arc<LunarWindow>> {
        if let Some(window) = self.windows.read().get(&year) {
            return Ok(Arc::clone(window));
        }
        let built = Arc::new(LunarWindow::build(year)?);
        let mut windows = self.windows.write();
        let entry = windows.entry(year).or_insert_with(|| {
            debug!(year, "cached lunar window");
            built
        });
        Ok(Arc::clone(entry))
    }

    /// Whether `year` is already cached.
    pub fn contains(&self, year: i32) -> bool {
        self.windows.read().contains_key(&year)
    }

    /// Number of cached years.
    pub fn len(&self) -> usize {
        self.windows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.read().is_empty()
    }

    /// Drop every cached window.
    pub fn clear(&self) {
        self.windows.write().clear();
    }
}

impl WindowSource for TermCache {
    fn window(&self, year: i32) -> Result<Arc<LunarWindow>> {
        TermCache::window(self, year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_once_per_year() {
        let cache = TermCache::new();
        assert!(cache.is_empty());
        let first = cache.window(2023).unwrap();
        let second = cache.window(2023).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.contains(2023));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cached_window_equals_fresh_one() {
        let cache = TermCache::new();
        let cached = cache.window(1984).unwrap();
        assert_eq!(*cached, LunarWindow::build(1984).unwrap());
    }

    #[test]
    fn errors_are_not_cached() {
        let cache = TermCache::new();
        assert!(cache.window(5000).is_err());
        assert!(!cache.contains(5000));
        cache.window(2000).unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn shared_between_threads() {
        let cache = Arc::new(TermCache::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.window(2020 + i % 2).unwrap().leap_month())
            })
            .collect();
        let leaps: Vec<u32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(leaps, vec![4, 0, 4, 0]);
        assert_eq!(cache.len(), 2);
    }
}
