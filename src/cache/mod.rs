//! In-memory cache of successful validations.
//!
//! Entries are keyed by the trimmed, lower-cased URL and stay fresh for the
//! configured duration. Stale entries are dropped lazily on lookup and by a
//! background sweep that is started and stopped with the owning validator.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::models::{CacheStats, ValidationResult};

struct CacheEntry {
    result: ValidationResult,
    stored_at: Instant,
}

type EntryMap = HashMap<String, CacheEntry>;

/// Cache key for a URL. Reads and writes must go through this.
pub fn cache_key(url: &str) -> String {
    url.trim().to_lowercase()
}

/// Time-boxed cache of accessible [`ValidationResult`]s.
///
/// The map lock is only held for synchronous map operations, never across an
/// `.await`.
pub struct ResultCache {
    entries: Arc<Mutex<EntryMap>>,
    duration: Duration,
    sweep_interval: Duration,
    sweeper: Mutex<Option<CancellationToken>>,
}

impl ResultCache {
    pub fn new(duration: Duration, sweep_interval: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            duration,
            sweep_interval,
            sweeper: Mutex::new(None),
        }
    }

    /// Freshness window of this cache.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    fn entries(&self) -> MutexGuard<'_, EntryMap> {
        lock(&self.entries)
    }

    /// Returns the cached result for `url` if it is still fresh.
    ///
    /// A stale entry is removed as part of the lookup.
    pub fn lookup(&self, url: &str) -> Option<ValidationResult> {
        let key = cache_key(url);
        let mut entries = self.entries();
        match entries.get(&key) {
            Some(entry) if entry.stored_at.elapsed() < self.duration => Some(entry.result.clone()),
            Some(_) => {
                log::debug!("Evicting stale cache entry for {key}");
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    /// Stores `result` under `url`.
    ///
    /// Only accessible results are cached; anything else is ignored and the
    /// method returns false.
    pub fn store(&self, url: &str, result: &ValidationResult) -> bool {
        if !result.is_accessible {
            return false;
        }
        let entry = CacheEntry {
            result: result.clone(),
            stored_at: Instant::now(),
        };
        self.entries().insert(cache_key(url), entry);
        true
    }

    /// Removes one entry, or every entry when `url` is `None`.
    ///
    /// Returns whether the targeted entry existed; a full wipe always
    /// returns true.
    pub fn clear(&self, url: Option<&str>) -> bool {
        let mut entries = self.entries();
        match url {
            Some(url) => entries.remove(&cache_key(url)).is_some(),
            None => {
                entries.clear();
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.entries();
        let active = entries
            .values()
            .filter(|entry| entry.stored_at.elapsed() < self.duration)
            .count();
        CacheStats {
            total_cached: entries.len(),
            active_cached: active,
            expired_cached: entries.len() - active,
        }
    }

    /// Removes every stale entry, returning how many were dropped.
    pub fn sweep(&self) -> usize {
        sweep_entries(&self.entries, self.duration)
    }

    /// Starts the background sweep.
    ///
    /// Must be called from within a Tokio runtime. Calling it again while a
    /// sweeper is running has no effect.
    pub fn start_sweeper(&self) {
        let mut sweeper = lock(&self.sweeper);
        if sweeper.is_some() {
            return;
        }

        let shutdown = CancellationToken::new();
        let entries = Arc::clone(&self.entries);
        let duration = self.duration;
        let period = self.sweep_interval;
        let token = shutdown.clone();

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let removed = sweep_entries(&entries, duration);
                        if removed > 0 {
                            log::debug!("Cache sweep removed {removed} stale entries");
                        }
                    }
                    _ = token.cancelled() => {
                        log::debug!("Cache sweeper shutting down");
                        break;
                    }
                }
            }
        });

        *sweeper = Some(shutdown);
    }

    /// Stops the background sweep if it is running.
    pub fn shutdown(&self) {
        if let Some(token) = lock(&self.sweeper).take() {
            token.cancel();
        }
    }

    pub fn is_sweeper_running(&self) -> bool {
        lock(&self.sweeper).is_some()
    }
}

impl Drop for ResultCache {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn sweep_entries(entries: &Mutex<EntryMap>, duration: Duration) -> usize {
    let mut entries = lock(entries);
    let before = entries.len();
    entries.retain(|_, entry| entry.stored_at.elapsed() < duration);
    before - entries.len()
}

/// Locks a mutex, recovering the data if a previous holder panicked.
///
/// Cache operations never leave the map half-updated, so a poisoned lock is
/// still safe to use.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
