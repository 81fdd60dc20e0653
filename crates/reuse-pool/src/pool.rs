// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Lazily-filled object pool.
//!
//! The [`Pool`] is a store of reusable entries. It:
//!
//! 1. Constructs entries on demand with its factory, only when the idle
//!    list is empty. Acquiring never fails.
//! 2. Hands out exclusive ownership through a [`Pooled`] guard.
//! 3. Resets every entry as it comes back, so idle entries are always
//!    clean (content cleared, capacity kept).
//! 4. Tracks reuse statistics.
//!
//! # Thread Safety
//! `Pool<T>` is `Send + Sync` for `T: Send`. The idle list and statistics
//! sit behind mutexes, so any number of threads may acquire and release
//! concurrently. Cloning a `Pool` yields another handle to the same store.

use crate::{PoolStats, Pooled, Reusable};
use std::sync::{Arc, Mutex};

type Factory<T> = Box<dyn Fn() -> T + Send + Sync>;

/// Internal pool state, shared between pool handles and guards via `Arc`.
pub struct PoolInner<T> {
    /// Builds a fresh entry when the idle list is empty.
    factory: Factory<T>,
    /// Reset entries waiting to be reused.
    idle: Mutex<Vec<T>>,
    /// Statistics (behind a Mutex since updates are short).
    stats: Mutex<PoolStats>,
}

impl<T: Reusable> PoolInner<T> {
    /// Called by `Pooled::drop` to reset an entry and park it.
    pub(crate) fn release(&self, mut item: T) {
        item.reset();

        if let Ok(mut stats) = self.stats.lock() {
            stats.record_release();
        }

        // A poisoned idle list drops the entry instead of returning it.
        if let Ok(mut idle) = self.idle.lock() {
            idle.push(item);
        }
    }
}

/// A thread-safe pool of reusable entries.
///
/// # Example
/// ```
/// use reuse_pool::Pool;
///
/// let pool = Pool::new(|| Vec::<u8>::with_capacity(1024));
///
/// let mut buf = pool.acquire();
/// buf.extend_from_slice(b"hello");
/// drop(buf);
///
/// // The same allocation comes back, cleared but with its capacity.
/// let buf = pool.acquire();
/// assert!(buf.is_empty());
/// assert!(buf.capacity() >= 1024);
/// assert_eq!(pool.stats().reuses, 1);
/// ```
pub struct Pool<T> {
    inner: Arc<PoolInner<T>>,
}

impl<T: Reusable> Pool<T> {
    /// Creates an empty pool. Entries are built by `factory` on demand.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(PoolInner {
                factory: Box::new(factory),
                idle: Mutex::new(Vec::new()),
                stats: Mutex::new(PoolStats::default()),
            }),
        }
    }

    /// Checks out an entry, constructing one if none is idle.
    ///
    /// The returned [`Pooled`] guard gives it back when dropped.
    pub fn acquire(&self) -> Pooled<T> {
        let recycled = self.inner.idle.lock().ok().and_then(|mut idle| idle.pop());

        let is_reuse = recycled.is_some();
        let item = recycled.unwrap_or_else(|| (self.inner.factory)());

        if let Ok(mut stats) = self.inner.stats.lock() {
            if is_reuse {
                stats.record_reuse();
            } else {
                stats.record_creation();
            }
        }

        Pooled::new(item, Arc::clone(&self.inner))
    }

    /// Builds entries until at least `count` are idle.
    pub fn prefill(&self, count: usize) {
        if let Ok(mut idle) = self.inner.idle.lock() {
            let missing = count.saturating_sub(idle.len());
            idle.reserve(missing);
            while idle.len() < count {
                idle.push((self.inner.factory)());
            }
        }
    }

    /// Number of entries currently idle.
    pub fn idle(&self) -> usize {
        self.inner.idle.lock().map(|idle| idle.len()).unwrap_or(0)
    }

    /// Returns a snapshot of the pool statistics.
    pub fn stats(&self) -> PoolStats {
        self.inner
            .stats
            .lock()
            .map(|s| *s)
            .unwrap_or_default()
    }

    /// Drops every idle entry. Checked-out entries are unaffected and still
    /// return here when released.
    pub fn clear(&self) {
        if let Ok(mut idle) = self.inner.idle.lock() {
            idle.clear();
        }
    }
}

impl<T> Clone for Pool<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Reusable> std::fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("idle", &self.idle())
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    struct Scratch {
        id: usize,
        tags: HashMap<&'static str, usize>,
    }

    impl Reusable for Scratch {
        fn reset(&mut self) {
            self.id = 0;
            self.tags.clear();
        }
    }

    #[test]
    fn test_lazy_creation() {
        let pool = Pool::new(Scratch::default);
        assert_eq!(pool.idle(), 0);
        assert_eq!(pool.stats().creations, 0);

        let s = pool.acquire();
        assert_eq!(pool.stats().creations, 1);
        drop(s);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn test_reuse_after_release() {
        let pool = Pool::new(Scratch::default);

        let s = pool.acquire();
        drop(s);
        let _s2 = pool.acquire();

        let stats = pool.stats();
        assert_eq!(stats.creations, 1);
        assert_eq!(stats.reuses, 1);
        assert_eq!(stats.releases, 1);
    }

    #[test]
    fn test_release_resets_entry() {
        let pool = Pool::new(Scratch::default);

        let mut s = pool.acquire();
        s.id = 42;
        s.tags.insert("processed", 42);
        drop(s);

        let s = pool.acquire();
        assert_eq!(s.id, 0);
        assert!(s.tags.is_empty());
    }

    #[test]
    fn test_exclusive_ownership() {
        let pool = Pool::new(Scratch::default);

        let mut a = pool.acquire();
        let mut b = pool.acquire();
        a.id = 1;
        b.id = 2;
        assert_eq!(a.id, 1);
        assert_eq!(pool.stats().creations, 2);
        assert_eq!(pool.stats().outstanding(), 2);
    }

    #[test]
    fn test_prefill() {
        let pool = Pool::new(Scratch::default);
        pool.prefill(4);
        assert_eq!(pool.idle(), 4);

        let _a = pool.acquire();
        assert_eq!(pool.stats().reuses, 1);
        assert_eq!(pool.stats().creations, 0);

        pool.prefill(2); // Already three idle.
        assert_eq!(pool.idle(), 3);

        pool.prefill(6); // Tops up the missing three.
        assert_eq!(pool.idle(), 6);
        assert_eq!(pool.stats().creations, 0);
    }

    #[test]
    fn test_clear() {
        let pool = Pool::new(Scratch::default);
        let held = pool.acquire();
        drop(pool.acquire());
        assert_eq!(pool.idle(), 1);

        pool.clear();
        assert_eq!(pool.idle(), 0);

        drop(held);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn test_clone_shares_store() {
        let pool = Pool::new(Scratch::default);
        let other = pool.clone();
        drop(pool.acquire());
        assert_eq!(other.idle(), 1);
    }

    #[test]
    fn test_concurrent_acquire_release() {
        let pool = Pool::new(Scratch::default);

        std::thread::scope(|scope| {
            for t in 0..8 {
                let pool = pool.clone();
                scope.spawn(move || {
                    for i in 0..500 {
                        let mut s = pool.acquire();
                        assert_eq!(s.id, 0);
                        assert!(s.tags.is_empty());
                        s.id = t * 1000 + i;
                        s.tags.insert("thread", t);
                    }
                });
            }
        });

        let stats = pool.stats();
        assert_eq!(stats.acquisitions, 8 * 500);
        assert_eq!(stats.releases, 8 * 500);
        assert!(stats.creations <= 8);
        assert_eq!(pool.idle() as u64, stats.creations);
    }

    #[test]
    fn test_debug_format() {
        let pool = Pool::new(Scratch::default);
        let debug = format!("{pool:?}");
        assert!(debug.contains("Pool"));
        assert!(debug.contains("idle"));
    }
}
