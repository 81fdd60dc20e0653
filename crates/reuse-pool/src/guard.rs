// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! RAII guard that returns a pooled entry on drop.
//!
//! [`Pooled`] gives its holder exclusive ownership of one entry. Dropping
//! the guard resets the entry and puts it back on the pool's idle list.
//! The borrow checker prevents use after release at compile time.

use crate::pool::PoolInner;
use crate::Reusable;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Exclusive handle to a pooled entry.
///
/// Derefs to the entry. When dropped, the entry is reset and returned to
/// the [`Pool`](crate::Pool) it came from.
///
/// # Example
/// ```ignore
/// let mut buf = pool.acquire();
/// buf.extend_from_slice(b"payload");  // use the entry
/// drop(buf);                          // reset and returned to the pool
/// // buf.len();                       // compile error: moved value
/// ```
pub struct Pooled<T: Reusable> {
    /// Taken out exactly once, in `drop()`.
    item: ManuallyDrop<T>,
    /// Handle back to the pool for the return trip.
    pool: Arc<PoolInner<T>>,
}

impl<T: Reusable> Pooled<T> {
    pub(crate) fn new(item: T, pool: Arc<PoolInner<T>>) -> Self {
        Self {
            item: ManuallyDrop::new(item),
            pool,
        }
    }
}

impl<T: Reusable> Deref for Pooled<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.item
    }
}

impl<T: Reusable> DerefMut for Pooled<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.item
    }
}

impl<T: Reusable> Drop for Pooled<T> {
    fn drop(&mut self) {
        // SAFETY: `item` is initialised for the whole life of the guard and
        // is taken only here; `self` is never touched again afterwards.
        let item = unsafe { ManuallyDrop::take(&mut self.item) };
        self.pool.release(item);
    }
}

impl<T: Reusable + std::fmt::Debug> std::fmt::Debug for Pooled<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pooled").field("item", &*self.item).finish()
    }
}
