// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Counting global allocator.
//!
//! [`CountingAllocator`] wraps another [`GlobalAlloc`] (normally
//! [`System`]) and updates a process-wide set of counters on every
//! allocation, reallocation and free. These counters are what
//! [`Snapshot`](crate::Snapshot) reads.
//!
//! Nothing in this module may allocate: the hooks run inside the global
//! allocator, so only atomics are touched.

use crate::collector;
use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide allocator counters.
pub(crate) struct Counters {
    /// Successful allocations, reallocations included.
    pub(crate) allocations: AtomicU64,
    /// Frees, reallocations included.
    pub(crate) frees: AtomicU64,
    /// Bytes ever handed out.
    pub(crate) cumulative_bytes: AtomicU64,
    /// Bytes currently live.
    pub(crate) live_bytes: AtomicU64,
    /// Objects currently live.
    pub(crate) live_objects: AtomicU64,
    /// High-water mark of `live_bytes` since the last collector cycle.
    pub(crate) peak_live_bytes: AtomicU64,
}

pub(crate) static COUNTERS: Counters = Counters {
    allocations: AtomicU64::new(0),
    frees: AtomicU64::new(0),
    cumulative_bytes: AtomicU64::new(0),
    live_bytes: AtomicU64::new(0),
    live_objects: AtomicU64::new(0),
    peak_live_bytes: AtomicU64::new(0),
};

fn record_alloc(size: usize) {
    let size = size as u64;
    COUNTERS.allocations.fetch_add(1, Ordering::Relaxed);
    COUNTERS.cumulative_bytes.fetch_add(size, Ordering::Relaxed);
    COUNTERS.live_objects.fetch_add(1, Ordering::Relaxed);
    let live = COUNTERS
        .live_bytes
        .fetch_add(size, Ordering::AcqRel)
        .wrapping_add(size);
    COUNTERS.peak_live_bytes.fetch_max(live, Ordering::AcqRel);
    collector::pace(live);
}

fn record_free(size: usize) {
    COUNTERS.frees.fetch_add(1, Ordering::Relaxed);
    COUNTERS.live_objects.fetch_sub(1, Ordering::Relaxed);
    COUNTERS.live_bytes.fetch_sub(size as u64, Ordering::AcqRel);
}

/// A reallocation counts as one free of the old block plus one allocation
/// of the new block. The live object count is unchanged.
fn record_realloc(old_size: usize, new_size: usize) {
    COUNTERS.frees.fetch_add(1, Ordering::Relaxed);
    COUNTERS.live_bytes.fetch_sub(old_size as u64, Ordering::AcqRel);

    let new_size = new_size as u64;
    COUNTERS.allocations.fetch_add(1, Ordering::Relaxed);
    COUNTERS.cumulative_bytes.fetch_add(new_size, Ordering::Relaxed);
    let live = COUNTERS
        .live_bytes
        .fetch_add(new_size, Ordering::AcqRel)
        .wrapping_add(new_size);
    COUNTERS.peak_live_bytes.fetch_max(live, Ordering::AcqRel);
    collector::pace(live);
}

/// A [`GlobalAlloc`] wrapper that counts every allocation and free.
///
/// # Example
/// ```ignore
/// use heap_monitor::CountingAllocator;
///
/// #[global_allocator]
/// static ALLOCATOR: CountingAllocator = CountingAllocator::system();
/// ```
///
/// The `global` feature (on by default) already installs one for the whole
/// process, so most users never name this type.
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingAllocator<A = System> {
    inner: A,
}

impl CountingAllocator<System> {
    /// Wraps the system allocator.
    pub const fn system() -> Self {
        Self { inner: System }
    }
}

impl<A> CountingAllocator<A> {
    /// Wraps an arbitrary allocator.
    pub const fn new(inner: A) -> Self {
        Self { inner }
    }
}

// SAFETY: every call is forwarded unchanged to the wrapped allocator, which
// upholds the `GlobalAlloc` contract. The bookkeeping only touches atomics
// and never allocates, so it cannot re-enter the allocator.
unsafe impl<A: GlobalAlloc> GlobalAlloc for CountingAllocator<A> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: caller guarantees `layout` has non-zero size.
        let ptr = unsafe { self.inner.alloc(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        // SAFETY: caller guarantees `layout` has non-zero size.
        let ptr = unsafe { self.inner.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: `ptr` was returned by this allocator with the same layout.
        unsafe { self.inner.dealloc(ptr, layout) };
        record_free(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // SAFETY: forwarded contract from the caller.
        let new_ptr = unsafe { self.inner.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            record_realloc(layout.size(), new_size);
        }
        new_ptr
    }
}

/// Returns `true` if the counting allocator is installed as the global
/// allocator of this process. Without it every counter reads zero.
pub fn is_installed() -> bool {
    cfg!(feature = "global")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_allocations_through_wrapper() {
        let alloc = CountingAllocator::system();
        let layout = Layout::from_size_align(64, 8).unwrap();

        let before = COUNTERS.allocations.load(Ordering::SeqCst);
        let cumulative_before = COUNTERS.cumulative_bytes.load(Ordering::SeqCst);
        unsafe {
            let ptr = alloc.alloc(layout);
            assert!(!ptr.is_null());
            alloc.dealloc(ptr, layout);
        }
        // Other test threads may allocate concurrently, so only lower bounds hold.
        assert!(COUNTERS.allocations.load(Ordering::SeqCst) >= before + 1);
        assert!(COUNTERS.cumulative_bytes.load(Ordering::SeqCst) >= cumulative_before + 64);
    }

    #[test]
    fn test_realloc_preserves_contents() {
        let alloc = CountingAllocator::system();
        let layout = Layout::from_size_align(16, 8).unwrap();
        unsafe {
            let ptr = alloc.alloc_zeroed(layout);
            assert!(!ptr.is_null());
            *ptr = 7;
            let grown = alloc.realloc(ptr, layout, 4096);
            assert!(!grown.is_null());
            assert_eq!(*grown, 7);
            alloc.dealloc(grown, Layout::from_size_align(4096, 8).unwrap());
        }
    }

    #[test]
    fn test_is_installed_matches_feature() {
        assert_eq!(is_installed(), cfg!(feature = "global"));
    }
}
