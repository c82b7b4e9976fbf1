//! Prediction context pool.
//!
//! A lookup pins the history snapshot and table index it used so that the
//! branch can later be trained against exactly that state, or rolled back.
//! Contexts live in per-thread slot pools and are referred to by generational
//! handles, so no allocation happens per prediction once a pool is warm.
//!
//! A [`ContextHandle`] is neither `Copy` nor `Clone`: the host moves it into
//! exactly one terminal call (`update` or `squash`), which releases the slot.
//! A handle dropped without a terminal call keeps its slot occupied.
//!
//! Every pool carries a process-unique id that is stamped into its handles,
//! so a handle presented to a different predictor is rejected even when the
//! same slot is live there.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::common::ThreadId;

/// Source of pool ids.
static NEXT_POOL_ID: AtomicU32 = AtomicU32::new(0);

/// State captured by a lookup for one in-flight branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PredictionHistory {
    /// Global history register as observed at lookup time.
    pub ghr: u32,
    /// Weight table index used by the lookup.
    pub index: usize,
}

/// Opaque token identifying one pooled prediction context.
#[derive(Debug, PartialEq, Eq)]
pub struct ContextHandle {
    pool: u32,
    thread: ThreadId,
    slot: u32,
    generation: u32,
}

impl ContextHandle {
    /// Returns the hardware thread whose pool owns this context.
    #[inline]
    pub const fn thread(&self) -> ThreadId {
        self.thread
    }
}

/// A single pool slot.
#[derive(Clone, Debug, Default)]
struct Slot {
    /// Bumped on every release; handles carrying an older value are stale.
    generation: u32,
    /// Live context, `None` when the slot is free.
    entry: Option<PredictionHistory>,
}

/// Slot pool for one hardware thread.
#[derive(Clone, Debug)]
struct ThreadPool {
    slots: Vec<Slot>,
    /// Indices of free slots, reused LIFO.
    free: Vec<u32>,
    /// Count of occupied slots.
    live: usize,
}

impl ThreadPool {
    fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::default(); capacity],
            free: (0..capacity as u32).rev().collect(),
            live: 0,
        }
    }
}

/// Per-thread pools of in-flight prediction contexts.
#[derive(Debug)]
pub struct ContextPool {
    /// Stamped into every handle this pool issues.
    id: u32,
    threads: Vec<ThreadPool>,
    /// Slots reserved per thread at construction.
    reserved: usize,
}

impl ContextPool {
    /// Creates pools for `num_threads` threads, each with `capacity` slots.
    pub fn new(num_threads: usize, capacity: usize) -> Self {
        Self {
            id: NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed),
            threads: (0..num_threads).map(|_| ThreadPool::new(capacity)).collect(),
            reserved: capacity,
        }
    }

    /// Stores `history` in a free slot of `tid`'s pool.
    ///
    /// The pool grows when every reserved slot is in flight.
    pub fn acquire(&mut self, tid: ThreadId, history: PredictionHistory) -> ContextHandle {
        let pool = &mut self.threads[tid];
        let slot = if let Some(slot) = pool.free.pop() {
            slot
        } else {
            pool.slots.push(Slot::default());
            let grown = pool.slots.len();
            if grown == self.reserved + 1 {
                tracing::warn!(
                    thread = tid,
                    reserved = self.reserved,
                    "context pool exhausted; growing"
                );
            }
            (grown - 1) as u32
        };

        let entry = &mut pool.slots[slot as usize];
        entry.entry = Some(history);
        pool.live += 1;

        ContextHandle {
            pool: self.id,
            thread: tid,
            slot,
            generation: entry.generation,
        }
    }

    /// Returns the context behind `handle` without releasing it.
    ///
    /// Returns `None` when the handle is stale or was issued by another pool.
    pub fn get(&self, handle: &ContextHandle) -> Option<PredictionHistory> {
        if handle.pool != self.id {
            return None;
        }
        let slot = self.threads.get(handle.thread)?.slots.get(handle.slot as usize)?;
        if slot.generation == handle.generation {
            slot.entry
        } else {
            None
        }
    }

    /// Frees the slot behind `handle` and returns its context.
    ///
    /// Returns `None` when the handle is stale or foreign; the pool is left
    /// untouched.
    pub fn release(&mut self, handle: ContextHandle) -> Option<PredictionHistory> {
        if handle.pool != self.id {
            return None;
        }
        let pool = self.threads.get_mut(handle.thread)?;
        let slot = pool.slots.get_mut(handle.slot as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        pool.free.push(handle.slot);
        pool.live -= 1;
        Some(entry)
    }

    /// Returns the number of live contexts for `tid`.
    pub fn in_flight(&self, tid: ThreadId) -> usize {
        self.threads[tid].live
    }

    /// Returns the number of slots currently allocated for `tid`.
    pub fn capacity(&self, tid: ThreadId) -> usize {
        self.threads[tid].slots.len()
    }
}
