//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that every direction
//! predictor implements. The host pipeline drives a branch through a fixed
//! lifecycle:
//!
//! ```text
//! lookup ──► Pending ──► update(squashed = false) ──► Trained
//!                    ├─► update(squashed = true)  ──► RolledBack
//!                    └─► squash                   ──► RolledBack
//! ```
//!
//! Outcomes are folded into speculative history separately, through
//! `record_history`, which may also be called for branches that never go
//! through a lookup.

use crate::bru::context::ContextHandle;
use crate::common::ThreadId;

/// Trait for branch direction prediction algorithms.
///
/// Operations are synchronous and never fail. Calls for different hardware
/// threads may be freely interleaved.
pub trait BranchPredictor {
    /// Returns a short name identifying the algorithm.
    fn name(&self) -> &'static str;

    /// Predicts whether the branch at `addr` on thread `tid` will be taken.
    ///
    /// Leaves the prediction tables and history untouched. The returned
    /// context, if any, must be passed to exactly one later call of
    /// [`update`](Self::update) or [`squash`](Self::squash).
    ///
    /// # Arguments
    ///
    /// * `tid` - Hardware thread issuing the branch
    /// * `addr` - Address of the branch instruction
    ///
    /// # Returns
    ///
    /// A tuple `(taken, context)`.
    fn lookup(&mut self, tid: ThreadId, addr: u64) -> (bool, Option<ContextHandle>);

    /// Shifts a branch outcome into the speculative history of `tid`.
    ///
    /// # Arguments
    ///
    /// * `tid` - Hardware thread the branch belongs to
    /// * `taken` - Outcome to record (predicted or resolved)
    fn record_history(&mut self, tid: ThreadId, taken: bool);

    /// Resolves a branch, consuming its context.
    ///
    /// An absent context is a no-op. When `squashed` is set, history is
    /// restored to its lookup-time value and nothing is trained; otherwise the
    /// predictor learns from `taken`.
    ///
    /// # Arguments
    ///
    /// * `tid` - Hardware thread the branch belongs to
    /// * `ctx` - Context returned by the branch's lookup
    /// * `taken` - Whether the branch was actually taken
    /// * `squashed` - Whether the pipeline is discarding this branch
    fn update(&mut self, tid: ThreadId, ctx: Option<ContextHandle>, taken: bool, squashed: bool);

    /// Discards a branch without resolving it, consuming its context.
    ///
    /// Restores the history of `tid` to its value at the branch's lookup.
    /// `ctx` must come from a lookup on the same predictor and thread.
    fn squash(&mut self, tid: ThreadId, ctx: ContextHandle);
}
