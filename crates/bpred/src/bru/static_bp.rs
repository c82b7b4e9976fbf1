//! Static Branch Predictor.
//!
//! Always predicts not-taken and never produces a prediction context. It
//! still keeps per-thread history so the host can swap it for a dynamic
//! predictor without changing how it drives the interface.

use super::{BranchPredictor, context::ContextHandle, history::GlobalHistory};
use crate::common::{HISTORY_REGISTER_BITS, ThreadId};

/// Static predictor structure.
#[derive(Debug)]
pub struct StaticPredictor {
    /// Global history, kept for host-visible consistency only.
    history: GlobalHistory,
}

impl StaticPredictor {
    /// Creates a new static predictor for `num_threads` threads.
    pub fn new(num_threads: usize) -> Self {
        Self {
            history: GlobalHistory::new(num_threads, HISTORY_REGISTER_BITS),
        }
    }

    /// Returns the history register of `tid`.
    pub fn history(&self, tid: ThreadId) -> u32 {
        self.history.read(tid)
    }
}

impl BranchPredictor for StaticPredictor {
    fn name(&self) -> &'static str {
        "static"
    }

    fn lookup(&mut self, _tid: ThreadId, _addr: u64) -> (bool, Option<ContextHandle>) {
        (false, None)
    }

    fn record_history(&mut self, tid: ThreadId, taken: bool) {
        self.history.record(tid, taken);
    }

    /// No contexts are ever handed out, so there is nothing to resolve.
    fn update(&mut self, _tid: ThreadId, ctx: Option<ContextHandle>, _taken: bool, _squashed: bool) {
        if ctx.is_some() {
            tracing::warn!("static predictor received a foreign context; ignoring");
        }
    }

    fn squash(&mut self, _tid: ThreadId, _ctx: ContextHandle) {
        tracing::warn!("static predictor received a foreign context; ignoring");
    }
}
