//! Perceptron Branch Predictor.
//!
//! Uses a single-layer perceptron to predict branch direction. Instead of
//! saturating counters, it keeps a table of weight vectors indexed by branch
//! address. The prediction is the sign of the dot product of the selected
//! weights and the bipolar-encoded global history.
//!
//! History is speculative: outcomes are shifted in as soon as the host
//! reports them, and each lookup pins the history and index it observed so
//! that training uses lookup-time state and squashes restore it exactly.

use tracing::{debug, trace, warn};

use super::{
    BranchPredictor,
    context::{ContextHandle, ContextPool, PredictionHistory},
    history::GlobalHistory,
    weights::WeightTable,
};
use crate::common::constants::ADDR_BITS;
use crate::common::{ConfigError, ThreadId};
use crate::config::PerceptronConfig;
use crate::stats::PredictorStats;

/// Perceptron Predictor structure.
#[derive(Debug)]
pub struct PerceptronPredictor {
    /// Shared table of weight vectors.
    weights: WeightTable,
    /// Per-thread speculative global history.
    history: GlobalHistory,
    /// Per-thread in-flight prediction contexts.
    contexts: ContextPool,
    /// Mask for indexing the table.
    table_mask: usize,
    /// Low address bits dropped before indexing.
    inst_shift_amt: u32,
    /// Correct predictions with `|sum|` at or below this are still trained.
    threshold: i64,
    /// Prediction counters.
    stats: PredictorStats,
}

impl PerceptronPredictor {
    /// Creates a new Perceptron Predictor based on configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the table size is not a power of two,
    /// the weight width is unsupported, `num_threads` is zero, or the shift
    /// would discard the whole address.
    pub fn new(
        config: &PerceptronConfig,
        num_threads: usize,
        inst_shift_amt: u32,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if num_threads == 0 {
            return Err(ConfigError::NoThreads);
        }
        if inst_shift_amt >= ADDR_BITS {
            return Err(ConfigError::InvalidShiftAmount {
                got: inst_shift_amt,
                max: ADDR_BITS,
            });
        }

        let history = GlobalHistory::new(num_threads, config.history_length);
        debug!(
            table_size = config.table_size,
            history_length = config.history_length,
            weight_bits = config.weight_bits,
            history_mask = history.mask(),
            num_threads,
            "perceptron predictor configured"
        );

        Ok(Self {
            weights: WeightTable::new(
                config.table_size,
                config.history_length,
                config.weight_bits,
            ),
            history,
            contexts: ContextPool::new(num_threads, config.context_pool_size),
            table_mask: config.table_size - 1,
            inst_shift_amt,
            threshold: config.training_threshold,
            stats: PredictorStats::default(),
        })
    }

    /// Calculates the index into the weight table from a branch address.
    #[inline]
    pub const fn index_of(&self, addr: u64) -> usize {
        (addr >> self.inst_shift_amt) as usize & self.table_mask
    }

    /// Returns the weight vector at `index`; element 0 is the bias.
    pub fn weights(&self, index: usize) -> &[i32] {
        self.weights.read(index)
    }

    /// Returns the saturation bound on every weight.
    pub const fn max_weight(&self) -> i64 {
        self.weights.max_weight()
    }

    /// Returns the history register of `tid`.
    pub fn history(&self, tid: ThreadId) -> u32 {
        self.history.read(tid)
    }

    /// Returns the mask applied to every history register.
    pub const fn history_mask(&self) -> u32 {
        self.history.mask()
    }

    /// Returns the number of hardware threads.
    pub fn num_threads(&self) -> usize {
        self.history.num_threads()
    }

    /// Returns the number of unresolved contexts for `tid`.
    pub fn in_flight(&self, tid: ThreadId) -> usize {
        self.contexts.in_flight(tid)
    }

    /// Returns the context behind `ctx` without consuming it.
    pub fn peek(&self, ctx: &ContextHandle) -> Option<PredictionHistory> {
        self.contexts.get(ctx)
    }

    /// Returns the accumulated prediction counters.
    pub const fn stats(&self) -> &PredictorStats {
        &self.stats
    }

    /// Returns the accumulated prediction counters for resetting.
    pub fn stats_mut(&mut self) -> &mut PredictorStats {
        &mut self.stats
    }

    /// Returns the perceptron output for `addr` against `tid`'s current history.
    pub fn output(&self, tid: ThreadId, addr: u64) -> i64 {
        self.weights.output(self.index_of(addr), self.history.read(tid))
    }

    /// Releases `ctx` if it belongs to `tid` and to this predictor.
    fn claim(&mut self, tid: ThreadId, ctx: ContextHandle, op: &str) -> Option<PredictionHistory> {
        if ctx.thread() != tid {
            warn!(
                thread = tid,
                owner = ctx.thread(),
                op,
                "context belongs to another thread; ignoring"
            );
            return None;
        }
        let released = self.contexts.release(ctx);
        if released.is_none() {
            warn!(thread = tid, op, "stale or foreign context; ignoring");
        }
        released
    }

    /// Restores `tid`'s history from a released context.
    fn roll_back(&mut self, tid: ThreadId, h: PredictionHistory) {
        debug!(thread = tid, ghr = h.ghr, index = h.index, "history rolled back");
        self.history.restore(tid, h.ghr);
        self.stats.squashed += 1;
    }

    /// Trains the entry pinned by a retiring branch's context.
    ///
    /// Training happens after a misprediction, or when the confidence
    /// (magnitude of the output) was at or below the training threshold.
    fn train(&mut self, tid: ThreadId, h: PredictionHistory, taken: bool) {
        let ghr = h.ghr & self.history.mask();
        let y = self.weights.output(h.index, ghr);
        let predicted = y >= 0;

        self.stats.committed += 1;
        if predicted != taken {
            self.stats.mispredicted += 1;
        }

        if predicted != taken || y.abs() <= self.threshold {
            trace!(thread = tid, index = h.index, sum = y, taken, "training");
            self.weights.train(h.index, ghr, taken);
            self.stats.trained += 1;
        }
    }
}

impl BranchPredictor for PerceptronPredictor {
    fn name(&self) -> &'static str {
        "perceptron"
    }

    /// Predicts taken if the perceptron output (dot product) is non-negative.
    fn lookup(&mut self, tid: ThreadId, addr: u64) -> (bool, Option<ContextHandle>) {
        let index = self.index_of(addr);
        let ghr = self.history.read(tid);
        let y = self.weights.output(index, ghr);
        let taken = y >= 0;

        self.stats.lookups += 1;
        if taken {
            self.stats.predicted_taken += 1;
        }
        trace!(thread = tid, addr, index, ghr, sum = y, taken, "lookup");

        let ctx = self.contexts.acquire(tid, PredictionHistory { ghr, index });
        (taken, Some(ctx))
    }

    fn record_history(&mut self, tid: ThreadId, taken: bool) {
        self.history.record(tid, taken);
        self.stats.history_updates += 1;
        trace!(thread = tid, taken, ghr = self.history.read(tid), "history");
    }

    fn update(&mut self, tid: ThreadId, ctx: Option<ContextHandle>, taken: bool, squashed: bool) {
        let Some(ctx) = ctx else {
            return;
        };
        let Some(h) = self.claim(tid, ctx, "update") else {
            return;
        };

        if squashed {
            self.roll_back(tid, h);
        } else {
            self.train(tid, h, taken);
        }
    }

    fn squash(&mut self, tid: ThreadId, ctx: ContextHandle) {
        if let Some(h) = self.claim(tid, ctx, "squash") {
            self.roll_back(tid, h);
        }
    }
}
