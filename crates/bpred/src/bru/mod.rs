//! Branch prediction unit (BRU) implementations.
//!
//! This module contains the predictor interface, its building blocks (weight
//! table, per-thread history registers, prediction context pool), and the
//! static and perceptron direction predictors.

pub use self::branch_predictor::BranchPredictor;

/// Branch predictor trait and its lifecycle contract.
pub mod branch_predictor;

/// Pooled per-branch prediction contexts and their handles.
pub mod context;

/// Per-thread speculative global history registers.
pub mod history;

/// Perceptron-based branch predictor.
pub mod perceptron;

/// Static branch predictor (always not-taken).
pub mod static_bp;

/// Saturating perceptron weight table.
pub mod weights;

use self::{context::ContextHandle, perceptron::PerceptronPredictor, static_bp::StaticPredictor};
use crate::common::{ConfigError, ThreadId};
use crate::config::{BranchPredictorKind, Config};

/// Enum wrapper for static dispatch of Branch Predictors.
/// This avoids vtable lookups in the host's fetch loop.
#[derive(Debug)]
pub enum BranchPredictorWrapper {
    /// Always not-taken.
    Static(StaticPredictor),
    /// Perceptron direction predictor.
    Perceptron(PerceptronPredictor),
}

impl BranchPredictorWrapper {
    /// Creates a new branch predictor wrapper based on configuration.
    ///
    /// # Errors
    ///
    /// Returns the first configuration rule the selected predictor violates.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(match config.branch_predictor {
            BranchPredictorKind::Static => Self::Static(StaticPredictor::new(config.num_threads)),
            BranchPredictorKind::Perceptron => Self::Perceptron(PerceptronPredictor::new(
                &config.perceptron,
                config.num_threads,
                config.inst_shift_amt,
            )?),
        })
    }
}

impl BranchPredictor for BranchPredictorWrapper {
    #[inline(always)]
    fn name(&self) -> &'static str {
        match self {
            Self::Static(bp) => bp.name(),
            Self::Perceptron(bp) => bp.name(),
        }
    }

    #[inline(always)]
    fn lookup(&mut self, tid: ThreadId, addr: u64) -> (bool, Option<ContextHandle>) {
        match self {
            Self::Static(bp) => bp.lookup(tid, addr),
            Self::Perceptron(bp) => bp.lookup(tid, addr),
        }
    }

    #[inline(always)]
    fn record_history(&mut self, tid: ThreadId, taken: bool) {
        match self {
            Self::Static(bp) => bp.record_history(tid, taken),
            Self::Perceptron(bp) => bp.record_history(tid, taken),
        }
    }

    #[inline(always)]
    fn update(&mut self, tid: ThreadId, ctx: Option<ContextHandle>, taken: bool, squashed: bool) {
        match self {
            Self::Static(bp) => bp.update(tid, ctx, taken, squashed),
            Self::Perceptron(bp) => bp.update(tid, ctx, taken, squashed),
        }
    }

    #[inline(always)]
    fn squash(&mut self, tid: ThreadId, ctx: ContextHandle) {
        match self {
            Self::Static(bp) => bp.squash(tid, ctx),
            Self::Perceptron(bp) => bp.squash(tid, ctx),
        }
    }
}
