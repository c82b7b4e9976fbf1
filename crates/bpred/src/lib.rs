//! Perceptron branch direction predictor.
//!
//! This crate implements a table-indexed perceptron predictor for a pipelined
//! simulator with the following:
//! 1. **Prediction:** Saturating weight vectors indexed by branch address, dotted with global history.
//! 2. **Speculation:** Per-thread global history registers updated before branches resolve.
//! 3. **Rollback:** Pooled prediction contexts that restore history on squash.
//! 4. **Configuration:** Validated, serde-deserializable predictor parameters.
//! 5. **Statistics:** Lookup, training and misprediction counters.

/// Common types and constants (thread ids, register width, errors).
pub mod common;
/// Predictor configuration (defaults, predictor selection, validation).
pub mod config;
/// Branch prediction unit (trait, weight table, history, contexts, predictors).
pub mod bru;
/// Prediction statistics collection and reporting.
pub mod stats;

/// Object-safe predictor interface implemented by every predictor.
pub use crate::bru::BranchPredictor;
/// Opaque per-branch token threaded from `lookup` to `update` or `squash`.
pub use crate::bru::context::ContextHandle;
/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
