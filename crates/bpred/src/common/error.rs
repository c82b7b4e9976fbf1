//! Configuration error definitions.
//!
//! A structurally invalid predictor can never be repaired at runtime, so every
//! check happens once, at construction. Steady-state prediction and training
//! never fail: weights saturate and stale contexts are ignored.

use thiserror::Error;

/// Errors raised while loading or validating predictor configuration.
///
/// Hosts are expected to treat any of these as fatal and abort initialization.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The weight table size is zero or not a power of two.
    #[error("table_size must be a power of two, got {0}")]
    TableSizeNotPowerOfTwo(usize),

    /// The weight width cannot represent a symmetric saturating weight.
    #[error("weight_bits must be in {min}..={max}, got {got}")]
    InvalidWeightBits {
        /// The rejected width.
        got: u32,
        /// Smallest accepted width.
        min: u32,
        /// Largest accepted width.
        max: u32,
    },

    /// The weight table would not fit in addressable memory.
    #[error("weight table of {table_size} entries x {history_length} history bits is too large")]
    TableTooLarge {
        /// Number of weight vectors requested.
        table_size: usize,
        /// History weights per vector requested.
        history_length: usize,
    },

    /// The predictor was configured with no hardware threads.
    #[error("num_threads must be at least 1")]
    NoThreads,

    /// The address shift would discard every address bit.
    #[error("inst_shift_amt must be below {max}, got {got}")]
    InvalidShiftAmount {
        /// The rejected shift amount.
        got: u32,
        /// Exclusive upper bound.
        max: u32,
    },

    /// The configuration document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),
}
