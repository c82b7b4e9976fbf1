//! Configuration system for the branch predictor.
//!
//! This module defines the configuration structures consumed at construction.
//! It provides:
//! 1. **Defaults:** Baseline predictor geometry and host parameters.
//! 2. **Structures:** Root config plus the perceptron-specific parameters.
//! 3. **Enums:** Branch predictor algorithm selection.
//! 4. **Validation:** Structural checks that must hold before a predictor is built.
//!
//! Configuration is supplied as JSON by the host's parameter loader, or use
//! `Config::default()`.

use serde::Deserialize;

use crate::common::constants::{ADDR_BITS, MAX_WEIGHT_BITS, MIN_WEIGHT_BITS};
use crate::common::error::ConfigError;

/// Default configuration constants for the predictor.
mod defaults {
    /// Default number of hardware threads.
    pub const NUM_THREADS: usize = 1;

    /// Default count of low address bits dropped before indexing.
    ///
    /// Matches 4-byte instruction alignment.
    pub const INST_SHIFT_AMT: u32 = 2;

    /// Default perceptron table size (1024 entries).
    pub const PERCEPTRON_TABLE_SIZE: usize = 1024;

    /// Default perceptron global history length (32 bits).
    pub const PERCEPTRON_HISTORY: usize = 32;

    /// Default perceptron weight width (8-bit weights, magnitude 127).
    pub const PERCEPTRON_WEIGHT_BITS: u32 = 8;

    /// Default training margin.
    ///
    /// Zero means correct predictions are reinforced only at an exact zero sum.
    pub const PERCEPTRON_THRESHOLD: i64 = 0;

    /// Default number of in-flight contexts reserved per thread.
    pub const CONTEXT_POOL_SIZE: usize = 64;
}

/// Branch prediction algorithm types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchPredictorKind {
    /// Static branch predictor (always predict not-taken).
    Static,
    /// Perceptron-based branch predictor.
    #[default]
    Perceptron,
}

/// Root configuration structure containing all predictor settings.
///
/// # Examples
///
/// ```
/// use perceptron_bpred::config::{BranchPredictorKind, Config};
///
/// let json = r#"{
///     "num_threads": 2,
///     "inst_shift_amt": 2,
///     "branch_predictor": "Perceptron",
///     "perceptron": {
///         "table_size": 256,
///         "history_length": 12,
///         "weight_bits": 8
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.num_threads, 2);
/// assert_eq!(config.branch_predictor, BranchPredictorKind::Perceptron);
/// assert_eq!(config.perceptron.training_threshold, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Number of hardware threads sharing the predictor
    #[serde(default = "Config::default_num_threads")]
    pub num_threads: usize,

    /// Low address bits known to be redundant (instruction alignment)
    #[serde(default = "Config::default_inst_shift_amt")]
    pub inst_shift_amt: u32,

    /// Branch predictor type
    #[serde(default)]
    pub branch_predictor: BranchPredictorKind,

    /// Perceptron predictor configuration
    #[serde(default)]
    pub perceptron: PerceptronConfig,
}

impl Config {
    /// Returns the default hardware thread count.
    fn default_num_threads() -> usize {
        defaults::NUM_THREADS
    }

    /// Returns the default address-to-index shift amount.
    fn default_inst_shift_amt() -> u32 {
        defaults::INST_SHIFT_AMT
    }

    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed documents, or the first
    /// violated rule reported by [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks host parameters and, when selected, the perceptron parameters.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_threads == 0 {
            return Err(ConfigError::NoThreads);
        }
        if self.inst_shift_amt >= ADDR_BITS {
            return Err(ConfigError::InvalidShiftAmount {
                got: self.inst_shift_amt,
                max: ADDR_BITS,
            });
        }
        match self.branch_predictor {
            BranchPredictorKind::Static => Ok(()),
            BranchPredictorKind::Perceptron => self.perceptron.validate(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_threads: defaults::NUM_THREADS,
            inst_shift_amt: defaults::INST_SHIFT_AMT,
            branch_predictor: BranchPredictorKind::default(),
            perceptron: PerceptronConfig::default(),
        }
    }
}

/// Perceptron branch predictor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PerceptronConfig {
    /// Number of weight vectors (power of two)
    #[serde(default = "PerceptronConfig::default_table_size")]
    pub table_size: usize,

    /// Global history length in bits
    #[serde(default = "PerceptronConfig::default_history")]
    pub history_length: usize,

    /// Width of each saturating weight in bits
    #[serde(default = "PerceptronConfig::default_weight_bits")]
    pub weight_bits: u32,

    /// Train correct predictions whose `|sum|` is at or below this margin
    #[serde(default = "PerceptronConfig::default_threshold")]
    pub training_threshold: i64,

    /// In-flight contexts reserved per thread
    #[serde(default = "PerceptronConfig::default_context_pool_size")]
    pub context_pool_size: usize,
}

impl PerceptronConfig {
    /// Returns the default perceptron table size.
    fn default_table_size() -> usize {
        defaults::PERCEPTRON_TABLE_SIZE
    }

    /// Returns the default global history length.
    fn default_history() -> usize {
        defaults::PERCEPTRON_HISTORY
    }

    /// Returns the default weight width.
    fn default_weight_bits() -> u32 {
        defaults::PERCEPTRON_WEIGHT_BITS
    }

    /// Returns the default training margin.
    fn default_threshold() -> i64 {
        defaults::PERCEPTRON_THRESHOLD
    }

    /// Returns the default per-thread context reservation.
    fn default_context_pool_size() -> usize {
        defaults::CONTEXT_POOL_SIZE
    }

    /// Checks the table geometry and weight width.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TableSizeNotPowerOfTwo`],
    /// [`ConfigError::InvalidWeightBits`] or [`ConfigError::TableTooLarge`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.table_size.is_power_of_two() {
            return Err(ConfigError::TableSizeNotPowerOfTwo(self.table_size));
        }
        if self.weight_bits < MIN_WEIGHT_BITS || self.weight_bits > MAX_WEIGHT_BITS {
            return Err(ConfigError::InvalidWeightBits {
                got: self.weight_bits,
                min: MIN_WEIGHT_BITS,
                max: MAX_WEIGHT_BITS,
            });
        }
        if self.table_bytes().is_none() {
            return Err(ConfigError::TableTooLarge {
                table_size: self.table_size,
                history_length: self.history_length,
            });
        }
        Ok(())
    }

    /// Size of the weight table in bytes, or `None` past the allocation limit.
    fn table_bytes(&self) -> Option<usize> {
        self.history_length
            .checked_add(1)
            .and_then(|row| row.checked_mul(self.table_size))
            .and_then(|weights| weights.checked_mul(size_of::<i32>()))
            .filter(|&bytes| bytes <= isize::MAX as usize)
    }
}

impl Default for PerceptronConfig {
    fn default() -> Self {
        Self {
            table_size: defaults::PERCEPTRON_TABLE_SIZE,
            history_length: defaults::PERCEPTRON_HISTORY,
            weight_bits: defaults::PERCEPTRON_WEIGHT_BITS,
            training_threshold: defaults::PERCEPTRON_THRESHOLD,
            context_pool_size: defaults::CONTEXT_POOL_SIZE,
        }
    }
}
