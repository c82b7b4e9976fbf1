//! Common types used throughout the predictor.
//!
//! This module provides:
//! 1. **Constants:** Width of the global history register.
//! 2. **Thread Ids:** The hardware thread identifier type.
//! 3. **Error Handling:** Configuration errors raised at construction.

/// Common constants used throughout the predictor.
pub mod constants;

/// Error types for predictor construction.
pub mod error;

pub use constants::HISTORY_REGISTER_BITS;
pub use error::ConfigError;

/// Hardware thread identifier.
///
/// Valid values are `0..num_threads` as fixed at construction.
pub type ThreadId = usize;
