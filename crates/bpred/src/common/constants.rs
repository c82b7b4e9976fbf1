//! Predictor-wide constants.

/// Width in bits of each per-thread global history register.
///
/// History lengths at or beyond this width use every bit of the register.
pub const HISTORY_REGISTER_BITS: usize = 32;

/// Largest supported weight width in bits.
///
/// Weights are stored as `i32`, so the symmetric bound `2^(bits-1) - 1`
/// must fit.
pub const MAX_WEIGHT_BITS: u32 = 32;

/// Smallest supported weight width in bits (a sign and one magnitude bit).
pub const MIN_WEIGHT_BITS: u32 = 2;

/// Address shifts at or beyond this value would discard the whole address.
pub const ADDR_BITS: u32 = 64;
