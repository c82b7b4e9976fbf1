//! Per-thread global history registers.
//!
//! Each hardware thread owns one shift register of recent branch outcomes,
//! bit 0 being the most recent. Outcomes are shifted in speculatively, as soon
//! as the host reports them, and the whole register is restored from a
//! snapshot when the pipeline discards the speculative path.

use crate::common::{HISTORY_REGISTER_BITS, ThreadId};

/// Returns the register mask for a history length.
///
/// Exactly `history_length` low bits are set, or every bit when the length
/// meets or exceeds the register width.
pub const fn history_mask(history_length: usize) -> u32 {
    if history_length >= HISTORY_REGISTER_BITS {
        u32::MAX
    } else {
        (1u32 << history_length) - 1
    }
}

/// Global history registers for every hardware thread.
#[derive(Debug, Clone)]
pub struct GlobalHistory {
    /// One register per thread.
    regs: Vec<u32>,
    /// Mask applied after every shift.
    mask: u32,
}

impl GlobalHistory {
    /// Creates zeroed registers for `num_threads` threads.
    pub fn new(num_threads: usize, history_length: usize) -> Self {
        Self {
            regs: vec![0; num_threads],
            mask: history_mask(history_length),
        }
    }

    /// Returns the mask applied to every register.
    #[inline]
    pub const fn mask(&self) -> u32 {
        self.mask
    }

    /// Returns the number of thread registers.
    #[inline]
    pub fn num_threads(&self) -> usize {
        self.regs.len()
    }

    /// Reads the masked register for `tid`.
    #[inline]
    pub fn read(&self, tid: ThreadId) -> u32 {
        self.regs[tid] & self.mask
    }

    /// Shifts `taken` into the register for `tid`.
    #[inline]
    pub fn record(&mut self, tid: ThreadId, taken: bool) {
        let reg = &mut self.regs[tid];
        *reg = (reg.wrapping_shl(1) | u32::from(taken)) & self.mask;
    }

    /// Overwrites the register for `tid` with a snapshot taken earlier.
    #[inline]
    pub fn restore(&mut self, tid: ThreadId, snapshot: u32) {
        self.regs[tid] = snapshot;
    }
}
