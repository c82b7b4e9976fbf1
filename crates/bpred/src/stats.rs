//! Prediction statistics.
//!
//! This module tracks how the predictor is exercised by its host:
//! 1. **Lookups:** Predictions made and how many were taken.
//! 2. **Resolution:** Committed branches, mispredictions, and training events.
//! 3. **Speculation:** History updates and squashed contexts.

use std::fmt;

/// Counters collected by a predictor over a simulation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PredictorStats {
    /// Number of lookups performed.
    pub lookups: u64,
    /// Number of lookups that predicted taken.
    pub predicted_taken: u64,
    /// Number of outcomes shifted into a history register.
    pub history_updates: u64,
    /// Number of branches committed through a non-squashed update.
    pub committed: u64,
    /// Number of committed branches whose lookup-time prediction was wrong.
    pub mispredicted: u64,
    /// Number of times a weight vector was trained.
    pub trained: u64,
    /// Number of contexts rolled back (squash, or update with squashed set).
    pub squashed: u64,
}

impl PredictorStats {
    /// Returns the fraction of committed branches predicted correctly.
    ///
    /// Returns `None` before any branch has been committed.
    pub fn accuracy(&self) -> Option<f64> {
        if self.committed == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = (self.committed - self.mispredicted) as f64 / self.committed as f64;
        Some(ratio)
    }

    /// Clears every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for PredictorStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BRANCH PREDICTION")?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "  bp.lookups             {}", self.lookups)?;
        writeln!(f, "  bp.predicted_taken     {}", self.predicted_taken)?;
        writeln!(f, "  bp.history_updates     {}", self.history_updates)?;
        writeln!(f, "  bp.committed           {}", self.committed)?;
        writeln!(f, "  bp.mispredicted        {}", self.mispredicted)?;
        writeln!(f, "  bp.trained             {}", self.trained)?;
        writeln!(f, "  bp.squashed            {}", self.squashed)?;
        match self.accuracy() {
            Some(acc) => writeln!(f, "  bp.accuracy            {:.2}%", acc * 100.0),
            None => writeln!(f, "  bp.accuracy            n/a"),
        }
    }
}
