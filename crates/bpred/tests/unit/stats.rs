//! Prediction Statistics Tests.
//!
//! Verifies that the perceptron predictor counts lookups, resolutions and
//! rollbacks, and that the summary report renders every counter.

use pretty_assertions::assert_eq;

use perceptron_bpred::bru::BranchPredictor;
use perceptron_bpred::stats::PredictorStats;

use crate::common::{addr_for, perceptron};

#[test]
fn test_stats_start_empty() {
    let bp = perceptron(4, 2, 8);
    assert_eq!(bp.stats(), &PredictorStats::default());
    assert_eq!(bp.stats().accuracy(), None);
}

#[test]
fn test_stats_follow_lifecycle() {
    let mut bp = perceptron(4, 2, 8);
    let addr = addr_for(1);

    // mispredicted and trained
    let (taken, ctx) = bp.lookup(0, addr);
    bp.record_history(0, false);
    bp.update(0, ctx, false, false);
    assert!(taken);

    // squashed
    let (_, ctx) = bp.lookup(0, addr);
    bp.record_history(0, true);
    bp.update(0, ctx, true, true);

    // correct and confident
    let (taken, ctx) = bp.lookup(0, addr);
    bp.record_history(0, false);
    bp.update(0, ctx, false, false);
    assert!(!taken);

    assert_eq!(
        bp.stats(),
        &PredictorStats {
            lookups: 3,
            predicted_taken: 1,
            history_updates: 3,
            committed: 2,
            mispredicted: 1,
            trained: 1,
            squashed: 1,
        }
    );
    assert_eq!(bp.stats().accuracy(), Some(0.5));
}

#[test]
fn test_stats_reset() {
    let mut bp = perceptron(4, 2, 8);
    let (_, ctx) = bp.lookup(0, 0);
    bp.update(0, ctx, true, false);
    assert_ne!(bp.stats().lookups, 0);

    bp.stats_mut().reset();
    assert_eq!(bp.stats(), &PredictorStats::default());
}

#[test]
fn test_stats_summary() {
    let stats = PredictorStats {
        lookups: 10,
        predicted_taken: 6,
        history_updates: 12,
        committed: 8,
        mispredicted: 2,
        trained: 3,
        squashed: 2,
    };
    let report = stats.to_string();
    assert!(report.contains("bp.lookups             10"));
    assert!(report.contains("bp.mispredicted        2"));
    assert!(report.contains("bp.accuracy            75.00%"));

    let empty = PredictorStats::default().to_string();
    assert!(empty.contains("bp.accuracy            n/a"));
}
