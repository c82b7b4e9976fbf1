//! Shared test infrastructure.
//!
//! Builders for predictors with small, hand-checkable geometries and a
//! tracing subscriber that routes predictor logs through the test writer
//! (enable with `RUST_LOG=perceptron_bpred=trace`).

use perceptron_bpred::bru::perceptron::PerceptronPredictor;
use perceptron_bpred::config::PerceptronConfig;
use tracing_subscriber::EnvFilter;

/// Address-to-index shift used by every test predictor (4-byte instructions).
pub const SHIFT: u32 = 2;

/// Installs a test-friendly tracing subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds a perceptron predictor from a full configuration.
pub fn perceptron_with(config: &PerceptronConfig, num_threads: usize) -> PerceptronPredictor {
    init_tracing();
    PerceptronPredictor::new(config, num_threads, SHIFT)
        .unwrap_or_else(|e| panic!("test configuration rejected: {e}"))
}

/// Builds a single-thread perceptron predictor with the default margin.
pub fn perceptron(table_size: usize, history_length: usize, weight_bits: u32) -> PerceptronPredictor {
    perceptron_with(
        &PerceptronConfig {
            table_size,
            history_length,
            weight_bits,
            ..PerceptronConfig::default()
        },
        1,
    )
}

/// Returns the address that maps to table `index` under [`SHIFT`].
pub const fn addr_for(index: usize) -> u64 {
    (index as u64) << SHIFT
}

/// Snapshots every weight vector of a predictor.
pub fn all_weights(bp: &PerceptronPredictor, table_size: usize) -> Vec<Vec<i32>> {
    (0..table_size).map(|i| bp.weights(i).to_vec()).collect()
}
