//! # knnreg
//!
//! k-nearest-neighbors regression over numeric tables.
//!
//! Each test row is predicted as the mean response of its k nearest training
//! rows, where distance is Euclidean over min-max normalized features with
//! the response column left out. Predictions are scored with mean squared
//! error, and k can be picked by sweeping a range.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! knnreg -r train.dat -s test.dat -i 2 -k 3
//! knnreg -r train.dat -s test.dat -i 2 -x 20 -v 2
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use knnreg::prelude::*;
//!
//! let train = Table::from_rows([
//!     [1.0f32, 1.0, 10.0],
//!     [2.0, 2.0, 20.0],
//!     [3.0, 3.0, 30.0],
//! ]).unwrap();
//! let test = Table::from_rows([[1.1f32, 1.1, 10.0], [2.9, 2.9, 30.0]]).unwrap();
//!
//! let evaluator = Evaluator::new(EvaluatorConfig {
//!     response_index: 2,
//!     ..Default::default()
//! });
//! let search = evaluator.search_best_k(1, 3, &train, &test).unwrap();
//! assert_eq!(search.best_k, 1);
//! ```
//!
//! ## Crate Structure
//!
//! - `knnreg-core` - Table, NeighborTracker, predictor and Evaluator
//! - `knnreg-io` - Loader for whitespace separated numeric files

pub mod report;

// Re-export core types
pub use knnreg_core::{
    Table, NeighborTracker, Neighbor,
    Evaluator, EvaluatorConfig, Evaluation, KSearch, RowDiagnostic,
    Prediction, Error, Result, DEFAULT_K_MIN,
    distance, predict, predict_with_neighbors, select_best,
};

// Re-export loader
pub use knnreg_io::{load_table, parse_table, LoadError};

pub use report::{OutputFormat, Reporter};

use std::io::Write;

/// What to compute for a train/test pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Score a single k
    Fixed(usize),
    /// Score every k in `[k_min, k_max)` and keep the best
    Sweep { k_min: usize, k_max: usize },
}

/// Evaluate `mode` and hand the result to `reporter`
pub fn run<W: Write>(
    mode: Mode,
    evaluator: &Evaluator,
    train: &Table,
    test: &Table,
    reporter: &mut Reporter<W>,
) -> anyhow::Result<()> {
    match mode {
        Mode::Fixed(k) => {
            let evaluation = evaluator.evaluate(k, train, test)?;
            tracing::info!(k, mse = evaluation.mse, "evaluation finished");
            reporter.evaluation(&evaluation)?;
        }
        Mode::Sweep { k_min, k_max } => {
            let search = evaluator.search_best_k(k_min, k_max, train, test)?;
            tracing::info!(best_k = search.best_k, best_mse = search.best_mse, "sweep finished");
            reporter.search(&search)?;
        }
    }
    Ok(())
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Table, NeighborTracker,
        Evaluator, EvaluatorConfig, Evaluation, KSearch,
        Error, Result,
        Mode, OutputFormat, Reporter,
        load_table,
    };
}
