//! # knnreg Core
//!
//! Core library for k-nearest-neighbors regression.
//!
//! This crate provides the numeric engine:
//!
//! - [`Table`] - Append-only numeric rows with running column min/max
//! - [`NeighborTracker`] - Keeps the k smallest distances seen so far
//! - [`predictor`] - Normalized Euclidean distance and per-row prediction
//! - [`Evaluator`] - Mean squared error over a test table and k selection
//!
//! ## Example
//!
//! ```rust
//! use knnreg_core::{Evaluator, EvaluatorConfig, Table};
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
//! let mse = evaluator.mean_squared_error(1, &train, &test).unwrap();
//! assert_eq!(mse, 0.0);
//! ```

pub mod error;
pub mod table;
pub mod neighbors;
pub mod predictor;
pub mod evaluator;

pub use error::{Error, Result};
pub use table::Table;
pub use neighbors::{Neighbor, NeighborTracker};
pub use predictor::{distance, predict, predict_with_neighbors, Prediction};
pub use evaluator::{
    select_best, Evaluation, Evaluator, EvaluatorConfig, KSearch, RowDiagnostic, DEFAULT_K_MIN,
};
