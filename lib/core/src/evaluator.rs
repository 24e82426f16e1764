use crate::predictor::{predict, response};
use crate::{Error, Result, Table};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

/// Smallest k tried by a sweep unless the caller asks otherwise
pub const DEFAULT_K_MIN: usize = 2;

/// Configuration for an evaluator
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    /// Column holding the value to predict
    pub response_index: usize,
    /// Predict test rows (and sweep candidates) on the rayon pool
    pub parallel: bool,
    /// Fail with `DegenerateColumn` instead of letting NaN through
    pub strict_degenerate: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            response_index: 0,
            parallel: false,
            strict_degenerate: false,
        }
    }
}

/// Outcome for a single test row
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowDiagnostic {
    pub row: usize,
    pub prediction: f32,
    pub error: f32,
    pub truth: f32,
}

/// Mean squared error of one k over a test table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub k: usize,
    pub mse: f32,
    pub rows: Vec<RowDiagnostic>,
}

/// Result of sweeping k over a half-open range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KSearch {
    pub best_k: usize,
    pub best_mse: f32,
    /// One evaluation per candidate, ascending k
    pub candidates: Vec<Evaluation>,
}

#[derive(Debug, Clone)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    pub fn response_index(&self) -> usize {
        self.config.response_index
    }

    /// Mean squared error of k-NN predictions over every test row
    pub fn mean_squared_error(&self, k: usize, train: &Table, test: &Table) -> Result<f32> {
        self.evaluate(k, train, test).map(|e| e.mse)
    }

    /// Same as [`Evaluator::mean_squared_error`], keeping per-row diagnostics
    pub fn evaluate(&self, k: usize, train: &Table, test: &Table) -> Result<Evaluation> {
        self.validate(train, test)?;
        self.evaluate_unchecked(k, train, test)
    }

    /// Evaluate every k in `[k_min, k_max)` and keep the one with the
    /// lowest MSE. Ties go to the smaller k.
    pub fn search_best_k(
        &self,
        k_min: usize,
        k_max: usize,
        train: &Table,
        test: &Table,
    ) -> Result<KSearch> {
        if k_min == 0 {
            return Err(Error::InvalidK(k_min));
        }
        if k_max <= k_min {
            return Err(Error::InvalidRange { min: k_min, max: k_max });
        }
        self.validate(train, test)?;

        let candidates: Vec<Evaluation> = if self.config.parallel {
            (k_min..k_max)
                .into_par_iter()
                .map(|k| self.evaluate_unchecked(k, train, test))
                .collect::<Result<_>>()?
        } else {
            (k_min..k_max)
                .map(|k| self.evaluate_unchecked(k, train, test))
                .collect::<Result<_>>()?
        };

        for candidate in &candidates {
            debug!(k = candidate.k, mse = candidate.mse, "evaluated candidate");
        }

        // Non-empty: the range holds at least one k
        let best = select_best(&candidates).ok_or(Error::InvalidRange { min: k_min, max: k_max })?;
        let (best_k, best_mse) = (best.k, best.mse);

        Ok(KSearch { best_k, best_mse, candidates })
    }

    fn validate(&self, train: &Table, test: &Table) -> Result<()> {
        if train.is_empty() || test.is_empty() {
            return Err(Error::EmptyDataset);
        }
        if train.column_count() != test.column_count() {
            return Err(Error::SchemaMismatch {
                expected: train.column_count(),
                actual: test.column_count(),
            });
        }

        let response_index = self.response_index();
        if response_index >= train.column_count() {
            return Err(Error::IndexOutOfRange {
                index: response_index,
                len: train.column_count(),
            });
        }

        for (name, table) in [("train", train), ("test", test)] {
            for column in table.degenerate_columns() {
                if column == response_index {
                    continue;
                }
                if self.config.strict_degenerate {
                    return Err(Error::DegenerateColumn(column));
                }
                warn!(table = name, column, "constant column, normalized values will be NaN");
            }
        }

        Ok(())
    }

    fn evaluate_unchecked(&self, k: usize, train: &Table, test: &Table) -> Result<Evaluation> {
        let rows: Vec<RowDiagnostic> = if self.config.parallel {
            (0..test.row_count())
                .into_par_iter()
                .map(|i| self.diagnose(k, train, test, i))
                .collect::<Result<_>>()?
        } else {
            (0..test.row_count())
                .map(|i| self.diagnose(k, train, test, i))
                .collect::<Result<_>>()?
        };

        // Summed in row order so parallel and sequential runs agree bit for bit
        let squared_error_sum: f32 = rows.iter().map(|r| r.error * r.error).sum();
        let mse = squared_error_sum / rows.len() as f32;

        Ok(Evaluation { k, mse, rows })
    }

    fn diagnose(&self, k: usize, train: &Table, test: &Table, row: usize) -> Result<RowDiagnostic> {
        let response_index = self.response_index();
        let prediction = predict(train, test, row, k, response_index)?;
        let truth = response(test, row, response_index)?;
        Ok(RowDiagnostic {
            row,
            prediction,
            error: prediction - truth,
            truth,
        })
    }
}

/// Lowest MSE wins, then the smaller k. NaN never beats a number.
///
/// The key includes k, so the winner does not depend on candidate order.
pub fn select_best(candidates: &[Evaluation]) -> Option<&Evaluation> {
    candidates
        .iter()
        .min_by_key(|e| (OrderedFloat(e.mse), e.k))
}
