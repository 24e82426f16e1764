//! Distance and single-row prediction.
//!
//! Both tables are normalized against their own column bounds. The test row
//! and every training row are rescaled independently, then compared with
//! Euclidean distance that skips the response column.

use crate::neighbors::NeighborTracker;
use crate::table::Table;
use crate::{Error, Result};

/// Euclidean distance between `a` and `b`, skipping column `ignore_index`.
///
/// Non-finite inputs propagate: a NaN in any compared column makes the
/// distance NaN.
pub fn distance(a: &[f32], b: &[f32], ignore_index: usize) -> Result<f32> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let sum: f32 = a
        .iter()
        .zip(b.iter())
        .enumerate()
        .filter(|(col, _)| *col != ignore_index)
        .map(|(_, (x, y))| {
            let diff = x - y;
            diff * diff
        })
        .sum();

    Ok(sum.sqrt())
}

/// A predicted response together with the training rows that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub value: f32,
    /// Training row indices, in tracker slot order
    pub neighbors: Vec<usize>,
}

/// Predict the response of `test_row` as the mean response of its `k`
/// nearest training rows.
pub fn predict(
    train: &Table,
    test: &Table,
    test_row: usize,
    k: usize,
    response_index: usize,
) -> Result<f32> {
    predict_with_neighbors(train, test, test_row, k, response_index).map(|p| p.value)
}

pub fn predict_with_neighbors(
    train: &Table,
    test: &Table,
    test_row: usize,
    k: usize,
    response_index: usize,
) -> Result<Prediction> {
    if train.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let mut tracker = NeighborTracker::new(k)?;
    let test_norm = test.normalized(test_row)?;
    let mut train_norm = Vec::with_capacity(train.column_count());

    for j in 0..train.row_count() {
        train.normalize_into(j, &mut train_norm)?;
        let d = distance(&test_norm, &train_norm, response_index)?;
        tracker.offer(j, d);
    }

    let neighbors = tracker.selected();
    let mut sum = 0.0f32;
    for &id in &neighbors {
        sum += response(train, id, response_index)?;
    }

    tracing::trace!(test_row, k, neighbors = neighbors.len(), "predicted row");

    Ok(Prediction {
        value: sum / neighbors.len() as f32,
        neighbors,
    })
}

/// Raw response value of `row` in `table`
pub(crate) fn response(table: &Table, row: usize, response_index: usize) -> Result<f32> {
    let values = table.row(row)?;
    values
        .get(response_index)
        .copied()
        .ok_or(Error::IndexOutOfRange {
            index: response_index,
            len: values.len(),
        })
}
