use crate::{Error, Result};

/// An append-only table of numeric rows with running per-column min/max.
///
/// Rows are kept in one contiguous buffer (`row_count * column_count`
/// values). The column count is fixed by the first appended row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    values: Vec<f32>,
    columns: usize,
    min: Vec<f32>,
    max: Vec<f32>,
}

impl Table {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table by appending every row in order.
    pub fn from_rows<I, R>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[f32]>,
    {
        let mut table = Self::new();
        for row in rows {
            table.append(row.as_ref())?;
        }
        Ok(table)
    }

    /// Append a row and fold it into the column min/max.
    ///
    /// The first row fixes the column count; any later row of a different
    /// width, or any row holding NaN or an infinity, is rejected and the
    /// table is left untouched.
    pub fn append(&mut self, row: &[f32]) -> Result<()> {
        if row.is_empty() {
            return Err(Error::EmptyRow);
        }
        if let Some((column, &value)) = row.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(Error::NonFiniteValue { column, value });
        }

        if self.columns == 0 {
            self.columns = row.len();
            self.min = row.to_vec();
            self.max = row.to_vec();
        } else {
            if row.len() != self.columns {
                return Err(Error::SchemaMismatch {
                    expected: self.columns,
                    actual: row.len(),
                });
            }
            for (col, &value) in row.iter().enumerate() {
                if value < self.min[col] {
                    self.min[col] = value;
                } else if value > self.max[col] {
                    self.max[col] = value;
                }
            }
        }

        self.values.extend_from_slice(row);
        Ok(())
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        if self.columns == 0 {
            0
        } else {
            self.values.len() / self.columns
        }
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn row(&self, index: usize) -> Result<&[f32]> {
        let len = self.row_count();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        let start = index * self.columns;
        Ok(&self.values[start..start + self.columns])
    }

    /// Iterate over the raw rows in insertion order
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        (0..self.row_count()).map(move |i| {
            let start = i * self.columns;
            &self.values[start..start + self.columns]
        })
    }

    pub fn column_min(&self, column: usize) -> Result<f32> {
        self.min.get(column).copied().ok_or(Error::IndexOutOfRange {
            index: column,
            len: self.columns,
        })
    }

    pub fn column_max(&self, column: usize) -> Result<f32> {
        self.max.get(column).copied().ok_or(Error::IndexOutOfRange {
            index: column,
            len: self.columns,
        })
    }

    /// Columns whose min equals their max. Normalizing them divides by zero.
    pub fn degenerate_columns(&self) -> Vec<usize> {
        self.min
            .iter()
            .zip(self.max.iter())
            .enumerate()
            .filter(|(_, (lo, hi))| lo == hi)
            .map(|(col, _)| col)
            .collect()
    }

    /// Min-max rescale row `index` into a fresh vector.
    ///
    /// Values land in `[0, 1]` for every column with `max > min`. Constant
    /// columns produce NaN; callers must not assume the result is finite.
    /// The span is taken in f64 so a range wider than `f32::MAX` stays finite.
    pub fn normalized(&self, index: usize) -> Result<Vec<f32>> {
        let mut out = Vec::with_capacity(self.columns);
        self.normalize_into(index, &mut out)?;
        Ok(out)
    }

    /// Same as [`Table::normalized`], reusing `out` as the destination.
    pub fn normalize_into(&self, index: usize, out: &mut Vec<f32>) -> Result<()> {
        let row = self.row(index)?;
        out.clear();
        out.extend(
            row.iter()
                .zip(self.min.iter().zip(self.max.iter()))
                .map(|(&value, (&lo, &hi))| {
                    let lo = f64::from(lo);
                    ((f64::from(value) - lo) / (f64::from(hi) - lo)) as f32
                }),
        );
        Ok(())
    }
}
