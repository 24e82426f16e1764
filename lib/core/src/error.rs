use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Schema mismatch: expected {expected} columns, got {actual}")]
    SchemaMismatch { expected: usize, actual: usize },

    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("Cannot append an empty row")]
    EmptyRow,

    #[error("Non-finite value {value} in column {column}")]
    NonFiniteValue { column: usize, value: f32 },

    #[error("Invalid k: {0} (k must be at least 1)")]
    InvalidK(usize),

    #[error("Invalid k range: [{min}, {max}) is empty")]
    InvalidRange { min: usize, max: usize },

    #[error("Column {0} is constant, min-max normalization is undefined")]
    DegenerateColumn(usize),
}
