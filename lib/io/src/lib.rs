//! # knnreg IO
//!
//! Reads flat numeric matrices (one row per line, whitespace or tab
//! separated, no header) into [`knnreg_core::Table`].

pub mod error;
pub mod loader;

pub use error::{LoadError, Result};
pub use loader::{load_table, parse_table};
