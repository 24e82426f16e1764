use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoadError>;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: cannot parse '{token}' as a number", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{}:{line}: {source}", .path.display())]
    Row {
        path: PathBuf,
        line: usize,
        #[source]
        source: knnreg_core::Error,
    },
}
