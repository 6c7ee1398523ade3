use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalicoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("The maximum number of files is {max} ({count} given). Please reduce the number of files.")]
    LimitExceeded { count: usize, max: usize },

    #[error("{0}")]
    EmptyInput(&'static str),

    #[error("Invalid output name: {0:?}")]
    InvalidName(String),

    #[error("{} already exists and overwriting is disabled", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Config error: {0}")]
    Config(String),
}

impl CalicoError {
    /// True for failures raised while writing or publishing the archive.
    pub fn is_io_failure(&self) -> bool {
        matches!(self, CalicoError::Io(_) | CalicoError::Zip(_))
    }
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, CalicoError>;
