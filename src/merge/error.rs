use crate::extraction::ExtractionError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Path does not exist: {0:?}")]
    PathNotFound(PathBuf),

    #[error("No log files found")]
    NoInputFiles,

    #[error("File {path:?} is {size} bytes, above the limit of {limit} bytes")]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("Cannot extract parameters from {path:?}")]
    Extraction {
        path: PathBuf,
        #[source]
        source: ExtractionError,
    },

    #[error("Prototype '{prototype}' carries no repetition index (R_<n>)")]
    NoRepetitions { prototype: String },
}
