use std::io;
use std::path::PathBuf;
use thiserror::Error;

///Everything that can abort a GP generation, sampling or export run.
#[derive(Debug, Error)]
pub enum GpPdfError {
    #[error("covariance needs at least 2 input replicas, found {found}")]
    InsufficientReplicas { found : usize },

    #[error("covariance still not positive-semidefinite after {iterations} regularization steps (minimum eigenvalue {min_eigenvalue:e})")]
    RegularizationDivergence { iterations : usize, min_eigenvalue : f64 },

    #[error("sampler requires a positive-semidefinite covariance, minimum eigenvalue is {min_eigenvalue:e}")]
    NonPositiveSemiDefiniteInput { min_eigenvalue : f64 },

    #[error("provider failed for member {member}, flavour {channel} at x = {x:e}, Q = {q}: {reason}")]
    ProviderEvaluation {
        member : usize,
        channel : i32,
        x : f64,
        q : f64,
        reason : String
    },

    #[error("failed to write {}: {source}", .path.display())]
    SerializationIo {
        path : PathBuf,
        #[source]
        source : io::Error
    },

    #[error("missing metadata entry `{key}`")]
    MissingMetadata { key : String },

    #[error("invalid metadata entry `{key}`: `{value}`")]
    InvalidMetadata { key : String, value : String },

    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("malformed grid file {}: {reason}", .path.display())]
    MalformedGridFile { path : PathBuf, reason : String },

    #[error("linear algebra failure: {0}")]
    Linalg(#[from] ndarray_linalg::error::LinalgError),

    #[error("archive encoding failure: {0}")]
    Archive(#[from] bincode::Error),

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] io::Error)
}

impl GpPdfError {
    pub fn serialization_io(path : impl Into<PathBuf>, source : io::Error) -> GpPdfError {
        GpPdfError::SerializationIo {
            path : path.into(),
            source
        }
    }
}
