//! Network-subsystem error type.

use thiserror::Error;

use qt_core::QtError;

/// Errors produced while building or loading a [`WaterNetwork`](crate::WaterNetwork).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("network has no nodes")]
    Empty,

    #[error("node {0:?} not found in network")]
    UnknownNode(String),

    #[error("duplicate node id {0:?}")]
    DuplicateNode(String),

    #[error("invalid node {node:?}: {reason}")]
    InvalidNode { node: String, reason: &'static str },

    #[error("invalid pipe {pipe:?}: {reason}")]
    InvalidPipe { pipe: String, reason: &'static str },

    #[error(transparent)]
    Category(#[from] QtError),

    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
