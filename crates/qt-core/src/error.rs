//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `QtError` as one variant
//! via `#[from]`.

use thiserror::Error;

/// The base error type for `qt-core` and a common variant for sub-crates.
#[derive(Debug, Error)]
pub enum QtError {
    /// A material or soil label outside the recognised set.
    #[error("unknown {kind} category {value:?}")]
    UnknownCategory { kind: &'static str, value: String },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `qt-core`.
pub type QtResult<T> = Result<T, QtError>;
