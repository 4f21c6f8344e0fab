use qt_core::QtError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] QtError),

    #[error("invalid scenario: {0}")]
    Scenario(String),
}

pub type SimResult<T> = Result<T, SimError>;
