use thiserror::Error;

#[derive(Error, Debug)]
pub enum FirError {
    #[error("Invalid filter spec: {0}")]
    InvalidFilterSpec(String),

    #[error("Filter design failed: {0}")]
    FilterDesign(String),

    #[error("Parameter error: {0}")]
    Parameter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Audio file error: {0}")]
    Audio(String),
}

pub type Result<T> = std::result::Result<T, FirError>;
