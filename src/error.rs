use thiserror::Error;

use crate::surface::SurfaceError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid value {value:?} at position {index}: {reason}")]
    InvalidValue {
        index: usize,
        value: String,
        reason: &'static str,
    },

    #[error("deck line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
