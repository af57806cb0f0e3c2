use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReflectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read source file {path}: {message}")]
    UnreadableSource { path: PathBuf, message: String },

    #[error("Cannot write to output location {path}: {source}")]
    UnwritableOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Ambiguous enumeration {name}: {message}")]
    AmbiguousEnumeration { name: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("Invalid regex pattern: {0}")]
    Regex(String),
}

impl From<regex::Error> for ReflectError {
    fn from(err: regex::Error) -> Self {
        ReflectError::Regex(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReflectError>;

impl ReflectError {
    pub fn unreadable_source(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ReflectError::UnreadableSource {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn unwritable_output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReflectError::UnwritableOutput {
            path: path.into(),
            source,
        }
    }

    pub fn ambiguous(name: impl Into<String>, message: impl Into<String>) -> Self {
        ReflectError::AmbiguousEnumeration {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        ReflectError::Config(message.into())
    }
}
