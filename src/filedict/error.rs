use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FiledictError {
    #[error("Key '{0}' already exists")]
    DuplicateKey(String),

    #[error("Key cannot be empty")]
    EmptyKey,

    #[error("Key '{0}' does not exist")]
    KeyNotFound(String),

    #[error("Dictionary '{0}' already exists")]
    DuplicateName(String),

    #[error("Dictionary '{0}' not found")]
    DictionaryNotFound(String),

    #[error("Invalid dictionary name '{0}'")]
    InvalidName(String),

    #[error("Malformed record at {}:{line}: {source}", .path.display())]
    MalformedLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Input closed while waiting for an answer")]
    InputClosed,

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, FiledictError>;
