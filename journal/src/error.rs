use storage::StorageError;
use thiserror::Error;
use types::ValidationError;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("No {kind} matches {key:?}")]
    NotFound { kind: &'static str, key: String },

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl CommandError {
    pub(crate) fn not_found(kind: &'static str, key: &str) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }
}
