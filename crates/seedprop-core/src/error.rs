use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Account not found in gold labels: {0}")]
    UnknownAccount(String),

    #[error("No labels to evaluate: produced set is empty")]
    EmptyEvaluation,
}

pub type Result<T> = std::result::Result<T, Error>;
