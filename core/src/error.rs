use std::path::PathBuf;

use thiserror::Error;

/// lndconnect error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid certificate: {0}")]
    Certificate(String),

    #[error("Failed to read {}: {source}", path.display())]
    CredentialRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid query argument: {0}")]
    InvalidQuery(String),

    #[error("Query key is reserved: {0}")]
    ReservedQueryKey(String),

    #[error("Invalid port: {0}")]
    InvalidPort(u16),

    #[error("Public IP discovery failed: {0}")]
    Discovery(String),
}

pub type Result<T> = std::result::Result<T, Error>;
