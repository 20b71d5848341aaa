/// Shared error type used across all Mnemosyne crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("graph store: {0}")]
    Store(#[from] neo4rs::Error),

    #[error("graph store row: {0}")]
    Decode(#[from] neo4rs::DeError),

    #[error("graph store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("config: {0}")]
    Config(String),

    #[error("protocol: {0}")]
    Protocol(String),
}

pub type Result<T> = std::result::Result<T, Error>;
