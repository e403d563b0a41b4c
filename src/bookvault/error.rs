use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Cannot log progress on {id}: {attempted} pages read would exceed the {pages} pages of the book")]
    PagesExceeded {
        id: String,
        pages: u32,
        attempted: i64,
    },

    #[error("Cannot log progress on {id}: pages read would drop below zero ({attempted})")]
    NegativeProgress { id: String, attempted: i64 },

    #[error("Invalid search pattern: {0}")]
    InvalidPattern(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, VaultError>;
