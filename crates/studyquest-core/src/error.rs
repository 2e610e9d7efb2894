//! Core error types for studyquest-core.
//!
//! All user-input failures are `ValidationError`s: they are returned before
//! any state mutation and are meant to be shown to the user verbatim.
//! `StorageError` covers the persistence layer.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyquest-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// User-input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Persistence errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Validation errors.
///
/// Each variant aborts the attempted operation with no state change; the
/// presentation layer reports the message and carries on.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty
    #[error("'{field}' must not be empty")]
    EmptyField { field: &'static str },

    /// A numeric field must be a positive integer
    #[error("'{field}' must be a positive whole number")]
    NotPositive { field: &'static str },

    /// Subject names are unique after case normalization
    #[error("Subject '{name}' already exists")]
    DuplicateSubject { name: String },

    /// Store selection outside the catalog
    #[error("Invalid selection: {index} is not a store item (store has {len})")]
    InvalidSelection { index: usize, len: usize },

    /// Balance too low for the selected reward
    #[error("Not enough Focus Coins: need {cost}, have {balance} (short {})", .cost - .balance)]
    InsufficientCoins { cost: u32, balance: u32 },
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database file
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The data directory could not be created
    #[error("Failed to prepare data directory: {0}")]
    DataDir(#[from] std::io::Error),

    /// The save blob exists but is not valid JSON
    #[error("Malformed save data: {0}")]
    MalformedBlob(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::QueryFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
