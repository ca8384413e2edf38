//! Error types and result types for document store operations.
//!
//! Looking up a missing document or running a search that matches nothing is not an
//! error: those outcomes are reported as `Ok(None)` and an empty `Vec` respectively.
//! Use [`DocumentStoreResult<T>`] as the return type for fallible operations.

use serde_json::Error as SerdeJsonError;
use std::convert::Infallible;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a document store.
#[derive(Error, Debug)]
pub enum DocumentStoreError {
    /// Serialization/deserialization error when converting documents to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The document is missing a required part (an author, or an identifier at the
    /// backend boundary).
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

impl From<SerdeJsonError> for DocumentStoreError {
    fn from(err: SerdeJsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}

impl From<Infallible> for DocumentStoreError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
