//! Error types for chunkstore.
//!
//! The `Display` output of these errors is part of the crate contract:
//! downstream callers match on the rendered message text, so the impls are
//! written by hand rather than derived.

use std::fmt;

use crate::store::{FileId, StoreError};

/// Errors that can occur while storing a payload.
#[derive(Debug)]
pub enum WriteError {
    /// The payload was absent or empty.
    InvalidPayload,

    /// The payload shape is not one of the recognized categories.
    UnsupportedPayloadType,

    /// An I/O error occurred while reading the payload source.
    Io(std::io::Error),

    /// The underlying store failed while writing the payload.
    Storage(StoreError),
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteError::InvalidPayload => write!(f, "payload not supplied"),
            WriteError::UnsupportedPayloadType => write!(
                f,
                "payload not in the correct format, expecting a string, binary buffer, \
                 raw memory region, ordered sequence, or array-like object"
            ),
            WriteError::Io(e) => write!(f, "io error: {}", e),
            WriteError::Storage(e) => write!(f, "storage write failed: {}", e),
        }
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WriteError::Io(e) => Some(e),
            WriteError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for WriteError {
    fn from(e: std::io::Error) -> Self {
        WriteError::Io(e)
    }
}

impl From<StoreError> for WriteError {
    fn from(e: StoreError) -> Self {
        WriteError::Storage(e)
    }
}

/// Errors that can occur while retrieving a payload.
#[derive(Debug)]
pub enum RetrieveError {
    /// The supplied file identifier was absent or empty.
    InvalidId {
        /// The identifier as given, or `None` for an absent one.
        id: Option<FileId>,
    },

    /// The download stream failed, including the unknown-identifier case.
    ReadStream(StoreError),
}

impl fmt::Display for RetrieveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetrieveError::InvalidId { id } => {
                let id = id.as_ref().map(FileId::as_str).unwrap_or("null");
                write!(f, "Payload retrieval failed: Payload id: {} is invalid", id)
            }
            RetrieveError::ReadStream(e) => {
                write!(f, "Payload retrieval failed: Error in reading stream: {}", e)
            }
        }
    }
}

impl std::error::Error for RetrieveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RetrieveError::ReadStream(e) => Some(e),
            _ => None,
        }
    }
}
