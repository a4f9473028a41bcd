//! The chunked blob store seam.
//!
//! The core talks to storage exclusively through the [`BlobStore`] and
//! [`WriteStream`] traits: an upload stream that atomically publishes a
//! [`FileRecord`] on close, a download stream that emits byte fragments in
//! order, and a bulk delete for test/ops tooling. [`memory::MemoryBlobStore`]
//! is the in-memory reference implementation.

use std::fmt;
use std::pin::Pin;
use std::time::SystemTime;

use async_trait::async_trait;
use bytes::Bytes;
use futures_core::Stream;

mod checksum;
pub mod memory;

pub use checksum::Checksum;

/// An opaque, store-assigned file identifier.
///
/// The only handle callers hold for later retrieval. Uniqueness is the
/// store's responsibility; the core treats the token as opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileId(String);

impl FileId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for FileId {
    fn from(value: String) -> Self {
        FileId(value)
    }
}

impl From<&str> for FileId {
    fn from(value: &str) -> Self {
        FileId(value.to_owned())
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The file-metadata record published when an upload stream closes.
///
/// Created atomically on close and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// The store-assigned identifier.
    pub id: FileId,

    /// The declared byte length of the stored document.
    pub length: u64,

    /// Creation timestamp.
    pub uploaded_at: SystemTime,

    /// Content checksum over the whole document, when computed.
    pub checksum: Option<Checksum>,
}

/// Errors surfaced by a blob store.
#[derive(Debug)]
pub enum StoreError {
    /// No file record exists for the identifier.
    NotFound {
        /// The identifier that was looked up.
        id: FileId,
    },

    /// Invalid store configuration.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// An I/O error from the storage transport.
    Io(std::io::Error),

    /// A backend fault, e.g. connection loss mid-stream.
    Backend {
        /// The underlying fault message.
        message: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Rendered text is contractual: retrieval errors embed it.
            StoreError::NotFound { id } => {
                write!(f, "FileNotFound: file {} was not found", id)
            }
            StoreError::InvalidConfig { message } => write!(f, "invalid config: {}", message),
            StoreError::Io(e) => write!(f, "io error: {}", e),
            StoreError::Backend { message } => f.write_str(message),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// An ordered stream of byte fragments from a download.
///
/// Fragments arrive in original byte order; the reader appends them as
/// emitted and never re-sorts.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StoreError>> + Send>>;

/// A chunked blob store.
///
/// Implementations own chunk-size policy, identifier assignment, and
/// indexing; the core only drives the streams.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Opens an upload stream for a new document.
    async fn open_write_stream(&self) -> Result<Box<dyn WriteStream>, StoreError>;

    /// Opens a download stream for an existing document.
    ///
    /// Fails with [`StoreError::NotFound`] when no file record carries the
    /// identifier.
    async fn open_read_stream(&self, id: &FileId) -> Result<ByteStream, StoreError>;

    /// Removes every file and chunk record, returning the number of files
    /// deleted. Test/ops tooling only; the store path never calls this.
    async fn delete_all(&self) -> Result<u64, StoreError>;
}

/// An open upload stream.
///
/// Exactly one of [`close`](WriteStream::close) or
/// [`abort`](WriteStream::abort) should consume the stream; dropping it
/// without either releases the staged state without publishing a record.
#[async_trait]
pub trait WriteStream: Send {
    /// Appends bytes to the staged document.
    async fn write(&mut self, data: Bytes) -> Result<(), StoreError>;

    /// Completes the upload: splits the staged bytes into chunk records and
    /// atomically publishes the file record, returning it.
    async fn close(self: Box<Self>) -> Result<FileRecord, StoreError>;

    /// Discards the staged document without publishing anything.
    async fn abort(self: Box<Self>) -> Result<(), StoreError>;
}
