//! In-memory reference implementation of the blob store.
//!
//! `MemoryBlobStore` keeps file records and chunk records in a shared map
//! behind an `RwLock`. It exists so the write/read protocol can be driven
//! end-to-end without an external storage service, and it is faithful to
//! the seam: staged uploads publish atomically on close, downloads emit
//! chunk records in sequence order, and unknown identifiers fail with
//! [`StoreError::NotFound`].

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::task::{Context, Poll};
use std::time::SystemTime;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures_core::Stream;

use super::{BlobStore, ByteStream, FileId, FileRecord, StoreError, WriteStream};
use crate::config::StoreConfig;

/// An in-memory chunked blob store.
///
/// Clones share the same underlying map, so a clone handed to an upload
/// stream publishes into the store it came from.
///
/// # Example
///
/// ```
/// use chunkstore::{BlobStore, MemoryBlobStore};
/// use bytes::Bytes;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), chunkstore::StoreError> {
/// let store = MemoryBlobStore::new();
///
/// let mut stream = store.open_write_stream().await?;
/// stream.write(Bytes::from_static(b"hello")).await?;
/// let record = stream.close().await?;
///
/// assert_eq!(record.length, 5);
/// assert_eq!(store.file_count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryBlobStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    files: RwLock<HashMap<FileId, StoredFile>>,
    next_id: AtomicU64,
    chunk_size: usize,
}

/// A stored document: its immutable record plus ordered chunk records.
#[derive(Debug)]
struct StoredFile {
    record: FileRecord,
    chunks: Vec<Bytes>,
}

impl MemoryBlobStore {
    /// Creates a store with the default chunk size.
    pub fn new() -> Self {
        Self::from_config(StoreConfig::default())
    }

    /// Creates a store with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] for an invalid configuration.
    pub fn with_config(config: StoreConfig) -> Result<Self, StoreError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: StoreConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                files: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(1),
                chunk_size: config.chunk_size(),
            }),
        }
    }

    /// Returns the file record for an identifier, if one exists.
    ///
    /// Test/ops accessor; the core's read path goes through
    /// [`open_read_stream`](BlobStore::open_read_stream).
    pub fn record(&self, id: &FileId) -> Option<FileRecord> {
        let files = self.inner.files.read().ok()?;
        files.get(id).map(|file| file.record.clone())
    }

    /// Returns the number of stored files.
    pub fn file_count(&self) -> usize {
        self.inner.files.read().map(|files| files.len()).unwrap_or(0)
    }

    /// Returns the number of chunk records backing an identifier, if the
    /// file exists.
    pub fn chunk_count(&self, id: &FileId) -> Option<usize> {
        let files = self.inner.files.read().ok()?;
        files.get(id).map(|file| file.chunks.len())
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    fn assign_id(&self) -> FileId {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        FileId::from(format!("{:016x}", n))
    }

    fn lock_write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<FileId, StoredFile>>, StoreError> {
        self.files.write().map_err(|_| StoreError::Backend {
            message: "store lock poisoned".into(),
        })
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn open_write_stream(&self) -> Result<Box<dyn WriteStream>, StoreError> {
        Ok(Box::new(MemoryWriteStream {
            inner: Arc::clone(&self.inner),
            staged: BytesMut::new(),
        }))
    }

    async fn open_read_stream(&self, id: &FileId) -> Result<ByteStream, StoreError> {
        let files = self.inner.files.read().map_err(|_| StoreError::Backend {
            message: "store lock poisoned".into(),
        })?;

        match files.get(id) {
            // Bytes clones are reference bumps; the stream owns its view.
            Some(file) => Ok(Box::pin(MemoryReadStream {
                chunks: file.chunks.clone().into_iter(),
            })),
            None => Err(StoreError::NotFound { id: id.clone() }),
        }
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut files = self.inner.lock_write()?;
        let count = files.len() as u64;
        files.clear();
        Ok(count)
    }
}

/// An upload stream staging bytes privately until close.
struct MemoryWriteStream {
    inner: Arc<Inner>,
    staged: BytesMut,
}

#[async_trait]
impl WriteStream for MemoryWriteStream {
    async fn write(&mut self, data: Bytes) -> Result<(), StoreError> {
        self.staged.extend_from_slice(&data);
        Ok(())
    }

    async fn close(self: Box<Self>) -> Result<FileRecord, StoreError> {
        let staged = self.staged.freeze();
        let length = staged.len() as u64;

        #[cfg(feature = "hash-blake3")]
        let checksum = Some(super::Checksum::compute(&staged));
        #[cfg(not(feature = "hash-blake3"))]
        let checksum = None;

        // Split into fixed-size chunk records; zero-copy slices of the
        // staged buffer.
        let chunk_size = self.inner.chunk_size;
        let mut chunks = Vec::with_capacity(staged.len().div_ceil(chunk_size));
        let mut offset = 0;
        while offset < staged.len() {
            let end = usize::min(offset + chunk_size, staged.len());
            chunks.push(staged.slice(offset..end));
            offset = end;
        }

        let record = FileRecord {
            id: self.inner.assign_id(),
            length,
            uploaded_at: SystemTime::now(),
            checksum,
        };

        // Record and chunks become visible together or not at all.
        let mut files = self.inner.lock_write()?;
        files.insert(
            record.id.clone(),
            StoredFile {
                record: record.clone(),
                chunks,
            },
        );

        Ok(record)
    }

    async fn abort(self: Box<Self>) -> Result<(), StoreError> {
        // Staged bytes drop with self; nothing was published.
        Ok(())
    }
}

/// A download stream emitting one chunk record per poll, in sequence
/// order.
struct MemoryReadStream {
    chunks: std::vec::IntoIter<Bytes>,
}

impl Stream for MemoryReadStream {
    type Item = Result<Bytes, StoreError>;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.chunks.next().map(Ok))
    }
}
