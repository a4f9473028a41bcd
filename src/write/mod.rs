//! Chunk writer - streams canonical bytes into the blob store.
//!
//! - [`store_payload`] - classify, normalize, upload, return the assigned id
//! - [`store_reader`] - stream from an async byte source in bounded reads

use std::future::poll_fn;
use std::pin::Pin;

use bytes::Bytes;
use futures_io::AsyncRead;

use crate::error::WriteError;
use crate::normalize::normalize;
use crate::payload::{classify, Payload};
use crate::store::{BlobStore, FileId, FileRecord};

/// Read size for streaming writes.
const READ_BUF_SIZE: usize = 8 * 1024;

/// Stores a payload as one chunked document and returns its identifier.
///
/// Classification and normalization run before any store I/O, so a
/// rejected payload never opens a stream and never leaves a partial
/// write. When this call resolves successfully, the file record with the
/// returned identifier and the declared length already exists in the
/// store.
///
/// # Errors
///
/// - [`WriteError::InvalidPayload`] - payload absent or empty text
/// - [`WriteError::UnsupportedPayloadType`] - shape not recognized
/// - [`WriteError::Storage`] - the store failed; no identifier exists
///
/// # Example
///
/// ```
/// use chunkstore::{store_payload, MemoryBlobStore, Payload};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), chunkstore::WriteError> {
/// let store = MemoryBlobStore::new();
/// let id = store_payload(&store, &Payload::from("hello")).await?;
/// assert!(!id.as_str().is_empty());
/// # Ok(())
/// # }
/// ```
pub async fn store_payload<S>(store: &S, payload: &Payload) -> Result<FileId, WriteError>
where
    S: BlobStore + ?Sized,
{
    // Fails fast; no stream is opened for a rejected payload.
    let shape = classify(payload)?;
    let canonical = normalize(shape);

    let mut stream = store.open_write_stream().await?;

    if let Err(e) = stream.write(canonical.data).await {
        // Release the handle; the write failure is what surfaces.
        let _ = stream.abort().await;
        return Err(WriteError::Storage(e));
    }

    let record = stream.close().await?;
    Ok(record.id)
}

/// Streams a byte source into the store and returns the file record.
///
/// For payloads too large to buffer: bytes are read in bounded batches
/// from any [`futures_io::AsyncRead`] source and forwarded to the upload
/// stream as they arrive. The source bypasses classification - bytes are
/// already canonical. Returns the whole [`FileRecord`] since the caller
/// does not know the length up front.
///
/// The upload stream is aborted on every failure path, reader and store
/// alike.
pub async fn store_reader<S, R>(store: &S, mut reader: R) -> Result<FileRecord, WriteError>
where
    S: BlobStore + ?Sized,
    R: AsyncRead + Unpin,
{
    let mut stream = store.open_write_stream().await?;
    let mut buf = vec![0u8; READ_BUF_SIZE];

    loop {
        let n = match poll_fn(|cx| Pin::new(&mut reader).poll_read(cx, &mut buf)).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                let _ = stream.abort().await;
                return Err(WriteError::Io(e));
            }
        };

        if let Err(e) = stream.write(Bytes::copy_from_slice(&buf[..n])).await {
            let _ = stream.abort().await;
            return Err(WriteError::Storage(e));
        }
    }

    Ok(stream.close().await?)
}
