//! Chunk reader - reassembles stored documents.
//!
//! - [`retrieve_payload`] - validate the id, stream, reassemble, decode as text
//! - [`retrieve_payload_bytes`] - the same without the text decode
//!
//! Each retrieval is a single-resolution future: it yields exactly one of
//! a body or an error, the async rendering of a completion callback that
//! fires once.

mod assemble;

use bytes::Bytes;

use crate::error::RetrieveError;
use crate::store::{BlobStore, FileId};

use assemble::Assemble;

/// Retrieves a stored document as text.
///
/// Opens a download stream for the identifier, appends fragments in
/// arrival order, and decodes the reassembled bytes as UTF-8. The
/// retrieval contract returns text: content that was stored from a binary
/// payload and is not valid UTF-8 decodes lossily. Use
/// [`retrieve_payload_bytes`] to get the raw bytes instead.
///
/// # Errors
///
/// - [`RetrieveError::InvalidId`] - `None` or empty identifier; no store
///   I/O is attempted
/// - [`RetrieveError::ReadStream`] - unknown identifier or a stream fault,
///   wrapping the store's error
///
/// The rendered messages are contractual:
///
/// ```text
/// Payload retrieval failed: Payload id: null is invalid
/// Payload retrieval failed: Error in reading stream: FileNotFound: file 1222332 was not found
/// ```
///
/// # Example
///
/// ```
/// use chunkstore::{retrieve_payload, store_payload, MemoryBlobStore, Payload};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryBlobStore::new();
/// let id = store_payload(&store, &Payload::from("body")).await?;
///
/// assert_eq!(retrieve_payload(&store, Some(&id)).await?, "body");
/// # Ok(())
/// # }
/// ```
pub async fn retrieve_payload<S>(
    store: &S,
    id: Option<&FileId>,
) -> Result<String, RetrieveError>
where
    S: BlobStore + ?Sized,
{
    let bytes = retrieve_payload_bytes(store, id).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Retrieves a stored document as raw bytes.
///
/// Identical validation and error semantics to [`retrieve_payload`],
/// without the text decode - for callers that stored binary content.
pub async fn retrieve_payload_bytes<S>(
    store: &S,
    id: Option<&FileId>,
) -> Result<Bytes, RetrieveError>
where
    S: BlobStore + ?Sized,
{
    let id = match id {
        Some(id) if !id.as_str().is_empty() => id,
        other => {
            return Err(RetrieveError::InvalidId {
                id: other.cloned(),
            })
        }
    };

    let stream = store
        .open_read_stream(id)
        .await
        .map_err(RetrieveError::ReadStream)?;

    Assemble::new(stream).await.map_err(RetrieveError::ReadStream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryBlobStore;
    use crate::write::store_payload;
    use crate::Payload;

    #[tokio::test]
    async fn test_none_id_fails_without_io() {
        let store = MemoryBlobStore::new();
        let err = retrieve_payload(&store, None).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Payload retrieval failed: Payload id: null is invalid"
        );
    }

    #[tokio::test]
    async fn test_empty_id_is_invalid() {
        let store = MemoryBlobStore::new();
        let err = retrieve_payload(&store, Some(&FileId::from("")))
            .await
            .unwrap_err();
        assert!(matches!(err, RetrieveError::InvalidId { .. }));
    }

    #[tokio::test]
    async fn test_round_trip_text() {
        let store = MemoryBlobStore::new();
        let id = store_payload(&store, &Payload::from("round trip"))
            .await
            .unwrap();

        let body = retrieve_payload(&store, Some(&id)).await.unwrap();
        assert_eq!(body, "round trip");
    }

    #[tokio::test]
    async fn test_bytes_variant_skips_text_decode() {
        let store = MemoryBlobStore::new();
        let raw = Bytes::from_static(b"\xff\xfe\x00binary");
        let id = store_payload(&store, &Payload::binary(raw.clone()))
            .await
            .unwrap();

        let body = retrieve_payload_bytes(&store, Some(&id)).await.unwrap();
        assert_eq!(body, raw);
    }
}
