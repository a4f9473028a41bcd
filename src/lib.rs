//! chunkstore
//!
//! Chunked payload storage for Rust.
//!
//! `chunkstore` takes heterogeneous in-memory payloads (text, binary
//! buffers, raw memory regions, ordered sequences, array-like objects),
//! normalizes them into a canonical byte sequence, and streams the bytes
//! into a chunked blob store as one logical document. A store-assigned
//! [`FileId`] later reassembles the document byte-for-byte through a
//! streamed read.
//!
//! The crate intentionally:
//! - does NOT implement a production storage engine (the [`BlobStore`]
//!   trait is the seam; [`MemoryBlobStore`] is a reference implementation)
//! - does NOT retry, deduplicate, compress, or encrypt
//! - does NOT assume an async runtime
//!
//! It only does one thing: **payload in → chunked document → payload out**
//!
//! # Storing
//!
//! ```
//! use chunkstore::{store_payload, retrieve_payload, MemoryBlobStore, Payload};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryBlobStore::new();
//!
//! let id = store_payload(&store, &Payload::from("a small payload")).await?;
//! let body = retrieve_payload(&store, Some(&id)).await?;
//!
//! assert_eq!(body, "a small payload");
//! # Ok(())
//! # }
//! ```
//!
//! # Streaming from a reader
//!
//! ```
//! use chunkstore::{store_reader, MemoryBlobStore};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryBlobStore::new();
//!
//! // Any futures_io::AsyncRead source works; byte slices do out of the box.
//! let record = store_reader(&store, &b"streamed bytes"[..]).await?;
//! assert_eq!(record.length, 14);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod payload;
mod store;

mod normalize; // internal (classifier output -> canonical bytes)
mod read;
mod write;

//
// Public surface (intentionally tiny)
//

pub use config::StoreConfig;
pub use error::{RetrieveError, WriteError};
pub use payload::Payload;
pub use read::{retrieve_payload, retrieve_payload_bytes};
pub use store::memory::MemoryBlobStore;
pub use store::{BlobStore, ByteStream, Checksum, FileId, FileRecord, StoreError, WriteStream};
pub use write::{store_payload, store_reader};
