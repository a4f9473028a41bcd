//! Configuration for the in-memory store's chunking policy.
//!
//! - [`StoreConfig`] - Controls the fixed chunk-record size

use crate::store::StoreError;

/// Default chunk-record size (255 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 255 * 1024;

/// Configuration for how a store splits documents into chunk records.
///
/// Chunk-size policy belongs to the store, not to callers of the write
/// path: the same payload stored against stores with different chunk sizes
/// still reassembles byte-for-byte.
///
/// # Example
///
/// ```
/// use chunkstore::StoreConfig;
///
/// // Use default configuration
/// let config = StoreConfig::default();
///
/// // Custom configuration
/// let config = StoreConfig::new(64 * 1024)?;
/// # Ok::<(), chunkstore::StoreError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreConfig {
    /// Fixed chunk-record size in bytes.
    chunk_size: usize,
}

impl StoreConfig {
    /// Creates a new configuration with the specified chunk size.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] if `chunk_size` is zero.
    pub fn new(chunk_size: usize) -> Result<Self, StoreError> {
        if chunk_size == 0 {
            return Err(StoreError::InvalidConfig {
                message: "chunk size must be non-zero",
            });
        }

        Ok(Self { chunk_size })
    }

    /// Sets the chunk size.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`StoreConfig::validate`] to check it.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Returns the chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), StoreError> {
        Self::new(self.chunk_size).map(|_| ())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}
