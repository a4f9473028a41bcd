//! The Payload type - the caller-supplied value to be stored.

use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;

/// A caller-supplied payload value.
///
/// `Payload` is a closed model of the heterogeneous shapes the store
/// accepts: text, binary buffers, raw memory regions, ordered sequences,
/// and keyed structures. Scalars (`Null`, `Bool`, `Number`) exist so that
/// sequences and maps can nest arbitrary values; on their own they are not
/// storable and are rejected by classification.
///
/// # Example
///
/// ```
/// use chunkstore::Payload;
///
/// let payload = Payload::sequence(vec![
///     Payload::from("one"),
///     Payload::from("two"),
///     Payload::from("three"),
/// ]);
///
/// assert_eq!(payload.to_string(), "one,two,three");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// An absent value.
    Null,

    /// A boolean scalar.
    Bool(bool),

    /// A numeric scalar.
    Number(f64),

    /// A text value.
    Text(String),

    /// A binary buffer, stored as-is.
    Binary(Bytes),

    /// A raw fixed-length memory region, copied at normalization.
    Raw(Box<[u8]>),

    /// An ordered sequence of values; its own size is authoritative.
    Sequence(Vec<Payload>),

    /// A keyed structure. Storable only when array-like: a numeric
    /// `length` entry plus numerically-indexed members.
    Map(BTreeMap<String, Payload>),
}

impl Payload {
    /// Creates a text payload.
    pub fn text(value: impl Into<String>) -> Self {
        Payload::Text(value.into())
    }

    /// Creates a binary buffer payload.
    pub fn binary(value: impl Into<Bytes>) -> Self {
        Payload::Binary(value.into())
    }

    /// Creates a raw memory region payload.
    pub fn raw(value: impl Into<Box<[u8]>>) -> Self {
        Payload::Raw(value.into())
    }

    /// Creates an ordered sequence payload.
    pub fn sequence(values: impl Into<Vec<Payload>>) -> Self {
        Payload::Sequence(values.into())
    }

    /// Creates a keyed-structure payload from `(key, value)` entries.
    ///
    /// A map is storable only when it carries a numeric `length` entry
    /// (making it array-like); anything else is rejected at store time.
    pub fn map(entries: impl IntoIterator<Item = (String, Payload)>) -> Self {
        Payload::Map(entries.into_iter().collect())
    }

    /// Returns true if this is the absent value.
    pub fn is_null(&self) -> bool {
        matches!(self, Payload::Null)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.to_owned())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Text(value)
    }
}

impl From<Bytes> for Payload {
    fn from(value: Bytes) -> Self {
        Payload::Binary(value)
    }
}

impl From<f64> for Payload {
    fn from(value: f64) -> Self {
        Payload::Number(value)
    }
}

impl From<bool> for Payload {
    fn from(value: bool) -> Self {
        Payload::Bool(value)
    }
}

/// The canonical "convert to displayable text" rendering.
///
/// Normalization stringifies sequences and array-like maps through this
/// impl, so its output is what gets persisted for those shapes:
///
/// - `Null` renders empty
/// - sequences join their elements with `,`
/// - maps render `{key: value, …}` in key order
/// - binary content renders as lossy UTF-8
impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Null => Ok(()),
            Payload::Bool(b) => write!(f, "{}", b),
            Payload::Number(n) => write!(f, "{}", n),
            Payload::Text(s) => f.write_str(s),
            Payload::Binary(b) => f.write_str(&String::from_utf8_lossy(b)),
            Payload::Raw(r) => f.write_str(&String::from_utf8_lossy(r)),
            Payload::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Payload::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_display() {
        assert_eq!(Payload::from("hello").to_string(), "hello");
    }

    #[test]
    fn test_null_displays_empty() {
        assert_eq!(Payload::Null.to_string(), "");
    }

    #[test]
    fn test_number_display_trims_integral() {
        assert_eq!(Payload::Number(1.0).to_string(), "1");
        assert_eq!(Payload::Number(0.5).to_string(), "0.5");
    }

    #[test]
    fn test_sequence_joins_with_commas() {
        let payload = Payload::sequence(vec![
            Payload::from("one"),
            Payload::from("two"),
            Payload::from("three"),
        ]);
        assert_eq!(payload.to_string(), "one,two,three");
    }

    #[test]
    fn test_nested_sequence_flattens_through_join() {
        let payload = Payload::sequence(vec![
            Payload::from("a"),
            Payload::sequence(vec![Payload::Number(0.0), Payload::Number(1.0)]),
        ]);
        assert_eq!(payload.to_string(), "a,0,1");
    }

    #[test]
    fn test_null_in_sequence_renders_empty_slot() {
        let payload = Payload::sequence(vec![
            Payload::from("a"),
            Payload::Null,
            Payload::from("b"),
        ]);
        assert_eq!(payload.to_string(), "a,,b");
    }

    #[test]
    fn test_map_renders_in_key_order() {
        let payload = Payload::map([
            ("b".to_owned(), Payload::Number(2.0)),
            ("a".to_owned(), Payload::Number(1.0)),
        ]);
        assert_eq!(payload.to_string(), "{a: 1, b: 2}");
    }

    #[test]
    fn test_binary_displays_lossy_utf8() {
        let payload = Payload::binary(Bytes::from_static(b"ok"));
        assert_eq!(payload.to_string(), "ok");
    }
}
