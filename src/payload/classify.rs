//! Payload classification - arbitrary values to tagged shapes.

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::error::WriteError;
use crate::payload::Payload;

/// A classified payload shape.
///
/// Classification happens exactly once per store call; every later stage
/// matches on this closed set of variants instead of re-probing the value.
#[derive(Debug)]
pub(crate) enum Shape<'a> {
    /// A non-empty text value.
    Text(&'a str),

    /// A binary buffer, passed through unchanged.
    Binary(&'a Bytes),

    /// A raw fixed-length memory region.
    Raw(&'a [u8]),

    /// An ordered sequence.
    Sequence(&'a [Payload]),

    /// An array-like keyed structure: a declared length plus indexed
    /// members.
    ArrayLike(ArrayLike<'a>),
}

/// The tagged view of an array-like map produced by classification.
#[derive(Debug)]
pub(crate) struct ArrayLike<'a> {
    /// The declared `length` entry, truncated toward zero.
    pub length: u64,

    /// Members keyed by numeric index. Non-index keys are dropped here;
    /// they play no part in stringification.
    pub entries: BTreeMap<u64, &'a Payload>,
}

/// Classifies a payload, or rejects it.
///
/// Fails with [`WriteError::InvalidPayload`] for an absent or empty-text
/// payload, and [`WriteError::UnsupportedPayloadType`] for any shape
/// outside the recognized categories.
pub(crate) fn classify(payload: &Payload) -> Result<Shape<'_>, WriteError> {
    match payload {
        Payload::Null => Err(WriteError::InvalidPayload),
        Payload::Text(s) if s.is_empty() => Err(WriteError::InvalidPayload),
        Payload::Text(s) => Ok(Shape::Text(s)),
        Payload::Binary(b) => Ok(Shape::Binary(b)),
        Payload::Raw(r) => Ok(Shape::Raw(r)),
        Payload::Sequence(items) => Ok(Shape::Sequence(items)),
        Payload::Map(map) => classify_map(map),
        Payload::Bool(_) | Payload::Number(_) => Err(WriteError::UnsupportedPayloadType),
    }
}

/// A map is storable only when it duck-types as array-like: a finite,
/// non-negative numeric `length` entry. The probe happens here and nowhere
/// else.
fn classify_map(map: &BTreeMap<String, Payload>) -> Result<Shape<'_>, WriteError> {
    let length = match map.get("length") {
        Some(Payload::Number(n)) if n.is_finite() && *n >= 0.0 => *n as u64,
        _ => return Err(WriteError::UnsupportedPayloadType),
    };

    let entries = map
        .iter()
        .filter_map(|(key, value)| key.parse::<u64>().ok().map(|index| (index, value)))
        .collect();

    Ok(Shape::ArrayLike(ArrayLike { length, entries }))
}
