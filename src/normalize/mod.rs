//! Byte normalization - classified shapes to canonical bytes.
//!
//! Total over recognized shapes: every [`Shape`] converts without error,
//! and the reported length always equals the byte count of the output.

use std::fmt::Write as _;

use bytes::Bytes;

use crate::payload::{ArrayLike, Payload, Shape};

/// A canonical byte sequence plus its length.
///
/// The length is the declared length recorded in the file record at write
/// time. Invariant: `length == data.len()`.
#[derive(Debug)]
pub(crate) struct CanonicalBytes {
    /// The bytes to persist.
    pub data: Bytes,

    /// The declared byte length.
    pub length: u64,
}

/// Converts a classified shape into canonical bytes.
pub(crate) fn normalize(shape: Shape<'_>) -> CanonicalBytes {
    let data = match shape {
        // Byte length, not character count.
        Shape::Text(s) => Bytes::copy_from_slice(s.as_bytes()),

        // Pass-through; Bytes clones are cheap reference bumps.
        Shape::Binary(b) => b.clone(),

        Shape::Raw(r) => Bytes::copy_from_slice(r),

        Shape::Sequence(items) => Bytes::from(stringify_sequence(items)),

        Shape::ArrayLike(view) => Bytes::from(stringify_array_like(&view)),
    };

    CanonicalBytes {
        length: data.len() as u64,
        data,
    }
}

/// Renders a sequence to its displayable text: elements joined by `,`.
fn stringify_sequence(items: &[Payload]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{}", item);
    }
    out
}

/// Renders an array-like view the same way: indices `0..length` joined by
/// `,`, with missing indices rendering empty. The declared length drives
/// the slot count only; the persisted length is the byte length of this
/// string.
fn stringify_array_like(view: &ArrayLike<'_>) -> String {
    let mut out = String::new();
    for index in 0..view.length {
        if index > 0 {
            out.push(',');
        }
        if let Some(value) = view.entries.get(&index) {
            let _ = write!(out, "{}", value);
        }
    }
    out
}
