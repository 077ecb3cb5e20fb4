//! Canonical byte encoding and content-addressed hashing. `attestor.oracle.attestation`
//! imports `content_hash` from `attestor.core.serialization`, but that module was
//! never retrieved into `original_source/` (see `_INDEX.md`) — no original_source
//! file grounds this encoder directly. Grounded instead on the teacher's own
//! `sha256::digest` usage in `trade.rs`/`context.rs`.
//!
//! A type that can be hashed implements [`CanonicalEncode`] directly against
//! a `minicbor::Encoder<Vec<u8>>` rather than deriving `minicbor::Encode` —
//! the derive macro assigns field indices, but the canonical format needs
//! key-sorted maps, tagged sum variants, and omitted `None` fields, which a
//! hand-written `encode` gives full control over.

use minicbor::Encoder;
use rust_decimal::Decimal;

use super::super::types::{FrozenMap, UtcDatetime};

/// Implemented by any value whose canonical byte form feeds a content hash.
/// `encode` must be a pure function of the value's logical content: same
/// content in, same bytes out, regardless of how the value was constructed.
pub trait CanonicalEncode {
    fn encode_canonical(&self, e: &mut Encoder<Vec<u8>>) -> Result<(), String>;
}

fn map_err<E: std::fmt::Display>(e: E) -> String {
    format!("canonical encode failed: {e}")
}

impl CanonicalEncode for Decimal {
    fn encode_canonical(&self, e: &mut Encoder<Vec<u8>>) -> Result<(), String> {
        e.str(&self.to_string()).map_err(map_err)?;
        Ok(())
    }
}

impl CanonicalEncode for str {
    fn encode_canonical(&self, e: &mut Encoder<Vec<u8>>) -> Result<(), String> {
        e.str(self).map_err(map_err)?;
        Ok(())
    }
}

impl CanonicalEncode for String {
    fn encode_canonical(&self, e: &mut Encoder<Vec<u8>>) -> Result<(), String> {
        e.str(self).map_err(map_err)?;
        Ok(())
    }
}

impl CanonicalEncode for bool {
    fn encode_canonical(&self, e: &mut Encoder<Vec<u8>>) -> Result<(), String> {
        e.bool(*self).map_err(map_err)?;
        Ok(())
    }
}

impl CanonicalEncode for UtcDatetime {
    fn encode_canonical(&self, e: &mut Encoder<Vec<u8>>) -> Result<(), String> {
        e.str(&self.to_string()).map_err(map_err)?;
        Ok(())
    }
}

impl<T: CanonicalEncode> CanonicalEncode for Option<T> {
    fn encode_canonical(&self, e: &mut Encoder<Vec<u8>>) -> Result<(), String> {
        // `None` is omitted entirely by callers building a CanonicalMap;
        // a bare `Option` outside that context encodes `Some` transparently
        // and is never asked to encode `None` (callers skip the field).
        match self {
            Some(v) => v.encode_canonical(e),
            None => Err("attempted to encode an absent field directly".to_string()),
        }
    }
}

impl<T: CanonicalEncode> CanonicalEncode for [T] {
    fn encode_canonical(&self, e: &mut Encoder<Vec<u8>>) -> Result<(), String> {
        e.array(self.len() as u64).map_err(map_err)?;
        for item in self {
            item.encode_canonical(e)?;
        }
        Ok(())
    }
}

impl<T: CanonicalEncode> CanonicalEncode for Vec<T> {
    fn encode_canonical(&self, e: &mut Encoder<Vec<u8>>) -> Result<(), String> {
        self.as_slice().encode_canonical(e)
    }
}

/// A key-sorted `(key, value)` sequence for canonical map encoding. Entries
/// absent from the builder (skipped `None` fields) never appear in the
/// output at all — not as a null payload.
pub struct CanonicalMap<'a> {
    entries: Vec<(&'a str, &'a dyn CanonicalEncode)>,
}

impl<'a> CanonicalMap<'a> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn field(mut self, key: &'a str, value: &'a dyn CanonicalEncode) -> Self {
        self.entries.push((key, value));
        self
    }

    pub fn optional_field(mut self, key: &'a str, value: &'a Option<impl CanonicalEncode>) -> Self {
        if let Some(v) = value {
            self.entries.push((key, v));
        }
        self
    }
}

impl Default for CanonicalMap<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl CanonicalEncode for CanonicalMap<'_> {
    fn encode_canonical(&self, e: &mut Encoder<Vec<u8>>) -> Result<(), String> {
        let mut sorted = self.entries.iter().collect::<Vec<_>>();
        sorted.sort_by_key(|(k, _)| *k);
        e.map(sorted.len() as u64).map_err(map_err)?;
        for (key, value) in sorted {
            e.str(key).map_err(map_err)?;
            value.encode_canonical(e)?;
        }
        Ok(())
    }
}

impl<V: CanonicalEncode> CanonicalEncode for FrozenMap<String, V> {
    fn encode_canonical(&self, e: &mut Encoder<Vec<u8>>) -> Result<(), String> {
        // Already key-sorted by construction; render directly as a map.
        e.map(self.len() as u64).map_err(map_err)?;
        for (key, value) in self.iter() {
            e.str(key).map_err(map_err)?;
            value.encode_canonical(e)?;
        }
        Ok(())
    }
}

/// A sum-type variant: a tag string followed by its payload.
pub struct CanonicalVariant<'a> {
    pub tag: &'a str,
    pub payload: &'a dyn CanonicalEncode,
}

impl CanonicalEncode for CanonicalVariant<'_> {
    fn encode_canonical(&self, e: &mut Encoder<Vec<u8>>) -> Result<(), String> {
        e.array(2).map_err(map_err)?;
        e.str(self.tag).map_err(map_err)?;
        self.payload.encode_canonical(e)?;
        Ok(())
    }
}

/// Render `value`'s canonical bytes.
pub fn canonical_bytes(value: &dyn CanonicalEncode) -> Result<Vec<u8>, String> {
    let mut encoder = Encoder::new(Vec::new());
    value.encode_canonical(&mut encoder)?;
    Ok(encoder.into_writer())
}

/// SHA-256 hex digest of `value`'s canonical bytes.
pub fn content_hash(value: &dyn CanonicalEncode) -> Result<String, String> {
    let bytes = canonical_bytes(value)?;
    Ok(sha256::digest(&bytes))
}
