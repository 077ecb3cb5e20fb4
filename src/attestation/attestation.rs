//! `Attestation<T>` and `create_attestation`, grounded on
//! `original_source/attestor/oracle/attestation.py`.

use super::canonical::{content_hash, CanonicalEncode, CanonicalMap};
use super::confidence::Confidence;
use crate::types::{NonEmptyStr, UtcDatetime};

/// A value wrapped with epistemic metadata and content-addressed identity.
/// `content_hash` identifies `value` alone; `attestation_id` identifies the
/// full `(source, timestamp, confidence, value, provenance)` tuple, so the
/// same value observed by two sources never collides, but the same full
/// payload always reproduces the same id.
#[derive(Debug, Clone, PartialEq)]
pub struct Attestation<T> {
    pub value: T,
    pub confidence: Confidence,
    pub source: NonEmptyStr,
    pub timestamp: UtcDatetime,
    pub provenance: Vec<String>,
    pub content_hash: String,
    pub attestation_id: String,
}

struct IdentityPayload<'a, T: CanonicalEncode> {
    source: &'a str,
    timestamp: &'a UtcDatetime,
    confidence: &'a Confidence,
    value: &'a T,
    provenance: &'a [String],
}

impl<T: CanonicalEncode> CanonicalEncode for IdentityPayload<'_, T> {
    fn encode_canonical(&self, e: &mut minicbor::Encoder<Vec<u8>>) -> Result<(), String> {
        let source = self.source.to_string();
        let provenance = self.provenance.to_vec();
        let payload = CanonicalMap::new()
            .field("source", &source)
            .field("timestamp", self.timestamp)
            .field("confidence", self.confidence)
            .field("value", self.value)
            .field("provenance", &provenance);
        payload.encode_canonical(e)
    }
}

/// Build an `Attestation`, computing both hashes from `value`'s canonical
/// bytes and the full identity payload's canonical bytes respectively.
pub fn create_attestation<T: CanonicalEncode + Clone>(
    value: T,
    confidence: Confidence,
    source: &str,
    timestamp: UtcDatetime,
    provenance: Vec<String>,
) -> Result<Attestation<T>, String> {
    let value_hash = content_hash(&value).map_err(|e| format!("cannot hash value: {e}"))?;

    let identity = IdentityPayload {
        source,
        timestamp: &timestamp,
        confidence: &confidence,
        value: &value,
        provenance: &provenance,
    };
    let attestation_id =
        content_hash(&identity).map_err(|e| format!("cannot compute attestation_id: {e}"))?;

    let source = NonEmptyStr::parse(source).map_err(|e| format!("Attestation.source: {e}"))?;

    Ok(Attestation {
        value,
        confidence,
        source,
        timestamp,
        provenance,
        content_hash: value_hash,
        attestation_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attestation::confidence::FirmConfidence;
    use rust_decimal_macros::dec;

    fn sample_confidence() -> Confidence {
        Confidence::Firm(
            FirmConfidence::create("reuters", UtcDatetime::now(), "att-1").unwrap(),
        )
    }

    #[test]
    fn identical_values_different_sources_get_distinct_ids() {
        let ts = UtcDatetime::now();
        let a = create_attestation(dec!(100), sample_confidence(), "reuters", ts, vec![]).unwrap();
        let b = create_attestation(dec!(100), sample_confidence(), "bloomberg", ts, vec![]).unwrap();
        assert_eq!(a.content_hash, b.content_hash);
        assert_ne!(a.attestation_id, b.attestation_id);
    }

    #[test]
    fn identical_full_payloads_get_identical_ids() {
        let ts = UtcDatetime::now();
        let a = create_attestation(dec!(100), sample_confidence(), "reuters", ts, vec![]).unwrap();
        let b = create_attestation(dec!(100), sample_confidence(), "reuters", ts, vec![]).unwrap();
        assert_eq!(a.attestation_id, b.attestation_id);
    }
}
