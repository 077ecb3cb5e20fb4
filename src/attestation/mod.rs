//! Canonical serialization, content-addressed hashing, and the confidence
//! variants an `Attestation` can carry.

pub mod attestation;
pub mod canonical;
pub mod confidence;

pub use attestation::{create_attestation, Attestation};
pub use canonical::{canonical_bytes, content_hash, CanonicalEncode, CanonicalMap, CanonicalVariant};
pub use confidence::{Confidence, DerivedConfidence, FirmConfidence, QuoteCondition, QuotedConfidence};
