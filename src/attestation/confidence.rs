//! `FirmConfidence`, `QuotedConfidence`, `DerivedConfidence`, grounded on
//! `original_source/attestor/oracle/attestation.py`.

use rust_decimal::Decimal;

use super::canonical::{CanonicalEncode, CanonicalMap, CanonicalVariant};
use crate::types::{FrozenMap, NonEmptyStr, UtcDatetime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteCondition {
    Indicative,
    Firm,
    Rfq,
}

impl QuoteCondition {
    fn label(self) -> &'static str {
        match self {
            QuoteCondition::Indicative => "Indicative",
            QuoteCondition::Firm => "Firm",
            QuoteCondition::Rfq => "RFQ",
        }
    }
}

impl CanonicalEncode for QuoteCondition {
    fn encode_canonical(&self, e: &mut minicbor::Encoder<Vec<u8>>) -> Result<(), String> {
        self.label().encode_canonical(e)
    }
}

/// Confidence from a firm, exchange-quality source.
#[derive(Debug, Clone, PartialEq)]
pub struct FirmConfidence {
    pub source: NonEmptyStr,
    pub timestamp: UtcDatetime,
    pub attestation_ref: NonEmptyStr,
}

impl FirmConfidence {
    pub fn create(source: &str, timestamp: UtcDatetime, attestation_ref: &str) -> Result<Self, String> {
        Ok(Self {
            source: NonEmptyStr::parse(source).map_err(|e| format!("FirmConfidence.source: {e}"))?,
            timestamp,
            attestation_ref: NonEmptyStr::parse(attestation_ref)
                .map_err(|e| format!("FirmConfidence.attestation_ref: {e}"))?,
        })
    }
}

impl CanonicalEncode for FirmConfidence {
    fn encode_canonical(&self, e: &mut minicbor::Encoder<Vec<u8>>) -> Result<(), String> {
        let source = self.source.value().to_string();
        let attestation_ref = self.attestation_ref.value().to_string();
        let payload = CanonicalMap::new()
            .field("source", &source)
            .field("timestamp", &self.timestamp)
            .field("attestation_ref", &attestation_ref);
        CanonicalVariant { tag: "Firm", payload: &payload }.encode_canonical(e)
    }
}

/// Confidence from a quoted market — bid/ask with venue.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotedConfidence {
    pub bid: Decimal,
    pub ask: Decimal,
    pub venue: NonEmptyStr,
    pub size: Option<Decimal>,
    pub conditions: QuoteCondition,
}

impl QuotedConfidence {
    pub fn create(
        bid: Decimal,
        ask: Decimal,
        venue: &str,
        size: Option<Decimal>,
        conditions: QuoteCondition,
    ) -> Result<Self, String> {
        if bid > ask {
            return Err(format!("QuotedConfidence: bid ({bid}) > ask ({ask}) implies negative spread"));
        }
        Ok(Self {
            bid,
            ask,
            venue: NonEmptyStr::parse(venue).map_err(|e| format!("QuotedConfidence.venue: {e}"))?,
            size,
            conditions,
        })
    }

    pub fn mid(&self) -> Decimal {
        (self.bid + self.ask) / Decimal::TWO
    }

    pub fn spread(&self) -> Decimal {
        self.ask - self.bid
    }

    pub fn half_spread(&self) -> Decimal {
        self.spread() / Decimal::TWO
    }
}

impl CanonicalEncode for QuotedConfidence {
    fn encode_canonical(&self, e: &mut minicbor::Encoder<Vec<u8>>) -> Result<(), String> {
        let venue = self.venue.value().to_string();
        let mut payload = CanonicalMap::new()
            .field("bid", &self.bid)
            .field("ask", &self.ask)
            .field("venue", &venue)
            .field("conditions", &self.conditions);
        payload = payload.optional_field("size", &self.size);
        CanonicalVariant { tag: "Quoted", payload: &payload }.encode_canonical(e)
    }
}

/// Confidence from a model/calibration fit, with fit-quality metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedConfidence {
    pub method: NonEmptyStr,
    pub config_ref: NonEmptyStr,
    pub fit_quality: FrozenMap<String, Decimal>,
    pub confidence_interval: Option<(Decimal, Decimal)>,
    pub confidence_level: Option<Decimal>,
}

impl DerivedConfidence {
    pub fn create(
        method: &str,
        config_ref: &str,
        fit_quality: FrozenMap<String, Decimal>,
        confidence_interval: Option<(Decimal, Decimal)>,
        confidence_level: Option<Decimal>,
    ) -> Result<Self, String> {
        if fit_quality.is_empty() {
            return Err("DerivedConfidence: fit_quality must not be empty".to_string());
        }
        if confidence_interval.is_some() != confidence_level.is_some() {
            return Err(
                "confidence_interval and confidence_level must be both present or both absent"
                    .to_string(),
            );
        }
        if let Some(level) = confidence_level {
            if level <= Decimal::ZERO || level >= Decimal::ONE {
                return Err(format!("confidence_level must be in (0,1), got {level}"));
            }
        }
        Ok(Self {
            method: NonEmptyStr::parse(method).map_err(|e| format!("DerivedConfidence.method: {e}"))?,
            config_ref: NonEmptyStr::parse(config_ref)
                .map_err(|e| format!("DerivedConfidence.config_ref: {e}"))?,
            fit_quality,
            confidence_interval,
            confidence_level,
        })
    }
}

impl CanonicalEncode for DerivedConfidence {
    fn encode_canonical(&self, e: &mut minicbor::Encoder<Vec<u8>>) -> Result<(), String> {
        let method = self.method.value().to_string();
        let config_ref = self.config_ref.value().to_string();
        let mut payload = CanonicalMap::new()
            .field("method", &method)
            .field("config_ref", &config_ref)
            .field("fit_quality", &self.fit_quality);
        payload = payload.optional_field("confidence_level", &self.confidence_level);
        let interval = self.confidence_interval.map(|(lo, hi)| vec![lo, hi]);
        payload = payload.optional_field("confidence_interval", &interval);
        CanonicalVariant { tag: "Derived", payload: &payload }.encode_canonical(e)
    }
}

/// One of the three confidence shapes an `Attestation` can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum Confidence {
    Firm(FirmConfidence),
    Quoted(QuotedConfidence),
    Derived(DerivedConfidence),
}

impl CanonicalEncode for Confidence {
    fn encode_canonical(&self, e: &mut minicbor::Encoder<Vec<u8>>) -> Result<(), String> {
        match self {
            Confidence::Firm(c) => c.encode_canonical(e),
            Confidence::Quoted(c) => c.encode_canonical(e),
            Confidence::Derived(c) => c.encode_canonical(e),
        }
    }
}
