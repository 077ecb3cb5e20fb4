//! Market-data ingestion: wraps raw quote feeds into `Attestation<Decimal>`
//! values before they reach the calibration routines, grounded on
//! `original_source/attestor/oracle/ingest.py`.

use rust_decimal::Decimal;

use crate::attestation::{create_attestation, Attestation, Confidence, QuoteCondition, QuotedConfidence};
use crate::types::UtcDatetime;

/// One raw tick from a market-data feed, prior to attestation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawQuote {
    pub bid: Decimal,
    pub ask: Decimal,
    pub timestamp: UtcDatetime,
}

/// Wrap a raw quote into an `Attestation<Decimal>` carrying its mid price,
/// rejecting a crossed market before it reaches any downstream calibration.
pub fn ingest_quote(
    raw: RawQuote,
    venue: &str,
    source: &str,
    conditions: QuoteCondition,
) -> Result<Attestation<Decimal>, String> {
    if raw.bid > raw.ask {
        tracing::warn!(bid = %raw.bid, ask = %raw.ask, venue, "rejecting crossed-market quote");
        return Err(format!("ingest_quote: crossed market, bid ({}) > ask ({})", raw.bid, raw.ask));
    }

    let quoted = QuotedConfidence::create(raw.bid, raw.ask, venue, None, conditions)?;
    let mid = quoted.mid();
    let confidence = Confidence::Quoted(quoted);

    tracing::debug!(mid = %mid, venue, source, "ingested quote");
    create_attestation(mid, confidence, source, raw.timestamp, vec![venue.to_string()])
}

/// Ingest a batch, logging and skipping any quote that fails validation
/// rather than aborting the whole feed.
pub fn ingest_batch(
    raws: &[(RawQuote, &str)],
    source: &str,
    conditions: QuoteCondition,
) -> Vec<Attestation<Decimal>> {
    raws.iter()
        .filter_map(|(raw, venue)| match ingest_quote(*raw, venue, source, conditions) {
            Ok(attestation) => Some(attestation),
            Err(err) => {
                tracing::warn!(venue, error = %err, "skipping quote that failed ingestion");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn ingest_quote_rejects_crossed_market() {
        let raw = RawQuote { bid: dec!(101), ask: dec!(100), timestamp: UtcDatetime::now() };
        assert!(ingest_quote(raw, "LSE", "reuters", QuoteCondition::Firm).is_err());
    }

    #[test]
    fn ingest_quote_attests_mid_price() {
        let raw = RawQuote { bid: dec!(99), ask: dec!(101), timestamp: UtcDatetime::now() };
        let attestation = ingest_quote(raw, "LSE", "reuters", QuoteCondition::Firm).unwrap();
        assert_eq!(attestation.value, dec!(100));
    }

    #[test]
    fn ingest_batch_skips_bad_quotes_and_keeps_good_ones() {
        let good = RawQuote { bid: dec!(99), ask: dec!(101), timestamp: UtcDatetime::now() };
        let bad = RawQuote { bid: dec!(101), ask: dec!(99), timestamp: UtcDatetime::now() };
        let results = ingest_batch(&[(good, "LSE"), (bad, "NYSE")], "reuters", QuoteCondition::Firm);
        assert_eq!(results.len(), 1);
    }
}
