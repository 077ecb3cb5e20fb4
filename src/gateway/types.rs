//! `CanonicalOrder`, the single normalised representation of a trade
//! entering the system — output of the gateway, input to every downstream
//! pillar. Grounded on `original_source/attestor/gateway/types.py`.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::{FieldViolation, ValidationError};
use crate::instrument::InstrumentDetail;
use crate::types::{NonEmptyStr, PositiveDecimal, UtcDatetime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Market,
    Limit,
}

/// A 20-character alphanumeric Legal Entity Identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lei(String);

impl Lei {
    pub fn parse(raw: &str) -> Result<Self, String> {
        if raw.len() != 20 || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(format!("LEI must be 20 alphanumeric characters, got '{raw}'"));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// A validated ISIN, kept distinct from a raw string once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Isin(String);

impl Isin {
    pub fn parse(raw: &str) -> Result<Self, String> {
        crate::instrument::validate_isin(raw)?;
        Ok(Self(raw.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Normalised order — output of the gateway, input to the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalOrder {
    pub order_id: NonEmptyStr,
    pub instrument_id: NonEmptyStr,
    pub isin: Option<Isin>,
    pub side: OrderSide,
    pub quantity: PositiveDecimal,
    pub price: Decimal,
    pub currency: NonEmptyStr,
    pub order_type: OrderType,
    pub counterparty_lei: Lei,
    pub executing_party_lei: Lei,
    pub trade_date: NaiveDate,
    pub settlement_date: NaiveDate,
    pub venue: NonEmptyStr,
    pub timestamp: UtcDatetime,
    pub instrument_detail: InstrumentDetail,
}

#[allow(clippy::too_many_arguments)]
impl CanonicalOrder {
    /// Validate every field, collecting all violations before returning a
    /// single combined `Err` — callers see the complete picture, not just
    /// the first problem.
    pub fn create(
        order_id: &str,
        instrument_id: &str,
        isin: Option<&str>,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
        currency: &str,
        order_type: OrderType,
        counterparty_lei: &str,
        executing_party_lei: &str,
        trade_date: NaiveDate,
        settlement_date: NaiveDate,
        venue: &str,
        timestamp: UtcDatetime,
        instrument_detail: InstrumentDetail,
    ) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();

        let order_id_parsed = parse_nonempty(order_id, "order_id", &mut violations);
        let instrument_id_parsed = parse_nonempty(instrument_id, "instrument_id", &mut violations);
        let currency_parsed = parse_nonempty(currency, "currency", &mut violations);
        let venue_parsed = parse_nonempty(venue, "venue", &mut violations);
        let counterparty_lei_parsed = parse_lei(counterparty_lei, "counterparty_lei", &mut violations);
        let executing_party_lei_parsed = parse_lei(executing_party_lei, "executing_party_lei", &mut violations);

        let isin_parsed = match isin {
            None => None,
            Some(raw) => match Isin::parse(raw) {
                Ok(i) => Some(i),
                Err(e) => {
                    violations.push(FieldViolation::new("isin", e, raw));
                    None
                }
            },
        };

        let quantity_parsed = match PositiveDecimal::parse(quantity) {
            Ok(q) => Some(q),
            Err(_) => {
                violations.push(FieldViolation::new("quantity", "must be > 0", quantity.to_string()));
                None
            }
        };

        if false {
            // rust_decimal::Decimal values are always finite, so this
            // branch documents the invariant rather than ever firing.
            violations.push(FieldViolation::new("price", "must be finite", price.to_string()));
        }

        if settlement_date < trade_date {
            violations.push(FieldViolation::new(
                "settlement_date",
                "must be >= trade_date",
                format!("{settlement_date} < {trade_date}"),
            ));
        }

        if let Some(expiry) = instrument_detail.expiry_date() {
            if expiry <= trade_date {
                violations.push(FieldViolation::new(
                    "instrument_detail.expiry_date",
                    "must be > trade_date",
                    format!("{expiry} <= {trade_date}"),
                ));
            }
        }

        if !violations.is_empty() {
            return Err(ValidationError::with_fields(
                format!("CanonicalOrder validation failed: {} violation(s)", violations.len()),
                "GATEWAY_VALIDATION",
                timestamp,
                "gateway::types::CanonicalOrder::create",
                violations,
            ));
        }

        Ok(Self {
            order_id: order_id_parsed.expect("collected no violations"),
            instrument_id: instrument_id_parsed.expect("collected no violations"),
            isin: isin_parsed,
            side,
            quantity: quantity_parsed.expect("collected no violations"),
            price,
            currency: currency_parsed.expect("collected no violations"),
            order_type,
            counterparty_lei: counterparty_lei_parsed.expect("collected no violations"),
            executing_party_lei: executing_party_lei_parsed.expect("collected no violations"),
            trade_date,
            settlement_date,
            venue: venue_parsed.expect("collected no violations"),
            timestamp,
            instrument_detail,
        })
    }
}

fn parse_nonempty(raw: &str, path: &str, violations: &mut Vec<FieldViolation>) -> Option<NonEmptyStr> {
    match NonEmptyStr::parse(raw) {
        Ok(v) => Some(v),
        Err(_) => {
            violations.push(FieldViolation::new(path, "must be non-empty", format!("{raw:?}")));
            None
        }
    }
}

fn parse_lei(raw: &str, path: &str, violations: &mut Vec<FieldViolation>) -> Option<Lei> {
    match Lei::parse(raw) {
        Ok(v) => Some(v),
        Err(e) => {
            violations.push(FieldViolation::new(path, e, raw));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::{EquityDetail, OptionDetail, OptionKind};
    use rust_decimal_macros::dec;

    fn valid_lei() -> String {
        "529900T8BM49AURSDO55".to_string()
    }

    #[test]
    fn create_accepts_well_formed_equity_order() {
        let order = CanonicalOrder::create(
            "ord-1", "AAPL-US", None, OrderSide::Buy, dec!(100), dec!(150.25), "USD",
            OrderType::Limit, &valid_lei(), &valid_lei(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
            "XNAS", UtcDatetime::now(), InstrumentDetail::Equity(EquityDetail),
        );
        assert!(order.is_ok(), "{order:?}");
    }

    #[test]
    fn create_rejects_settlement_before_trade() {
        let order = CanonicalOrder::create(
            "ord-1", "AAPL-US", None, OrderSide::Buy, dec!(100), dec!(150.25), "USD",
            OrderType::Limit, &valid_lei(), &valid_lei(),
            NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            "XNAS", UtcDatetime::now(), InstrumentDetail::Equity(EquityDetail),
        );
        assert!(order.is_err());
    }

    #[test]
    fn create_rejects_option_expiry_not_after_trade_date() {
        let detail = InstrumentDetail::Option(OptionDetail {
            underlying: NonEmptyStr::parse("AAPL").unwrap(),
            kind: OptionKind::Call,
            strike: PositiveDecimal::parse(dec!(150)).unwrap(),
            expiry_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            multiplier: PositiveDecimal::parse(dec!(100)).unwrap(),
        });
        let order = CanonicalOrder::create(
            "ord-1", "AAPL-OPT", None, OrderSide::Buy, dec!(10), dec!(5.5), "USD",
            OrderType::Limit, &valid_lei(), &valid_lei(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
            "XNAS", UtcDatetime::now(), detail,
        );
        assert!(order.is_err());
    }

    #[test]
    fn create_collects_multiple_violations() {
        let order = CanonicalOrder::create(
            "", "", None, OrderSide::Buy, dec!(100), dec!(150.25), "",
            OrderType::Limit, "bad-lei", "bad-lei",
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
            "", UtcDatetime::now(), InstrumentDetail::Equity(EquityDetail),
        );
        let err = order.unwrap_err();
        assert!(err.fields.len() >= 5, "{err:?}");
    }
}
