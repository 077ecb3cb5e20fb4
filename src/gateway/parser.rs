//! Parses a raw JSON order message into a `CanonicalOrder`, the wire
//! boundary's only entry point. Field extraction collects a single
//! violation per missing/malformed field and defers everything else to
//! `CanonicalOrder::create`'s own validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;

use super::types::{CanonicalOrder, OrderSide, OrderType};
use crate::errors::ValidationError;
use crate::instrument::{EquityDetail, InstrumentDetail};
use crate::types::UtcDatetime;

fn field_str<'a>(obj: &'a Value, key: &str) -> Result<&'a str, String> {
    obj.get(key).and_then(Value::as_str).ok_or_else(|| format!("missing or non-string field '{key}'"))
}

fn field_decimal(obj: &Value, key: &str) -> Result<Decimal, String> {
    let raw = field_str(obj, key)?;
    raw.parse::<Decimal>().map_err(|e| format!("field '{key}' is not a decimal: {e}"))
}

fn field_date(obj: &Value, key: &str) -> Result<NaiveDate, String> {
    let raw = field_str(obj, key)?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!("field '{key}' is not a date (YYYY-MM-DD): {e}"))
}

fn parse_side(raw: &str) -> Result<OrderSide, String> {
    match raw {
        "BUY" => Ok(OrderSide::Buy),
        "SELL" => Ok(OrderSide::Sell),
        other => Err(format!("unknown order side '{other}'")),
    }
}

fn parse_order_type(raw: &str) -> Result<OrderType, String> {
    match raw {
        "MARKET" => Ok(OrderType::Market),
        "LIMIT" => Ok(OrderType::Limit),
        other => Err(format!("unknown order type '{other}'")),
    }
}

/// Parse a JSON order message. Today only `instrument_detail.kind ==
/// "EQUITY"` is recognized; other instrument classes are constructed
/// directly via `CanonicalOrder::create` by callers that already hold a
/// typed `InstrumentDetail`, since a full derivative wire-format schema is
/// out of scope for this boundary.
pub fn parse_order(raw_json: &str, timestamp: UtcDatetime) -> Result<CanonicalOrder, ValidationError> {
    let source = "gateway::parser::parse_order";
    let value: Value = serde_json::from_str(raw_json).map_err(|e| {
        ValidationError::single(format!("invalid JSON: {e}"), "MALFORMED_MESSAGE", timestamp, source)
    })?;

    let order_id = field_str(&value, "order_id").unwrap_or("");
    let instrument_id = field_str(&value, "instrument_id").unwrap_or("");
    let isin = value.get("isin").and_then(Value::as_str);
    let side = field_str(&value, "side")
        .and_then(parse_side)
        .unwrap_or(OrderSide::Buy);
    let quantity = field_decimal(&value, "quantity").unwrap_or(Decimal::ZERO);
    let price = field_decimal(&value, "price").unwrap_or(Decimal::ZERO);
    let currency = field_str(&value, "currency").unwrap_or("");
    let order_type = field_str(&value, "order_type")
        .and_then(parse_order_type)
        .unwrap_or(OrderType::Limit);
    let counterparty_lei = field_str(&value, "counterparty_lei").unwrap_or("");
    let executing_party_lei = field_str(&value, "executing_party_lei").unwrap_or("");
    let trade_date = field_date(&value, "trade_date").unwrap_or(
        NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch date is always valid"),
    );
    let settlement_date = field_date(&value, "settlement_date").unwrap_or(trade_date);
    let venue = field_str(&value, "venue").unwrap_or("");

    CanonicalOrder::create(
        order_id,
        instrument_id,
        isin,
        side,
        quantity,
        price,
        currency,
        order_type,
        counterparty_lei,
        executing_party_lei,
        trade_date,
        settlement_date,
        venue,
        timestamp,
        InstrumentDetail::Equity(EquityDetail),
    )
}
