//! `InstrumentDetail` sum type, grounded on spec §3 "Canonical order" and
//! the builder amount rules of §4.4 (each detail variant carries exactly
//! the fields the matching builder consumes).

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::types::{NonEmptyStr, PositiveDecimal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Call,
    Put,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FxSettlementType {
    Spot,
    Forward,
    Ndf,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EquityDetail;

#[derive(Debug, Clone, PartialEq)]
pub struct OptionDetail {
    pub underlying: NonEmptyStr,
    pub kind: OptionKind,
    pub strike: PositiveDecimal,
    pub expiry_date: NaiveDate,
    pub multiplier: PositiveDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuturesDetail {
    pub contract_id: NonEmptyStr,
    pub expiry_date: NaiveDate,
    pub contract_size: PositiveDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FxDetail {
    pub base_currency: NonEmptyStr,
    pub quote_currency: NonEmptyStr,
    pub settlement_type: FxSettlementType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IrSwapDetail {
    pub notional: PositiveDecimal,
    pub fixed_rate: Decimal,
    pub leg_currency: NonEmptyStr,
    pub maturity_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CdsDetail {
    pub reference_entity: NonEmptyStr,
    pub notional: PositiveDecimal,
    pub spread: Decimal,
    pub maturity_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwaptionDetail {
    pub underlying_swap_id: NonEmptyStr,
    pub expiry_date: NaiveDate,
    pub strike_rate: Decimal,
}

/// The sum type a `CanonicalOrder` carries. Derivative variants (`Option`,
/// `Futures`, `Swaption`) name an `expiry_date`, which `CanonicalOrder::create`
/// validates against `trade_date` at order time; `Fx`, `IrSwap`, and `Cds`
/// dates are validated at the payout level instead.
#[derive(Debug, Clone, PartialEq)]
pub enum InstrumentDetail {
    Equity(EquityDetail),
    Option(OptionDetail),
    Futures(FuturesDetail),
    Fx(FxDetail),
    IrSwap(IrSwapDetail),
    Cds(CdsDetail),
    Swaption(SwaptionDetail),
}

impl InstrumentDetail {
    /// The `expiry_date` a derivative variant names, if this variant has
    /// one. `Fx`/`IrSwap`/`Cds` return `None` — their dates are validated
    /// elsewhere.
    pub fn expiry_date(&self) -> Option<NaiveDate> {
        match self {
            InstrumentDetail::Option(d) => Some(d.expiry_date),
            InstrumentDetail::Futures(d) => Some(d.expiry_date),
            InstrumentDetail::Swaption(d) => Some(d.expiry_date),
            InstrumentDetail::Equity(_)
            | InstrumentDetail::Fx(_)
            | InstrumentDetail::IrSwap(_)
            | InstrumentDetail::Cds(_) => None,
        }
    }
}

impl Default for InstrumentDetail {
    fn default() -> Self {
        InstrumentDetail::Equity(EquityDetail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_derivative_variants_carry_an_expiry() {
        assert!(InstrumentDetail::Equity(EquityDetail).expiry_date().is_none());
        let opt = InstrumentDetail::Option(OptionDetail {
            underlying: NonEmptyStr::parse("AAPL").unwrap(),
            kind: OptionKind::Call,
            strike: PositiveDecimal::parse(Decimal::from(150)).unwrap(),
            expiry_date: NaiveDate::from_ymd_opt(2025, 12, 19).unwrap(),
            multiplier: PositiveDecimal::parse(Decimal::from(100)).unwrap(),
        });
        assert!(opt.expiry_date().is_some());
    }
}
