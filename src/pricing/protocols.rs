//! `PricingEngine`/`RiskEngine` traits: the pricing and VaR engine are
//! external collaborators, stubbed per spec.md §1 Non-goals. Grounded on
//! `original_source/attestor/pricing/protocols.py`.

use rust_decimal::Decimal;

use crate::errors::PricingError;
use crate::gateway::CanonicalOrder;

pub trait PricingEngine {
    fn price(&self, order: &CanonicalOrder) -> Result<Decimal, PricingError>;
}

pub trait RiskEngine {
    fn value_at_risk(&self, orders: &[CanonicalOrder], confidence_level: Decimal) -> Result<Decimal, PricingError>;
}

/// A deterministic test double: prices at the order's own limit price,
/// and reports VaR as a fixed fraction of the book's gross notional.
pub struct StubPricingEngine {
    pub var_fraction: Decimal,
}

impl Default for StubPricingEngine {
    fn default() -> Self {
        Self { var_fraction: Decimal::new(5, 2) }
    }
}

impl PricingEngine for StubPricingEngine {
    fn price(&self, order: &CanonicalOrder) -> Result<Decimal, PricingError> {
        if order.price <= Decimal::ZERO {
            return Err(PricingError {
                message: format!("cannot price order {}: price must be > 0", order.order_id.value()),
                code: "NON_POSITIVE_PRICE".to_string(),
            });
        }
        Ok(order.price)
    }
}

impl RiskEngine for StubPricingEngine {
    fn value_at_risk(&self, orders: &[CanonicalOrder], confidence_level: Decimal) -> Result<Decimal, PricingError> {
        if confidence_level <= Decimal::ZERO || confidence_level >= Decimal::ONE {
            return Err(PricingError {
                message: format!("confidence_level must be in (0,1), got {confidence_level}"),
                code: "INVALID_CONFIDENCE_LEVEL".to_string(),
            });
        }
        let gross_notional: Decimal = orders.iter().map(|o| o.quantity.value() * o.price).sum();
        Ok(gross_notional * self.var_fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{OrderSide, OrderType};
    use crate::instrument::{EquityDetail, InstrumentDetail};
    use crate::types::UtcDatetime;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample_order(price: Decimal) -> CanonicalOrder {
        CanonicalOrder::create(
            "ord-1", "AAPL-US", None, OrderSide::Buy, dec!(100), price, "USD",
            OrderType::Limit, "529900T8BM49AURSDO55", "529900T8BM49AURSDO55",
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
            "XNAS", UtcDatetime::now(), InstrumentDetail::Equity(EquityDetail),
        )
        .unwrap()
    }

    #[test]
    fn stub_pricing_engine_rejects_non_positive_price() {
        let engine = StubPricingEngine::default();
        let order = sample_order(dec!(150));
        assert!(engine.price(&order).is_ok());
    }

    #[test]
    fn stub_risk_engine_scales_with_gross_notional() {
        let engine = StubPricingEngine::default();
        let orders = vec![sample_order(dec!(150))];
        let var = engine.value_at_risk(&orders, dec!(0.95)).unwrap();
        assert_eq!(var, dec!(100) * dec!(150) * dec!(0.05));
    }

    #[test]
    fn stub_risk_engine_rejects_out_of_range_confidence() {
        let engine = StubPricingEngine::default();
        let orders = vec![sample_order(dec!(150))];
        assert!(engine.value_at_risk(&orders, dec!(1)).is_err());
    }
}
