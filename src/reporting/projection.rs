//! Pure projections of a `CanonicalOrder` into report-ready shapes. No
//! original_source equivalent exists — there is no `attestor/reporting/`
//! package in the retrieved pack. Designed as a pure function layer in the
//! teacher's thin-glue style (`utils.rs`); no I/O, no persistence —
//! reporting surfaces are glue over already-validated domain data.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::gateway::{CanonicalOrder, OrderSide};

/// A flattened, report-oriented view of one trade, the shape a downstream
/// regulatory feed (e.g. EMIR/MiFIR) would consume.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeReportLine {
    pub order_id: String,
    pub instrument_id: String,
    pub side: &'static str,
    pub notional: Decimal,
    pub currency: String,
    pub counterparty_lei: String,
    pub executing_party_lei: String,
    pub trade_date: NaiveDate,
    pub settlement_date: NaiveDate,
    pub venue: String,
}

/// Project a single order into its report line. `notional = quantity *
/// price`, the same amount-computation rule the ledger's equity builder
/// uses.
pub fn project_trade_report_line(order: &CanonicalOrder) -> TradeReportLine {
    TradeReportLine {
        order_id: order.order_id.value().to_string(),
        instrument_id: order.instrument_id.value().to_string(),
        side: match order.side {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        },
        notional: order.quantity.value() * order.price,
        currency: order.currency.value().to_string(),
        counterparty_lei: order.counterparty_lei.value().to_string(),
        executing_party_lei: order.executing_party_lei.value().to_string(),
        trade_date: order.trade_date,
        settlement_date: order.settlement_date,
        venue: order.venue.value().to_string(),
    }
}

/// Project a batch, preserving input order.
pub fn project_trade_report(orders: &[CanonicalOrder]) -> Vec<TradeReportLine> {
    orders.iter().map(project_trade_report_line).collect()
}

/// Sum of `notional` across report lines sharing `currency` — a single-
/// currency gross-notional rollup, the simplest aggregate a reporting
/// consumer asks for.
pub fn gross_notional_by_currency(lines: &[TradeReportLine], currency: &str) -> Decimal {
    lines.iter().filter(|l| l.currency == currency).map(|l| l.notional).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::OrderType;
    use crate::instrument::{EquityDetail, InstrumentDetail};
    use crate::types::UtcDatetime;
    use rust_decimal_macros::dec;

    fn sample_order() -> CanonicalOrder {
        CanonicalOrder::create(
            "ord-1", "AAPL-US", None, OrderSide::Buy, dec!(100), dec!(150), "USD",
            OrderType::Limit, "529900T8BM49AURSDO55", "529900T8BM49AURSDO55",
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
            "XNAS", UtcDatetime::now(), InstrumentDetail::Equity(EquityDetail),
        )
        .unwrap()
    }

    #[test]
    fn projects_notional_as_quantity_times_price() {
        let line = project_trade_report_line(&sample_order());
        assert_eq!(line.notional, dec!(15000));
        assert_eq!(line.side, "BUY");
    }

    #[test]
    fn gross_notional_rollup_filters_by_currency() {
        let lines = project_trade_report(&[sample_order(), sample_order()]);
        assert_eq!(gross_notional_by_currency(&lines, "USD"), dec!(30000));
        assert_eq!(gross_notional_by_currency(&lines, "EUR"), Decimal::ZERO);
    }
}
