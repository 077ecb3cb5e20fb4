//! Pure, I/O-free projections of domain objects into reporting shapes.

pub mod projection;

pub use projection::{gross_notional_by_currency, project_trade_report, project_trade_report_line, TradeReportLine};
