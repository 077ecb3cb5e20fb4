//! The double-entry ledger: core types, the conservation-enforcing engine,
//! and per-instrument-family transaction builders.

pub mod builders;
pub mod engine;
pub mod options;
pub mod transactions;

pub use builders::{
    create_cds_credit_event_transaction, create_cds_maturity_close_transaction,
    create_cds_premium_transaction, create_collateral_call_transaction,
    create_collateral_return_transaction, create_collateral_substitution_transaction,
    create_dividend_transaction, create_equity_settlement_transaction,
    create_fx_spot_settlement_transaction, create_futures_expiry_transaction,
    create_futures_open_transaction, create_irs_fixed_cashflow_transaction,
    create_ndf_cash_settlement_transaction, create_swaption_cash_settlement_transaction,
    create_swaption_physical_close_transaction, create_swaption_premium_transaction,
    create_variation_margin_transaction,
};
pub use engine::LedgerEngine;
pub use options::{
    create_cash_settlement_exercise_transaction, create_exercise_transaction,
    create_expiry_transaction, create_premium_transaction,
};
pub use transactions::{
    Account, AccountType, DeltaValue, DistinctAccountPair, ExecuteResult, LedgerEntry, Move,
    Position, StateDelta, Transaction,
};
