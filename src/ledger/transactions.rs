//! Ledger domain types, grounded on
//! `original_source/attestor/ledger/transactions.py`. Double-entry
//! invariants are enforced by construction, not by runtime checks scattered
//! through the engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::types::{NonEmptyStr, PositiveDecimal, UtcDatetime};

/// A field-level change recorded for replay/unwind. Six variants cover
/// every scalar shape a `StateDelta` needs to carry.
#[derive(Debug, Clone, PartialEq)]
pub enum DeltaValue {
    Decimal(Decimal),
    Str(String),
    Bool(bool),
    Date(NaiveDate),
    Datetime(UtcDatetime),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountType {
    Cash,
    Securities,
    Derivatives,
    Collateral,
    Margin,
    Accruals,
    Pnl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteResult {
    Applied,
    AlreadyApplied,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub account_id: NonEmptyStr,
    pub account_type: AccountType,
}

/// A derived balance view; may be negative (e.g. a short position).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub account: NonEmptyStr,
    pub instrument: NonEmptyStr,
    pub quantity: Decimal,
}

/// A field-level change for replay/unwind bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct StateDelta {
    pub unit: String,
    pub field: String,
    pub old_value: DeltaValue,
    pub new_value: DeltaValue,
}

/// A debit/credit pair with `debit != credit` enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistinctAccountPair {
    pub debit: String,
    pub credit: String,
}

impl DistinctAccountPair {
    pub fn create(debit: impl Into<String>, credit: impl Into<String>) -> Result<Self, String> {
        let debit = debit.into();
        let credit = credit.into();
        if debit.is_empty() {
            return Err("DistinctAccountPair: debit must be non-empty".to_string());
        }
        if credit.is_empty() {
            return Err("DistinctAccountPair: credit must be non-empty".to_string());
        }
        if debit == credit {
            return Err(format!(
                "DistinctAccountPair: debit and credit must differ, both are '{debit}'"
            ));
        }
        Ok(Self { debit, credit })
    }
}

/// Atomic balance transfer — one leg of a `Transaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub source: String,
    pub destination: String,
    pub unit: String,
    pub quantity: PositiveDecimal,
    pub contract_id: String,
}

impl Move {
    pub fn create(
        source: impl Into<String>,
        destination: impl Into<String>,
        unit: impl Into<String>,
        quantity: PositiveDecimal,
        contract_id: impl Into<String>,
    ) -> Result<Self, String> {
        let source = source.into();
        let destination = destination.into();
        if source == destination {
            return Err(format!(
                "Move: source and destination must differ, both are '{source}'"
            ));
        }
        Ok(Self { source, destination, unit: unit.into(), quantity, contract_id: contract_id.into() })
    }
}

/// Atomic batch of moves. `moves` must be non-empty — a transaction with no
/// legs has nothing to conserve.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub tx_id: String,
    pub moves: Vec<Move>,
    pub timestamp: UtcDatetime,
    pub state_deltas: Vec<StateDelta>,
}

impl Transaction {
    pub fn create(
        tx_id: impl Into<String>,
        moves: Vec<Move>,
        timestamp: UtcDatetime,
        state_deltas: Vec<StateDelta>,
    ) -> Result<Self, String> {
        let tx_id = tx_id.into();
        if tx_id.is_empty() {
            return Err("Transaction.tx_id must be non-empty".to_string());
        }
        if moves.is_empty() {
            return Err("Transaction.moves must be non-empty".to_string());
        }
        Ok(Self { tx_id, moves, timestamp, state_deltas })
    }
}

/// Double-entry enforced by types: `debit != credit` by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub accounts: DistinctAccountPair,
    pub instrument: String,
    pub amount: PositiveDecimal,
    pub timestamp: UtcDatetime,
    pub attestation_id: Option<String>,
}

impl LedgerEntry {
    pub fn debit_account(&self) -> &str {
        &self.accounts.debit
    }

    pub fn credit_account(&self) -> &str {
        &self.accounts.credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn move_rejects_identical_source_and_destination() {
        let qty = PositiveDecimal::parse(dec!(1)).unwrap();
        assert!(Move::create("acct-1", "acct-1", "USD", qty, "").is_err());
    }

    #[test]
    fn transaction_rejects_empty_moves() {
        let err = Transaction::create("tx-1", vec![], UtcDatetime::now(), vec![]);
        assert!(err.is_err());
    }

    #[test]
    fn distinct_account_pair_rejects_equal_legs() {
        assert!(DistinctAccountPair::create("a", "a").is_err());
        assert!(DistinctAccountPair::create("a", "b").is_ok());
    }
}
