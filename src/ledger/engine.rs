//! The conservation-enforcing double-entry ledger engine, grounded on
//! `original_source/attestor/ledger/engine.py`.
//!
//! INV-L01 (conservation): for every unit `U`, `sigma(U) = sum_W
//! balance(W, U)` is unchanged by every `execute`. INV-L05 (atomicity):
//! on any failure, all balance changes revert. INV-L06 (chart of
//! accounts): every move's source and destination must be registered.
//! INV-X03 (idempotency): re-executing an already-applied `tx_id` is a
//! no-op that reports `AlreadyApplied`.

use std::collections::{BTreeMap, HashMap, HashSet};

use rust_decimal::Decimal;

use crate::errors::ConservationViolation;
use crate::types::NonEmptyStr;
#[cfg(test)]
use crate::types::UtcDatetime;

use super::transactions::{Account, ExecuteResult, Position, Transaction};

/// Holds mutable ledger state: accounts, balances, transaction log, and the
/// applied-id set. Not thread-safe by design — external coordination is
/// expected when sharing across threads.
#[derive(Debug, Default)]
pub struct LedgerEngine {
    accounts: HashMap<String, Account>,
    balances: HashMap<(String, String), Decimal>,
    transactions: Vec<Transaction>,
    applied_tx_ids: HashSet<String>,
}

impl LedgerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account in the chart of accounts (INV-L06).
    pub fn register_account(&mut self, account: Account) -> Result<(), String> {
        let id = account.account_id.value().to_string();
        if self.accounts.contains_key(&id) {
            return Err(format!("account already registered: {id}"));
        }
        self.accounts.insert(id, account);
        Ok(())
    }

    fn balance_mut(&mut self, key: (String, String)) -> &mut Decimal {
        self.balances.entry(key).or_insert(Decimal::ZERO)
    }

    /// Execute a transaction atomically. Re-executing an already-applied
    /// `tx_id` is a no-op returning `AlreadyApplied`; any conservation
    /// failure reverts every balance change made during this call.
    pub fn execute(&mut self, tx: Transaction) -> Result<ExecuteResult, ConservationViolation> {
        if self.applied_tx_ids.contains(&tx.tx_id) {
            return Ok(ExecuteResult::AlreadyApplied);
        }

        for mv in &tx.moves {
            if !self.accounts.contains_key(&mv.source) {
                return Err(ConservationViolation {
                    message: format!("source account not registered: {}", mv.source),
                    code: "UNREGISTERED_ACCOUNT".to_string(),
                    timestamp: tx.timestamp,
                    source_location: "ledger::engine::LedgerEngine::execute".to_string(),
                    law_name: "INV-L06".to_string(),
                    expected: "registered".to_string(),
                    actual: mv.source.clone(),
                });
            }
            if !self.accounts.contains_key(&mv.destination) {
                return Err(ConservationViolation {
                    message: format!("destination account not registered: {}", mv.destination),
                    code: "UNREGISTERED_ACCOUNT".to_string(),
                    timestamp: tx.timestamp,
                    source_location: "ledger::engine::LedgerEngine::execute".to_string(),
                    law_name: "INV-L06".to_string(),
                    expected: "registered".to_string(),
                    actual: mv.destination.clone(),
                });
            }
        }

        let affected_units: HashSet<&str> = tx.moves.iter().map(|m| m.unit.as_str()).collect();
        let pre_sigma: HashMap<&str, Decimal> =
            affected_units.iter().map(|&u| (u, self.total_supply(u))).collect();

        let mut old_balances: HashMap<(String, String), Decimal> = HashMap::new();
        for mv in &tx.moves {
            let src_key = (mv.source.clone(), mv.unit.clone());
            let dst_key = (mv.destination.clone(), mv.unit.clone());
            old_balances.entry(src_key.clone()).or_insert_with(|| {
                *self.balances.get(&src_key).unwrap_or(&Decimal::ZERO)
            });
            old_balances.entry(dst_key.clone()).or_insert_with(|| {
                *self.balances.get(&dst_key).unwrap_or(&Decimal::ZERO)
            });
            *self.balance_mut(src_key) -= mv.quantity.value();
            *self.balance_mut(dst_key) += mv.quantity.value();
        }

        for &unit in &affected_units {
            let post = self.total_supply(unit);
            let expected = pre_sigma[unit];
            if expected != post {
                for (key, value) in old_balances {
                    self.balances.insert(key, value);
                }
                return Err(ConservationViolation {
                    message: format!("conservation violated for unit {unit}"),
                    code: "CONSERVATION_VIOLATION".to_string(),
                    timestamp: tx.timestamp,
                    source_location: "ledger::engine::LedgerEngine::execute".to_string(),
                    law_name: "INV-L01".to_string(),
                    expected: expected.to_string(),
                    actual: post.to_string(),
                });
            }
        }

        self.applied_tx_ids.insert(tx.tx_id.clone());
        self.transactions.push(tx);
        Ok(ExecuteResult::Applied)
    }

    /// O(1) balance lookup.
    pub fn get_balance(&self, account_id: &str, instrument: &str) -> Decimal {
        self.balances
            .get(&(account_id.to_string(), instrument.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn get_position(&self, account_id: &str, instrument: &str) -> Position {
        Position {
            account: NonEmptyStr::parse(account_id).expect("account_id already validated"),
            instrument: NonEmptyStr::parse(instrument).expect("instrument already validated"),
            quantity: self.get_balance(account_id, instrument),
        }
    }

    /// Every non-zero position, sorted by `(account, instrument)`.
    pub fn positions(&self) -> Vec<Position> {
        let sorted: BTreeMap<&(String, String), &Decimal> = self.balances.iter().collect();
        sorted
            .into_iter()
            .filter(|(_, qty)| !qty.is_zero())
            .map(|((acct, inst), qty)| Position {
                account: NonEmptyStr::parse(acct).expect("account already validated"),
                instrument: NonEmptyStr::parse(inst).expect("instrument already validated"),
                quantity: *qty,
            })
            .collect()
    }

    /// `sigma(U)` — sum of all balances for `instrument` across all accounts.
    pub fn total_supply(&self, instrument: &str) -> Decimal {
        self.balances
            .iter()
            .filter(|((_, inst), _)| inst == instrument)
            .map(|(_, qty)| *qty)
            .sum()
    }

    /// Deep copy: independent balances/accounts/log/applied-id set, so
    /// post-clone mutation on either engine cannot alias the other.
    pub fn clone_engine(&self) -> Self {
        Self {
            accounts: self.accounts.clone(),
            balances: self.balances.clone(),
            transactions: self.transactions.clone(),
            applied_tx_ids: self.applied_tx_ids.clone(),
        }
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn replay(&self) -> &[Transaction] {
        &self.transactions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::transactions::{AccountType, Move};
    use crate::types::PositiveDecimal;
    use rust_decimal_macros::dec;

    fn account(id: &str, kind: AccountType) -> Account {
        Account { account_id: NonEmptyStr::parse(id).unwrap(), account_type: kind }
    }

    fn two_leg_tx(tx_id: &str, qty: Decimal) -> Transaction {
        Transaction::create(
            tx_id,
            vec![Move::create("buyer-cash", "seller-cash", "USD", PositiveDecimal::parse(qty).unwrap(), "").unwrap()],
            UtcDatetime::now(),
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn conservation_holds_across_execute() {
        let mut engine = LedgerEngine::new();
        engine.register_account(account("buyer-cash", AccountType::Cash)).unwrap();
        engine.register_account(account("seller-cash", AccountType::Cash)).unwrap();

        let before = engine.total_supply("USD");
        let result = engine.execute(two_leg_tx("tx-1", dec!(100))).unwrap();
        assert_eq!(result, ExecuteResult::Applied);
        assert_eq!(engine.total_supply("USD"), before);
        assert_eq!(engine.get_balance("buyer-cash", "USD"), dec!(-100));
        assert_eq!(engine.get_balance("seller-cash", "USD"), dec!(100));
    }

    #[test]
    fn re_executing_same_tx_id_is_idempotent() {
        let mut engine = LedgerEngine::new();
        engine.register_account(account("buyer-cash", AccountType::Cash)).unwrap();
        engine.register_account(account("seller-cash", AccountType::Cash)).unwrap();

        engine.execute(two_leg_tx("tx-1", dec!(100))).unwrap();
        let second = engine.execute(two_leg_tx("tx-1", dec!(100))).unwrap();
        assert_eq!(second, ExecuteResult::AlreadyApplied);
        assert_eq!(engine.get_balance("buyer-cash", "USD"), dec!(-100));
        assert_eq!(engine.transaction_count(), 1);
    }

    #[test]
    fn execute_rejects_unregistered_account() {
        let mut engine = LedgerEngine::new();
        engine.register_account(account("buyer-cash", AccountType::Cash)).unwrap();
        let result = engine.execute(two_leg_tx("tx-1", dec!(100)));
        assert!(result.is_err());
        assert_eq!(engine.total_supply("USD"), Decimal::ZERO);
    }

    #[test]
    fn clone_produces_independent_state() {
        let mut engine = LedgerEngine::new();
        engine.register_account(account("buyer-cash", AccountType::Cash)).unwrap();
        engine.register_account(account("seller-cash", AccountType::Cash)).unwrap();
        engine.execute(two_leg_tx("tx-1", dec!(100))).unwrap();

        let mut cloned = engine.clone_engine();
        cloned.execute(two_leg_tx("tx-2", dec!(50))).unwrap();

        assert_eq!(engine.transaction_count(), 1);
        assert_eq!(cloned.transaction_count(), 2);
        assert_eq!(engine.get_balance("buyer-cash", "USD"), dec!(-100));
        assert_eq!(cloned.get_balance("buyer-cash", "USD"), dec!(-150));
    }
}
