//! Error kinds surfaced by the core. Every fallible public entry point
//! returns `Result<T, E>` with one of these, never an exception-style panic,
//! except for the fatal/fail-stop cases documented at each call site.

use crate::types::datetime::UtcDatetime;

/// A single field-level violation collected by a smart constructor or
/// transaction builder before returning a combined [`ValidationError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub path: String,
    pub constraint: String,
    pub actual_value: String,
}

impl FieldViolation {
    pub fn new(
        path: impl Into<String>,
        constraint: impl Into<String>,
        actual_value: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            constraint: constraint.into(),
            actual_value: actual_value.into(),
        }
    }
}

/// Aggregated validation failure. Smart constructors and `CanonicalOrder::create`
/// collect every violation before returning, rather than failing on the first.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {message} ({} violation(s))", fields.len())]
pub struct ValidationError {
    pub message: String,
    pub code: String,
    pub timestamp: UtcDatetime,
    pub source_location: String,
    pub fields: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn single(
        message: impl Into<String>,
        code: impl Into<String>,
        timestamp: UtcDatetime,
        source: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            timestamp,
            source_location: source.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_fields(
        message: impl Into<String>,
        code: impl Into<String>,
        timestamp: UtcDatetime,
        source: impl Into<String>,
        fields: Vec<FieldViolation>,
    ) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            timestamp,
            source_location: source.into(),
            fields,
        }
    }
}

/// INV-L01 (conservation), INV-L05 (atomicity), INV-L06 (chart of accounts)
/// violations raised by the ledger engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("conservation violation [{law_name}] at {source_location}: expected {expected}, got {actual}")]
pub struct ConservationViolation {
    pub message: String,
    pub code: String,
    pub timestamp: UtcDatetime,
    pub source_location: String,
    pub law_name: String,
    pub expected: String,
    pub actual: String,
}

/// A disallowed `(from, to)` transition attempted against a lifecycle's
/// transition table.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("illegal transition: {from_state:?} -> {to_state:?}")]
pub struct IllegalTransition {
    pub from_state: crate::lifecycle::state::PositionStatus,
    pub to_state: crate::lifecycle::state::PositionStatus,
}

/// Error from a provisional pricing/risk engine (external collaborator,
/// stubbed per spec.md §1 Non-goals).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("pricing error [{code}]: {message}")]
pub struct PricingError {
    pub message: String,
    pub code: String,
}

/// Error surfaced by an external store (attestation store, transaction log,
/// event bus, state store).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("persistence error [{code}]: {message}")]
pub struct PersistenceError {
    pub message: String,
    pub code: String,
}

impl PersistenceError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Catch-all for numeric-kernel preconditions (e.g. `ln_d` of a non-positive
/// value, `sqrt_d` of a negative value). These indicate a caller error, not
/// a user-input validation failure, so they carry no field path.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    #[error("ln_d requires x > 0")]
    LnNonPositive,
    #[error("sqrt_d requires x >= 0")]
    SqrtNegative,
    #[error("division by zero")]
    DivisionByZero,
    #[error("decimal overflow")]
    Overflow,
}
