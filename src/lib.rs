//! Attestor: a conservation-enforcing post-trade processing core.
//!
//! The numeric kernel (`numerics`) and refined scalar types (`types`) sit at
//! the bottom. `attestation` builds content-addressed, confidence-tagged
//! values on top of them. `instrument` and `lifecycle` describe what is being
//! traded and the states it can occupy. `ledger` is the double-entry engine
//! every settlement, margin, and credit-event flow posts through. `oracle`
//! calibrates yield curves, vol surfaces, and credit curves, and gates them
//! for arbitrage before anything downstream may depend on them. `gateway`
//! turns untrusted wire input into a validated `CanonicalOrder`. `store` and
//! `pricing` are the external-collaborator seams: persistence and the
//! pricing/VaR engine, both modeled as traits with an in-memory test double.
//! `reporting` is a thin, pure projection layer over validated orders.

pub mod attestation;
pub mod errors;
pub mod gateway;
pub mod instrument;
pub mod ledger;
pub mod lifecycle;
pub mod numerics;
pub mod oracle;
pub mod pricing;
pub mod reporting;
pub mod store;
pub mod types;

pub use errors::{
    ConservationViolation, DomainError, FieldViolation, IllegalTransition, PersistenceError, PricingError,
    ValidationError,
};
