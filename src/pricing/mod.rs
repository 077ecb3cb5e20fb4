//! External pricing/risk collaborators, stubbed per spec.md §1 Non-goals.

pub mod protocols;

pub use protocols::{PricingEngine, RiskEngine, StubPricingEngine};
