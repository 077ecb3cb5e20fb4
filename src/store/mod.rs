//! External persistence interfaces: attestation storage, the transaction
//! log, an event bus, and ad hoc state snapshots. Each has an in-memory
//! reference implementation for tests and a `sled`-backed durable one.

pub mod attestation_store;
pub mod event_bus;
pub mod state_store;
pub mod transaction_log;

pub use attestation_store::{AttestationStore, InMemoryAttestationStore, SledAttestationStore};
pub use event_bus::{EventBus, InMemoryEventBus, SledEventBus};
pub use state_store::{InMemoryStateStore, SledStateStore, StateStore};
pub use transaction_log::{InMemoryTransactionLog, SledTransactionLog, TransactionLog};
