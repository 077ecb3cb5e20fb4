//! The wire boundary: parses raw order messages into `CanonicalOrder`, the
//! single normalised trade representation every downstream pillar consumes.

pub mod parser;
pub mod types;

pub use parser::parse_order;
pub use types::{CanonicalOrder, Lei, Isin, OrderSide, OrderType};
