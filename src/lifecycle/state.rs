//! Position lifecycle states, grounded on spec §3 "Lifecycle state" and
//! the Python original's implicit state model (no direct
//! `original_source` file owns this enum; it is threaded through
//! `instrument/lifecycle.py` references in `_INDEX.md`).

/// The lifecycle status of a position. `Cancelled` and `Closed` are terminal
/// — no transition table names an edge leaving either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionStatus {
    Proposed,
    Formed,
    Settled,
    Cancelled,
    Closed,
}

impl PositionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, PositionStatus::Cancelled | PositionStatus::Closed)
    }
}

impl std::fmt::Display for PositionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PositionStatus::Proposed => "PROPOSED",
            PositionStatus::Formed => "FORMED",
            PositionStatus::Settled => "SETTLED",
            PositionStatus::Cancelled => "CANCELLED",
            PositionStatus::Closed => "CLOSED",
        };
        write!(f, "{label}")
    }
}
