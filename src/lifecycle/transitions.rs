//! Per-asset-class transition tables, grounded on spec §4.6: closed edge
//! sets with no runtime mutation, checked by `check_transition`.

use crate::errors::IllegalTransition;
use super::state::PositionStatus;

/// Asset classes that each own a distinct set of allowed
/// `(PositionStatus, PositionStatus)` edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetClass {
    Equity,
    Derivative,
    Fx,
    Irs,
    Cds,
    Swaption,
}

use PositionStatus::{Cancelled, Closed, Formed, Proposed, Settled};

fn edges(class: AssetClass) -> &'static [(PositionStatus, PositionStatus)] {
    match class {
        AssetClass::Equity => &[
            (Proposed, Formed),
            (Formed, Settled),
            (Settled, Closed),
            (Proposed, Cancelled),
            (Formed, Cancelled),
        ],
        AssetClass::Derivative => &[
            (Proposed, Formed),
            (Formed, Settled),
            (Settled, Settled),
            (Settled, Closed),
            (Proposed, Cancelled),
            (Formed, Cancelled),
        ],
        AssetClass::Fx => &[
            (Proposed, Formed),
            (Formed, Settled),
            (Settled, Closed),
            (Proposed, Cancelled),
            (Formed, Cancelled),
        ],
        AssetClass::Irs => &[
            (Proposed, Formed),
            (Formed, Settled),
            (Settled, Settled),
            (Settled, Closed),
            (Proposed, Cancelled),
            (Formed, Cancelled),
        ],
        AssetClass::Cds => &[
            (Proposed, Formed),
            (Formed, Settled),
            (Settled, Settled),
            (Settled, Closed),
            (Proposed, Cancelled),
            (Formed, Cancelled),
        ],
        AssetClass::Swaption => &[
            (Proposed, Formed),
            (Formed, Settled),
            (Formed, Closed),
            (Settled, Closed),
            (Proposed, Cancelled),
            (Formed, Cancelled),
        ],
    }
}

/// Check that `(from, to)` is an allowed edge for `class`. Terminal states
/// (`Cancelled`, `Closed`) never appear as a `from` in any table, so a
/// transition attempted out of either fails here rather than by special case.
pub fn check_transition(
    from: PositionStatus,
    to: PositionStatus,
    class: AssetClass,
) -> Result<(), IllegalTransition> {
    if edges(class).contains(&(from, to)) {
        Ok(())
    } else {
        Err(IllegalTransition { from_state: from, to_state: to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equity_happy_path_is_allowed() {
        assert!(check_transition(Proposed, Formed, AssetClass::Equity).is_ok());
        assert!(check_transition(Formed, Settled, AssetClass::Equity).is_ok());
        assert!(check_transition(Settled, Closed, AssetClass::Equity).is_ok());
    }

    #[test]
    fn terminal_states_admit_no_outgoing_edge() {
        for class in [
            AssetClass::Equity,
            AssetClass::Derivative,
            AssetClass::Fx,
            AssetClass::Irs,
            AssetClass::Cds,
            AssetClass::Swaption,
        ] {
            for target in [Proposed, Formed, Settled, Cancelled, Closed] {
                assert!(check_transition(Cancelled, target, class).is_err());
                assert!(check_transition(Closed, target, class).is_err());
            }
        }
    }

    #[test]
    fn derivative_allows_repeated_settlement_for_margin_cycles() {
        assert!(check_transition(Settled, Settled, AssetClass::Derivative).is_ok());
    }

    #[test]
    fn skipping_formed_is_rejected() {
        assert!(check_transition(Proposed, Settled, AssetClass::Equity).is_err());
    }
}
