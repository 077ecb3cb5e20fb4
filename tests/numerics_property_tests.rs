//! Property tests for the decimal transcendental kernel's round-trip laws
//! (quantified invariants 7-8 in spec.md §8).

use attestor::numerics::decimal::{exp_d, ln_d};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn tolerance(x: Decimal) -> Decimal {
    x.abs().max(Decimal::ONE) * Decimal::new(1, 10)
}

proptest! {
    /// Invariant 7: `exp_d(ln_d(x)) ~= x` for x > 0.
    #[test]
    fn exp_ln_round_trips(mantissa in 1i64..1_000_000i64, scale in 0u32..4u32) {
        let x = Decimal::new(mantissa, scale);
        let y = ln_d(x).unwrap();
        let back = exp_d(y);
        prop_assert!((back - x).abs() <= tolerance(x));
    }

    /// Invariant 8: `ln_d(exp_d(x)) ~= x` for any x, exact at x = 0.
    #[test]
    fn ln_exp_round_trips(mantissa in -50_000i64..50_000i64, scale in 0u32..4u32) {
        let x = Decimal::new(mantissa, scale);
        let y = exp_d(x);
        let back = ln_d(y).unwrap();
        prop_assert!((back - x).abs() <= tolerance(x));
    }

    #[test]
    fn ln_exp_is_exact_at_zero(_unit in 0u8..1u8) {
        let back = ln_d(exp_d(Decimal::ZERO)).unwrap();
        prop_assert_eq!(back, Decimal::ZERO);
    }
}
