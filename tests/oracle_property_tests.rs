//! Property tests for SVI convexity and credit-curve survival-probability
//! bounds (quantified invariants 9-10 in spec.md §8).

use attestor::oracle::credit_curve::{bootstrap_credit_curve, CdsQuote};
use attestor::oracle::vol_surface::{svi_total_variance, svi_total_variance_second_derivative, SviParameters};
use attestor::types::UtcDatetime;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn svi_strategy() -> impl Strategy<Value = SviParameters> {
    (1i64..20i64, -90i64..90i64, 1i64..50i64).prop_filter_map("must satisfy SVI validity", |(b_hundredths, rho_hundredths, sigma_hundredths)| {
        let b = Decimal::new(b_hundredths, 2);
        let rho = Decimal::new(rho_hundredths, 2);
        let sigma = Decimal::new(sigma_hundredths, 2);
        let a = Decimal::new(5, 2);
        SviParameters::create(a, b, rho, Decimal::ZERO, sigma, Decimal::ONE).ok()
    })
}

proptest! {
    /// Invariant 9: for a valid SVI slice, `w(k) >= 0` and `w''(k) > 0`
    /// for every `k` in `[-3, 3]`.
    #[test]
    fn svi_variance_is_nonnegative_and_convex(params in svi_strategy(), k_tenths in -30i64..=30i64) {
        let k = Decimal::new(k_tenths, 1);
        let w = svi_total_variance(&params, k);
        prop_assert!(w >= Decimal::ZERO);
        let second = svi_total_variance_second_derivative(&params, k);
        prop_assert!(second > Decimal::ZERO);
    }

    /// Invariant 10: a bootstrapped credit curve's survival probability is
    /// in `(0, 1]` and non-increasing in `t`.
    #[test]
    fn credit_curve_survival_probability_is_bounded_and_monotone(
        spread_bp in 10i64..2000i64,
        recovery_pct in 0i64..80i64,
    ) {
        let spread = Decimal::new(spread_bp, 4);
        let recovery = Decimal::new(recovery_pct, 2);
        let quotes = vec![
            CdsQuote { tenor: Decimal::ONE, spread },
            CdsQuote { tenor: Decimal::new(3, 0), spread: spread + Decimal::new(50, 4) },
            CdsQuote { tenor: Decimal::new(5, 0), spread: spread + Decimal::new(100, 4) },
        ];
        let curve = bootstrap_credit_curve(&quotes, "ACME", UtcDatetime::now(), recovery, "disc-1", "model-1").unwrap();

        let mut prev = Decimal::ONE;
        for t_tenths in 1i64..=200i64 {
            let t = Decimal::new(t_tenths, 1);
            let q = curve.survival_probability(t);
            prop_assert!(q > Decimal::ZERO && q <= Decimal::ONE);
            prop_assert!(q <= prev);
            prev = q;
        }
    }
}
