//! Property tests for the Money arithmetic round-trip law in spec.md §8:
//! `(a+b)+c == a+(b+c)`, `a+(-a) == 0`, `k*(a+b) == k*a + k*b`.

use attestor::types::Money;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000i64, 0u32..4u32).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

proptest! {
    #[test]
    fn addition_is_associative(a in amount_strategy(), b in amount_strategy(), c in amount_strategy()) {
        let ma = Money::create(a, "USD").unwrap();
        let mb = Money::create(b, "USD").unwrap();
        let mc = Money::create(c, "USD").unwrap();

        let left = ma.add(&mb).unwrap().add(&mc).unwrap();
        let right = ma.add(&mb.add(&mc).unwrap()).unwrap();
        prop_assert_eq!(left.amount(), right.amount());
    }

    #[test]
    fn adding_the_negation_yields_zero(a in amount_strategy()) {
        let ma = Money::create(a, "USD").unwrap();
        let neg = ma.negate();
        let sum = ma.add(&neg).unwrap();
        prop_assert_eq!(sum.amount(), Decimal::ZERO);
    }

    #[test]
    fn scalar_multiplication_distributes_over_addition(
        a in amount_strategy(), b in amount_strategy(), k_mantissa in -1000i64..1000i64,
    ) {
        let k = Decimal::new(k_mantissa, 2);
        let ma = Money::create(a, "USD").unwrap();
        let mb = Money::create(b, "USD").unwrap();

        let left = ma.add(&mb).unwrap().mul(k);
        let right = ma.mul(k).add(&mb.mul(k)).unwrap();
        prop_assert_eq!(left.amount(), right.amount());
    }
}
