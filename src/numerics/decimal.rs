//! Pure-Decimal transcendental functions, grounded on
//! `original_source/attestor/core/decimal_math.py`.
//!
//! `rust_decimal::Decimal` natively carries at most 28-29 significant
//! digits (a 96-bit mantissa plus a scale byte), so unlike the Python
//! source's `decimal.Context(prec=38)` there is no wider scratch context to
//! borrow for guard digits: every intermediate step here already runs at the
//! crate's native ceiling. `OUTPUT_PRECISION_DP` bounds the scale we quantize
//! a final result to (28 places after the point is the closest analogue
//! available; see DESIGN.md for the precision-ceiling note). Series loops
//! are bounded to `MAX_SERIES_ITERATIONS` and terminate early once the next
//! term's magnitude drops under `CONVERGENCE_THRESHOLD`.

use crate::errors::DomainError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::MathematicalOps;
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::LazyLock;

pub const OUTPUT_PRECISION_DP: u32 = 28;
const MAX_SERIES_ITERATIONS: u32 = 200;

/// `10^-28`, used as the Taylor-series convergence floor. Comfortably below
/// the smallest increment `Decimal` can represent at `OUTPUT_PRECISION_DP`,
/// so series loops terminate on convergence rather than on the iteration cap.
static CONVERGENCE_THRESHOLD: LazyLock<Decimal> =
    LazyLock::new(|| Decimal::new(1, OUTPUT_PRECISION_DP));

/// `ln(2)`, computed once via the `atanh` series below and reused by
/// `exp_d`/`ln_d`'s range reduction.
static LN2: LazyLock<Decimal> = LazyLock::new(|| atanh_series(Decimal::ONE / Decimal::from(3)) * Decimal::TWO);

/// Round a Decimal to the context's output precision using banker's
/// rounding (ROUND_HALF_EVEN), mirroring `_to_output` in the Python source.
pub fn quantize_to_context(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(OUTPUT_PRECISION_DP, RoundingStrategy::MidpointNearestEven)
}

fn atanh_series(x: Decimal) -> Decimal {
    let x_sq = x * x;
    let mut term = x;
    let mut total = x;
    for k in 1..300u32 {
        term *= x_sq;
        let contrib = term / Decimal::from(2 * k + 1);
        total += contrib;
        if contrib.abs() < *CONVERGENCE_THRESHOLD {
            break;
        }
    }
    total
}

/// `exp(x)` via range reduction `x = k*ln2 + r` (`|r| <= ln2/2`) followed by
/// a Taylor series for `exp(r)` and an exact `2^k` rescale.
pub fn exp_d(x: Decimal) -> Decimal {
    if x.is_zero() {
        return Decimal::ONE;
    }

    let ln2 = *LN2;
    let k_exact = x / ln2;
    let k: i64 = k_exact.round().to_i64().unwrap_or(0);
    let r = x - Decimal::from(k) * ln2;

    let mut exp_r = Decimal::ONE;
    let mut term = Decimal::ONE;
    for n in 1..MAX_SERIES_ITERATIONS {
        term = term * r / Decimal::from(n);
        exp_r += term;
        if term.abs() < *CONVERGENCE_THRESHOLD {
            break;
        }
    }

    let result = if k >= 0 {
        exp_r * pow2(k as u64)
    } else {
        exp_r / pow2((-k) as u64)
    };
    quantize_to_context(result)
}

fn pow2(k: u64) -> Decimal {
    let mut result = Decimal::ONE;
    let two = Decimal::TWO;
    for _ in 0..k {
        result *= two;
    }
    result
}

/// `ln(x)` via range reduction into `[0.5, 2)` followed by the `atanh`
/// series `ln(m) = 2*atanh((m-1)/(m+1))`. Rejects `x <= 0`.
pub fn ln_d(x: Decimal) -> Result<Decimal, DomainError> {
    if x <= Decimal::ZERO {
        return Err(DomainError::LnNonPositive);
    }
    if x == Decimal::ONE {
        return Ok(Decimal::ZERO);
    }

    let two = Decimal::TWO;
    let half = Decimal::new(5, 1);
    let mut val = x;
    let mut e: i64 = 0;
    while val >= two {
        val /= two;
        e += 1;
    }
    while val < half {
        val *= two;
        e -= 1;
    }

    let u = (val - Decimal::ONE) / (val + Decimal::ONE);
    let ln_val = atanh_series(u) * two;
    let result = ln_val + Decimal::from(e) * *LN2;
    Ok(quantize_to_context(result))
}

/// `sqrt(x)`, delegating to `rust_decimal`'s arbitrary-precision square
/// root. Rejects negative input.
pub fn sqrt_d(x: Decimal) -> Result<Decimal, DomainError> {
    if x < Decimal::ZERO {
        return Err(DomainError::SqrtNegative);
    }
    x.sqrt().map(quantize_to_context).ok_or(DomainError::Overflow)
}

/// `1 - exp(-x)` without subtractive cancellation for small `|x|`.
pub fn expm1_neg_d(x: Decimal) -> Decimal {
    if x.is_zero() {
        return Decimal::ZERO;
    }

    let neg_x = -x;
    if x.abs() < Decimal::ONE {
        // 1 - exp(-x) = sum_{n=1}^inf (-1)^{n+1} x^n / n!
        let mut total = Decimal::ZERO;
        let mut term = Decimal::ONE;
        for n in 1..MAX_SERIES_ITERATIONS {
            term = term * neg_x / Decimal::from(n);
            total -= term;
            if term.abs() < *CONVERGENCE_THRESHOLD {
                break;
            }
        }
        return quantize_to_context(total);
    }

    let mut exp_neg_x = Decimal::ONE;
    let mut term = Decimal::ONE;
    for n in 1..MAX_SERIES_ITERATIONS {
        term = term * neg_x / Decimal::from(n);
        exp_neg_x += term;
        if term.abs() < *CONVERGENCE_THRESHOLD {
            break;
        }
    }
    quantize_to_context(Decimal::ONE - exp_neg_x)
}
