//! SVI slice calibration and volatility-surface evaluation, grounded on
//! `original_source/attestor/oracle/vol_surface.py`.

use rust_decimal::Decimal;

use crate::attestation::canonical::{CanonicalEncode, CanonicalMap};
use crate::errors::{DomainError, ValidationError};
use crate::numerics::decimal::sqrt_d;
use crate::types::{NonEmptyStr, UtcDatetime};

const SIGMA_GRID: [Decimal; 7] = [
    Decimal::from_parts(5, 0, 0, false, 2),
    Decimal::from_parts(10, 0, 0, false, 2),
    Decimal::from_parts(15, 0, 0, false, 2),
    Decimal::from_parts(20, 0, 0, false, 2),
    Decimal::from_parts(30, 0, 0, false, 2),
    Decimal::from_parts(40, 0, 0, false, 2),
    Decimal::from_parts(50, 0, 0, false, 2),
];
const M_OFFSETS: [Decimal; 11] = [
    Decimal::from_parts(50, 0, 0, true, 2),
    Decimal::from_parts(40, 0, 0, true, 2),
    Decimal::from_parts(30, 0, 0, true, 2),
    Decimal::from_parts(20, 0, 0, true, 2),
    Decimal::from_parts(10, 0, 0, true, 2),
    Decimal::from_parts(0, 0, 0, false, 2),
    Decimal::from_parts(10, 0, 0, false, 2),
    Decimal::from_parts(20, 0, 0, false, 2),
    Decimal::from_parts(30, 0, 0, false, 2),
    Decimal::from_parts(40, 0, 0, false, 2),
    Decimal::from_parts(50, 0, 0, false, 2),
];

/// Raw SVI parameters for one expiry slice, validated against C1-C5.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SviParameters {
    pub a: Decimal,
    pub b: Decimal,
    pub rho: Decimal,
    pub m: Decimal,
    pub sigma: Decimal,
    pub expiry: Decimal,
}

impl SviParameters {
    pub fn create(
        a: Decimal,
        b: Decimal,
        rho: Decimal,
        m: Decimal,
        sigma: Decimal,
        expiry: Decimal,
    ) -> Result<Self, ValidationError> {
        let source = "oracle::vol_surface::SviParameters::create";
        let ts = UtcDatetime::now();

        if b < Decimal::ZERO {
            return Err(ValidationError::single(format!("C2 violated: b ({b}) must be >= 0"), "SVI_C2", ts, source));
        }
        if rho.abs() >= Decimal::ONE {
            return Err(ValidationError::single(format!("C3 violated: |rho| ({rho}) must be < 1"), "SVI_C3", ts, source));
        }
        if sigma <= Decimal::ZERO {
            return Err(ValidationError::single(format!("C4 violated: sigma ({sigma}) must be > 0"), "SVI_C4", ts, source));
        }
        let one_minus_rho_sq = sqrt_d(Decimal::ONE - rho * rho).unwrap_or(Decimal::ZERO);
        if a + b * sigma * one_minus_rho_sq < Decimal::ZERO {
            return Err(ValidationError::single(
                "C1 violated: vertex is negative".to_string(),
                "SVI_C1",
                ts,
                source,
            ));
        }
        if b * (Decimal::ONE + rho.abs()) > Decimal::TWO {
            return Err(ValidationError::single(
                format!("C5 violated: b*(1+|rho|) ({}) must be <= 2", b * (Decimal::ONE + rho.abs())),
                "SVI_C5",
                ts,
                source,
            ));
        }
        if expiry <= Decimal::ZERO {
            return Err(ValidationError::single(format!("expiry ({expiry}) must be > 0"), "INVALID_EXPIRY", ts, source));
        }

        Ok(Self { a, b, rho, m, sigma, expiry })
    }
}

impl CanonicalEncode for SviParameters {
    fn encode_canonical(&self, e: &mut minicbor::Encoder<Vec<u8>>) -> Result<(), String> {
        CanonicalMap::new()
            .field("a", &self.a)
            .field("b", &self.b)
            .field("rho", &self.rho)
            .field("m", &self.m)
            .field("sigma", &self.sigma)
            .field("expiry", &self.expiry)
            .encode_canonical(e)
    }
}

/// `w(k) = a + b*(rho*(k-m) + sqrt((k-m)^2 + sigma^2))`.
pub fn svi_total_variance(p: &SviParameters, k: Decimal) -> Decimal {
    let u = k - p.m;
    let v = sqrt_d(u * u + p.sigma * p.sigma).expect("argument is a sum of squares, always non-negative");
    p.a + p.b * (p.rho * u + v)
}

/// `w'(k)`.
pub fn svi_total_variance_first_derivative(p: &SviParameters, k: Decimal) -> Decimal {
    let u = k - p.m;
    let v = sqrt_d(u * u + p.sigma * p.sigma).expect("argument is a sum of squares, always non-negative");
    p.b * (p.rho + u / v)
}

/// `w''(k)`.
pub fn svi_total_variance_second_derivative(p: &SviParameters, k: Decimal) -> Decimal {
    let u = k - p.m;
    let v = sqrt_d(u * u + p.sigma * p.sigma).expect("argument is a sum of squares, always non-negative");
    p.b * p.sigma * p.sigma / (v * v * v)
}

/// Implied volatility: `sqrt(w/T)` for the supplied total variance.
pub fn implied_vol_from_variance(w: Decimal, expiry: Decimal) -> Result<Decimal, DomainError> {
    if w < Decimal::ZERO || expiry <= Decimal::ZERO {
        return Err(DomainError::SqrtNegative);
    }
    sqrt_d(w / expiry)
}

/// An SVI smile slice at one expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct VolSurfaceSlice {
    pub expiry: Decimal,
    pub parameters: SviParameters,
}

/// The full term structure of SVI slices for one underlying.
#[derive(Debug, Clone, PartialEq)]
pub struct VolSurface {
    pub underlying: NonEmptyStr,
    pub as_of: UtcDatetime,
    pub expiries: Vec<Decimal>,
    pub slices: Vec<VolSurfaceSlice>,
}

impl VolSurface {
    pub fn create(
        underlying: &str,
        as_of: UtcDatetime,
        expiries: Vec<Decimal>,
        slices: Vec<VolSurfaceSlice>,
    ) -> Result<Self, ValidationError> {
        let source = "oracle::vol_surface::VolSurface::create";
        if expiries.len() != slices.len() {
            return Err(ValidationError::single(
                format!("expiries ({}) and slices ({}) must have equal length", expiries.len(), slices.len()),
                "LENGTH_MISMATCH",
                as_of,
                source,
            ));
        }
        if expiries.is_empty() {
            return Err(ValidationError::single("expiries must be non-empty", "EMPTY_SURFACE", as_of, source));
        }
        for window in expiries.windows(2) {
            if window[1] <= window[0] {
                return Err(ValidationError::single(
                    "expiries must be strictly ascending".to_string(),
                    "EXPIRIES_NOT_ASCENDING",
                    as_of,
                    source,
                ));
            }
        }
        if expiries[0] <= Decimal::ZERO {
            return Err(ValidationError::single("expiries must be positive".to_string(), "EXPIRIES_NOT_ASCENDING", as_of, source));
        }
        for (expiry, slice) in expiries.iter().zip(&slices) {
            if *expiry != slice.expiry {
                return Err(ValidationError::single(
                    format!("slice expiry ({}) does not match surface expiry ({expiry})", slice.expiry),
                    "EXPIRY_MISMATCH",
                    as_of,
                    source,
                ));
            }
        }

        Ok(Self {
            underlying: NonEmptyStr::parse(underlying)
                .map_err(|e| ValidationError::single(format!("underlying: {e}"), "INVALID_FIELD", as_of, source))?,
            as_of,
            expiries,
            slices,
        })
    }

    /// Total variance at `(k, T)`: exact slice if `T` matches, nearest
    /// slice if `T` is outside the expiry range, linear interpolation in
    /// `T` between bracketing slices otherwise.
    pub fn total_variance(&self, k: Decimal, t: Decimal) -> Decimal {
        if let Some(slice) = self.slices.iter().find(|s| s.expiry == t) {
            return svi_total_variance(&slice.parameters, k);
        }
        if t <= self.expiries[0] {
            return svi_total_variance(&self.slices[0].parameters, k);
        }
        if t >= *self.expiries.last().unwrap() {
            return svi_total_variance(&self.slices.last().unwrap().parameters, k);
        }
        for i in 0..self.expiries.len() - 1 {
            if t > self.expiries[i] && t < self.expiries[i + 1] {
                let w0 = svi_total_variance(&self.slices[i].parameters, k);
                let w1 = svi_total_variance(&self.slices[i + 1].parameters, k);
                let weight = (t - self.expiries[i]) / (self.expiries[i + 1] - self.expiries[i]);
                return w0 + weight * (w1 - w0);
            }
        }
        unreachable!("t is covered by one of the branches above")
    }

    pub fn implied_vol(&self, k: Decimal, t: Decimal) -> Result<Decimal, DomainError> {
        implied_vol_from_variance(self.total_variance(k, t), t)
    }
}

/// One `(log-moneyness, total-variance)` market quote at a single expiry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceQuote {
    pub k: Decimal,
    pub w: Decimal,
}

/// Solve the 3x3 normal-equations system by Cramer's rule; `None` if the
/// system is singular.
fn solve_normal_equations(m: [[Decimal; 3]; 3], rhs: [Decimal; 3]) -> Option<[Decimal; 3]> {
    let det = det3(m);
    if det.is_zero() {
        return None;
    }
    let mut solution = [Decimal::ZERO; 3];
    for col in 0..3 {
        let mut replaced = m;
        for row in 0..3 {
            replaced[row][col] = rhs[row];
        }
        solution[col] = det3(replaced) / det;
    }
    Some(solution)
}

fn det3(m: [[Decimal; 3]; 3]) -> Decimal {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Least-squares fit of `w = alpha + beta*u + gamma*v` via the normal
/// equations, for fixed `(m, sigma)`.
fn fit_linear_svi(quotes: &[VarianceQuote], m: Decimal, sigma: Decimal) -> Option<(Decimal, Decimal, Decimal)> {
    let rows: Vec<(Decimal, Decimal, Decimal)> = quotes
        .iter()
        .map(|q| {
            let u = q.k - m;
            let v = sqrt_d(u * u + sigma * sigma).unwrap_or(Decimal::ZERO);
            (u, v, q.w)
        })
        .collect();

    let n = Decimal::from(rows.len() as i64);
    let sum_u: Decimal = rows.iter().map(|(u, _, _)| *u).sum();
    let sum_v: Decimal = rows.iter().map(|(_, v, _)| *v).sum();
    let sum_uu: Decimal = rows.iter().map(|(u, _, _)| *u * *u).sum();
    let sum_uv: Decimal = rows.iter().map(|(u, v, _)| *u * *v).sum();
    let sum_vv: Decimal = rows.iter().map(|(_, v, _)| *v * *v).sum();
    let sum_w: Decimal = rows.iter().map(|(_, _, w)| *w).sum();
    let sum_uw: Decimal = rows.iter().map(|(u, _, w)| *u * *w).sum();
    let sum_vw: Decimal = rows.iter().map(|(_, v, w)| *v * *w).sum();

    let normal_matrix = [[n, sum_u, sum_v], [sum_u, sum_uu, sum_uv], [sum_v, sum_uv, sum_vv]];
    let rhs = [sum_w, sum_uw, sum_vw];
    let [alpha, beta, gamma] = solve_normal_equations(normal_matrix, rhs)?;
    Some((alpha, beta, gamma))
}

/// Calibrate one SVI slice by grid search over `(m, sigma)`, minimizing SSE
/// subject to `gamma > 0` and `|beta/gamma| < 1`, then recovering
/// `a=alpha, b=gamma, rho=beta/gamma` and validating via C1-C5.
pub fn calibrate_svi_slice(quotes: &[VarianceQuote], expiry: Decimal) -> Result<SviParameters, ValidationError> {
    let source = "oracle::vol_surface::calibrate_svi_slice";
    let ts = UtcDatetime::now();
    if quotes.len() < 3 {
        return Err(ValidationError::single("SVI calibration requires at least 3 quotes", "INSUFFICIENT_QUOTES", ts, source));
    }

    let k_min = quotes.iter().map(|q| q.k).fold(quotes[0].k, |a, b| a.min(b));
    let k_max = quotes.iter().map(|q| q.k).fold(quotes[0].k, |a, b| a.max(b));
    let k_mid = (k_min + k_max) / Decimal::TWO;
    let k_range = k_max - k_min;

    let mut best: Option<(Decimal, SviParameters)> = None;
    for &sigma in &SIGMA_GRID {
        for &offset in &M_OFFSETS {
            let m = k_mid + k_range * offset;
            let Some((alpha, beta, gamma)) = fit_linear_svi(quotes, m, sigma) else { continue };
            if gamma <= Decimal::ZERO {
                continue;
            }
            if (beta / gamma).abs() >= Decimal::ONE {
                continue;
            }
            let a = alpha;
            let b = gamma;
            let rho = beta / gamma;
            let Ok(params) = SviParameters::create(a, b, rho, m, sigma, expiry) else { continue };

            let sse: Decimal = quotes
                .iter()
                .map(|q| {
                    let fitted = svi_total_variance(&params, q.k);
                    (fitted - q.w) * (fitted - q.w)
                })
                .sum();

            if best.as_ref().map(|(best_sse, _)| sse < *best_sse).unwrap_or(true) {
                best = Some((sse, params));
            }
        }
    }

    best.map(|(_, params)| params).ok_or_else(|| {
        ValidationError::single("no grid point produced a valid SVI slice satisfying C1-C5", "CALIBRATION_FAILED", ts, source)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_params() -> SviParameters {
        SviParameters::create(dec!(0.04), dec!(0.4), dec!(-0.4), Decimal::ZERO, dec!(0.2), Decimal::ONE).unwrap()
    }

    #[test]
    fn create_rejects_roger_lee_violation() {
        let result = SviParameters::create(dec!(0.04), dec!(2), dec!(0.9), Decimal::ZERO, dec!(0.2), Decimal::ONE);
        assert!(result.is_err());
    }

    #[test]
    fn atm_total_variance_matches_closed_form() {
        let params = sample_params();
        let w_atm = svi_total_variance(&params, Decimal::ZERO);
        assert_eq!(w_atm, dec!(0.04) + dec!(0.4) * dec!(0.2));
    }

    #[test]
    fn implied_vol_matches_expected() {
        let params = sample_params();
        let surface = VolSurface::create("TEST", UtcDatetime::now(), vec![Decimal::ONE], vec![
            VolSurfaceSlice { expiry: Decimal::ONE, parameters: params },
        ])
        .unwrap();
        let vol = surface.implied_vol(Decimal::ZERO, Decimal::ONE).unwrap();
        let expected = sqrt_d(dec!(0.12)).unwrap();
        assert!((vol - expected).abs() < dec!(1e-20));
    }

    #[test]
    fn second_derivative_is_positive_for_positive_b_and_sigma() {
        let params = sample_params();
        for k_hundredths in -300..=300 {
            let k = Decimal::from(k_hundredths) / dec!(100);
            assert!(svi_total_variance_second_derivative(&params, k) > Decimal::ZERO);
            assert!(svi_total_variance(&params, k) >= Decimal::ZERO);
        }
    }

    #[test]
    fn calibrate_recovers_a_valid_slice() {
        let params = sample_params();
        let quotes: Vec<VarianceQuote> = (-10..=10)
            .map(|i| {
                let k = Decimal::from(i) / dec!(5);
                VarianceQuote { k, w: svi_total_variance(&params, k) }
            })
            .collect();
        let calibrated = calibrate_svi_slice(&quotes, Decimal::ONE).unwrap();
        assert!((calibrated.a - params.a).abs() < dec!(0.05));
    }
}
