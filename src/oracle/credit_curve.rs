//! CDS credit-curve bootstrap and survival-probability interpolation,
//! grounded on `original_source/attestor/oracle/credit_curve.py`.

use rust_decimal::Decimal;

use crate::attestation::canonical::{CanonicalEncode, CanonicalMap};
use crate::errors::ValidationError;
use crate::numerics::decimal::{exp_d, ln_d};
use crate::types::{NonEmptyStr, UtcDatetime};

/// A single-name CDS spread quote at one tenor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CdsQuote {
    pub tenor: Decimal,
    pub spread: Decimal,
}

/// A bootstrapped single-name survival curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditCurve {
    pub reference_entity: NonEmptyStr,
    pub as_of: UtcDatetime,
    pub tenors: Vec<Decimal>,
    pub survival_probs: Vec<Decimal>,
    pub hazard_rates: Vec<Decimal>,
    pub recovery_rate: Decimal,
    pub discount_curve_ref: NonEmptyStr,
    pub model_config_ref: NonEmptyStr,
}

impl CreditCurve {
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        reference_entity: &str,
        as_of: UtcDatetime,
        tenors: Vec<Decimal>,
        survival_probs: Vec<Decimal>,
        hazard_rates: Vec<Decimal>,
        recovery_rate: Decimal,
        discount_curve_ref: &str,
        model_config_ref: &str,
    ) -> Result<Self, ValidationError> {
        let source = "oracle::credit_curve::CreditCurve::create";
        if tenors.len() != survival_probs.len() || tenors.len() != hazard_rates.len() {
            return Err(ValidationError::single(
                "tenors, survival_probs, hazard_rates must have equal length".to_string(),
                "LENGTH_MISMATCH",
                as_of,
                source,
            ));
        }
        if tenors.is_empty() {
            return Err(ValidationError::single("tenors must be non-empty", "EMPTY_CURVE", as_of, source));
        }
        if tenors[0] <= Decimal::ZERO {
            return Err(ValidationError::single("tenors must be positive", "TENORS_NOT_ASCENDING", as_of, source));
        }
        for window in tenors.windows(2) {
            if window[1] <= window[0] {
                return Err(ValidationError::single("tenors must be strictly ascending", "TENORS_NOT_ASCENDING", as_of, source));
            }
        }
        if survival_probs.iter().any(|&q| q <= Decimal::ZERO || q > Decimal::ONE) {
            return Err(ValidationError::single(
                format!("survival probabilities must be in (0,1], got {survival_probs:?}"),
                "SURVIVAL_OUT_OF_RANGE",
                as_of,
                source,
            ));
        }
        for window in survival_probs.windows(2) {
            if window[1] > window[0] {
                return Err(ValidationError::single(
                    "survival probabilities must be monotone non-increasing".to_string(),
                    "SURVIVAL_NOT_MONOTONE",
                    as_of,
                    source,
                ));
            }
        }
        if hazard_rates.iter().any(|&h| h < Decimal::ZERO) {
            return Err(ValidationError::single("hazard rates must be >= 0".to_string(), "NEGATIVE_HAZARD", as_of, source));
        }
        if recovery_rate < Decimal::ZERO || recovery_rate >= Decimal::ONE {
            return Err(ValidationError::single(
                format!("recovery_rate must be in [0,1), got {recovery_rate}"),
                "INVALID_RECOVERY_RATE",
                as_of,
                source,
            ));
        }

        Ok(Self {
            reference_entity: NonEmptyStr::parse(reference_entity)
                .map_err(|e| ValidationError::single(format!("reference_entity: {e}"), "INVALID_FIELD", as_of, source))?,
            as_of,
            tenors,
            survival_probs,
            hazard_rates,
            recovery_rate,
            discount_curve_ref: NonEmptyStr::parse(discount_curve_ref)
                .map_err(|e| ValidationError::single(format!("discount_curve_ref: {e}"), "INVALID_FIELD", as_of, source))?,
            model_config_ref: NonEmptyStr::parse(model_config_ref)
                .map_err(|e| ValidationError::single(format!("model_config_ref: {e}"), "INVALID_FIELD", as_of, source))?,
        })
    }

    /// `Q(t)`: piecewise exponential interpolation using the hazard of the
    /// bracketing interval; flat hazard extrapolation beyond the last tenor.
    pub fn survival_probability(&self, t: Decimal) -> Decimal {
        if t <= Decimal::ZERO {
            return Decimal::ONE;
        }
        if t >= *self.tenors.last().unwrap() {
            let last_idx = self.tenors.len() - 1;
            let excess = t - self.tenors[last_idx];
            return self.survival_probs[last_idx] * exp_d(-self.hazard_rates[last_idx] * excess);
        }
        let mut prev_t = Decimal::ZERO;
        let mut prev_q = Decimal::ONE;
        for i in 0..self.tenors.len() {
            if t <= self.tenors[i] {
                let elapsed = t - prev_t;
                return prev_q * exp_d(-self.hazard_rates[i] * elapsed);
            }
            prev_t = self.tenors[i];
            prev_q = self.survival_probs[i];
        }
        unreachable!("t < last tenor is handled by the loop above")
    }

    /// The piecewise-constant hazard applicable to the interval containing
    /// `t`.
    pub fn hazard_rate(&self, t: Decimal) -> Decimal {
        for i in 0..self.tenors.len() {
            if t <= self.tenors[i] {
                return self.hazard_rates[i];
            }
        }
        *self.hazard_rates.last().unwrap()
    }
}

impl CanonicalEncode for CreditCurve {
    fn encode_canonical(&self, e: &mut minicbor::Encoder<Vec<u8>>) -> Result<(), String> {
        let reference_entity = self.reference_entity.value().to_string();
        let discount_curve_ref = self.discount_curve_ref.value().to_string();
        let model_config_ref = self.model_config_ref.value().to_string();
        CanonicalMap::new()
            .field("reference_entity", &reference_entity)
            .field("as_of", &self.as_of)
            .field("tenors", &self.tenors)
            .field("survival_probs", &self.survival_probs)
            .field("hazard_rates", &self.hazard_rates)
            .field("recovery_rate", &self.recovery_rate)
            .field("discount_curve_ref", &discount_curve_ref)
            .field("model_config_ref", &model_config_ref)
            .encode_canonical(e)
    }
}

/// Bootstrap a credit curve from CDS spread quotes: `Q(T_j) = 1 / (1 +
/// s_j*T_j/(1-R))`, hazards piecewise constant between bootstrapped
/// survival points.
pub fn bootstrap_credit_curve(
    quotes: &[CdsQuote],
    reference_entity: &str,
    as_of: UtcDatetime,
    recovery_rate: Decimal,
    discount_curve_ref: &str,
    model_config_ref: &str,
) -> Result<CreditCurve, ValidationError> {
    let source = "oracle::credit_curve::bootstrap_credit_curve";
    if quotes.is_empty() {
        return Err(ValidationError::single("bootstrap_credit_curve requires at least one quote", "EMPTY_QUOTES", as_of, source));
    }

    let mut sorted: Vec<CdsQuote> = quotes.to_vec();
    sorted.sort_by(|a, b| a.tenor.cmp(&b.tenor));

    let one_minus_r = Decimal::ONE - recovery_rate;
    let mut tenors = Vec::with_capacity(sorted.len());
    let mut survival_probs = Vec::with_capacity(sorted.len());
    let mut hazard_rates = Vec::with_capacity(sorted.len());

    let mut prev_t = Decimal::ZERO;
    let mut prev_q = Decimal::ONE;
    for quote in &sorted {
        let q = Decimal::ONE / (Decimal::ONE + quote.spread * quote.tenor / one_minus_r);
        let ln_ratio = ln_d(q / prev_q)
            .map_err(|e| ValidationError::single(e.to_string(), "DOMAIN_ERROR", as_of, source))?;
        let hazard = -ln_ratio / (quote.tenor - prev_t);

        tenors.push(quote.tenor);
        survival_probs.push(q);
        hazard_rates.push(hazard);

        prev_t = quote.tenor;
        prev_q = q;
    }

    CreditCurve::create(reference_entity, as_of, tenors, survival_probs, hazard_rates, recovery_rate, discount_curve_ref, model_config_ref)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn survival_probability_at_zero_is_one() {
        let curve = bootstrap_credit_curve(
            &[CdsQuote { tenor: dec!(5), spread: dec!(0.01) }],
            "ACME", UtcDatetime::now(), dec!(0.4), "disc-1", "cfg-1",
        )
        .unwrap();
        assert_eq!(curve.survival_probability(Decimal::ZERO), Decimal::ONE);
    }

    #[test]
    fn survival_probability_is_monotone_non_increasing() {
        let curve = bootstrap_credit_curve(
            &[
                CdsQuote { tenor: dec!(1), spread: dec!(0.01) },
                CdsQuote { tenor: dec!(5), spread: dec!(0.02) },
                CdsQuote { tenor: dec!(10), spread: dec!(0.03) },
            ],
            "ACME", UtcDatetime::now(), dec!(0.4), "disc-1", "cfg-1",
        )
        .unwrap();
        let mut prev = Decimal::ONE;
        for i in 0..200 {
            let t = Decimal::from(i) / dec!(10);
            let q = curve.survival_probability(t);
            assert!(q <= prev, "Q not monotone at t={t}: {q} > {prev}");
            assert!(q > Decimal::ZERO && q <= Decimal::ONE);
            prev = q;
        }
    }

    #[test]
    fn create_rejects_non_monotone_survival() {
        let result = CreditCurve::create(
            "ACME", UtcDatetime::now(),
            vec![dec!(1), dec!(2)], vec![dec!(0.9), dec!(0.95)], vec![dec!(0.05), dec!(0.05)],
            dec!(0.4), "disc-1", "cfg-1",
        );
        assert!(result.is_err());
    }
}
