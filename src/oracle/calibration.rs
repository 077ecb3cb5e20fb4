//! Yield-curve bootstrap, discounting, and the calibration-failure
//! fallback, grounded on `original_source/attestor/oracle/calibration.py`.

use rust_decimal::Decimal;

use crate::attestation::{
    canonical::{CanonicalEncode, CanonicalMap},
    create_attestation, Attestation, Confidence, DerivedConfidence,
};
use crate::errors::ValidationError;
use crate::numerics::decimal::{exp_d, ln_d};
use crate::types::{FrozenMap, NonEmptyStr, UtcDatetime};

/// Which curve-building family produced an attestation; carried in
/// `fit_quality`/`config_ref` so downstream consumers can audit provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub model_name: NonEmptyStr,
    pub config_ref: NonEmptyStr,
    pub parameters: FrozenMap<String, Decimal>,
}

impl ModelConfig {
    pub fn create(
        model_name: &str,
        config_ref: &str,
        parameters: FrozenMap<String, Decimal>,
    ) -> Result<Self, String> {
        Ok(Self {
            model_name: NonEmptyStr::parse(model_name).map_err(|e| format!("ModelConfig.model_name: {e}"))?,
            config_ref: NonEmptyStr::parse(config_ref).map_err(|e| format!("ModelConfig.config_ref: {e}"))?,
            parameters,
        })
    }
}

impl CanonicalEncode for ModelConfig {
    fn encode_canonical(&self, e: &mut minicbor::Encoder<Vec<u8>>) -> Result<(), String> {
        let model_name = self.model_name.value().to_string();
        let config_ref = self.config_ref.value().to_string();
        CanonicalMap::new()
            .field("model_name", &model_name)
            .field("config_ref", &config_ref)
            .field("parameters", &self.parameters)
            .encode_canonical(e)
    }
}

/// A discount curve: `currency`, ascending positive `tenors`, parallel
/// positive `discount_factors`.
#[derive(Debug, Clone, PartialEq)]
pub struct YieldCurve {
    pub currency: NonEmptyStr,
    pub as_of: UtcDatetime,
    pub tenors: Vec<Decimal>,
    pub discount_factors: Vec<Decimal>,
    pub model_config_ref: NonEmptyStr,
}

impl YieldCurve {
    pub fn create(
        currency: &str,
        as_of: UtcDatetime,
        tenors: Vec<Decimal>,
        discount_factors: Vec<Decimal>,
        model_config_ref: &str,
    ) -> Result<Self, ValidationError> {
        let source = "oracle::calibration::YieldCurve::create";
        if tenors.len() != discount_factors.len() {
            return Err(ValidationError::single(
                format!(
                    "tenors ({}) and discount_factors ({}) must have equal length",
                    tenors.len(),
                    discount_factors.len()
                ),
                "LENGTH_MISMATCH",
                as_of,
                source,
            ));
        }
        if tenors.is_empty() {
            return Err(ValidationError::single("tenors must be non-empty", "EMPTY_CURVE", as_of, source));
        }
        for window in tenors.windows(2) {
            if window[0] <= Decimal::ZERO || window[1] <= window[0] {
                return Err(ValidationError::single(
                    format!("tenors must be strictly ascending and positive, got {tenors:?}"),
                    "TENORS_NOT_ASCENDING",
                    as_of,
                    source,
                ));
            }
        }
        if tenors[0] <= Decimal::ZERO {
            return Err(ValidationError::single(
                format!("first tenor must be positive, got {}", tenors[0]),
                "TENORS_NOT_ASCENDING",
                as_of,
                source,
            ));
        }
        if discount_factors.iter().any(|&d| d <= Decimal::ZERO) {
            return Err(ValidationError::single(
                format!("all discount factors must be > 0, got {discount_factors:?}"),
                "NON_POSITIVE_DISCOUNT_FACTOR",
                as_of,
                source,
            ));
        }

        Ok(Self {
            currency: NonEmptyStr::parse(currency).map_err(|e| {
                ValidationError::single(format!("currency: {e}"), "INVALID_FIELD", as_of, source)
            })?,
            as_of,
            tenors,
            discount_factors,
            model_config_ref: NonEmptyStr::parse(model_config_ref).map_err(|e| {
                ValidationError::single(format!("model_config_ref: {e}"), "INVALID_FIELD", as_of, source)
            })?,
        })
    }

    /// `D(t)`: exact at a tenor, log-linear between bracketing tenors, flat
    /// beyond the last tenor, log-linear extrapolation toward `D(0)=1`
    /// before the first tenor.
    pub fn discount_factor(&self, t: Decimal) -> Decimal {
        if t <= Decimal::ZERO {
            return Decimal::ONE;
        }
        if let Some(idx) = self.tenors.iter().position(|&tenor| tenor == t) {
            return self.discount_factors[idx];
        }
        if t < self.tenors[0] {
            return log_linear(Decimal::ZERO, Decimal::ONE, self.tenors[0], self.discount_factors[0], t);
        }
        if t > *self.tenors.last().unwrap() {
            return *self.discount_factors.last().unwrap();
        }
        for i in 0..self.tenors.len() - 1 {
            if t > self.tenors[i] && t < self.tenors[i + 1] {
                return log_linear(
                    self.tenors[i],
                    self.discount_factors[i],
                    self.tenors[i + 1],
                    self.discount_factors[i + 1],
                    t,
                );
            }
        }
        unreachable!("t is covered by one of the branches above")
    }

    /// `f(t1,t2) = -ln(D(t2)/D(t1)) / (t2-t1)`.
    pub fn forward_rate(&self, t1: Decimal, t2: Decimal) -> Result<Decimal, ValidationError> {
        let source = "oracle::calibration::YieldCurve::forward_rate";
        if t2 <= t1 {
            return Err(ValidationError::single(
                format!("forward_rate requires t2 > t1, got t1={t1}, t2={t2}"),
                "INVALID_TENOR_ORDER",
                self.as_of,
                source,
            ));
        }
        let d1 = self.discount_factor(t1);
        let d2 = self.discount_factor(t2);
        let ratio = d2 / d1;
        let ln_ratio = ln_d(ratio)
            .map_err(|e| ValidationError::single(e.to_string(), "DOMAIN_ERROR", self.as_of, source))?;
        Ok(-ln_ratio / (t2 - t1))
    }
}

fn log_linear(t0: Decimal, d0: Decimal, t1: Decimal, d1: Decimal, t: Decimal) -> Decimal {
    let ln_d0 = ln_d(d0).unwrap_or(Decimal::ZERO);
    let ln_d1 = ln_d(d1).unwrap_or(Decimal::ZERO);
    let weight = (t - t0) / (t1 - t0);
    let interpolated_ln = ln_d0 + weight * (ln_d1 - ln_d0);
    exp_d(interpolated_ln)
}

impl CanonicalEncode for YieldCurve {
    fn encode_canonical(&self, e: &mut minicbor::Encoder<Vec<u8>>) -> Result<(), String> {
        let currency = self.currency.value().to_string();
        let model_config_ref = self.model_config_ref.value().to_string();
        CanonicalMap::new()
            .field("currency", &currency)
            .field("as_of", &self.as_of)
            .field("tenors", &self.tenors)
            .field("discount_factors", &self.discount_factors)
            .field("model_config_ref", &model_config_ref)
            .encode_canonical(e)
    }
}

/// A single bootstrap input instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateInstrumentType {
    Deposit,
    Fra,
    Swap,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateQuote {
    pub instrument_type: RateInstrumentType,
    pub tenor: Decimal,
    pub rate: Decimal,
}

/// Bootstrap `D(t) = 1 / (1 + r*t)` from a set of rate quotes, sorted by
/// tenor, wrapped in a `DerivedConfidence` attestation.
pub fn bootstrap_curve(
    quotes: &[RateQuote],
    currency: &str,
    as_of: UtcDatetime,
    model_config_ref: &str,
) -> Result<Attestation<YieldCurve>, ValidationError> {
    let source = "oracle::calibration::bootstrap_curve";
    if quotes.is_empty() {
        return Err(ValidationError::single("bootstrap_curve requires at least one quote", "EMPTY_QUOTES", as_of, source));
    }

    let mut sorted: Vec<RateQuote> = quotes.to_vec();
    sorted.sort_by(|a, b| a.tenor.cmp(&b.tenor));

    let tenors: Vec<Decimal> = sorted.iter().map(|q| q.tenor).collect();
    let discount_factors: Vec<Decimal> =
        sorted.iter().map(|q| Decimal::ONE / (Decimal::ONE + q.rate * q.tenor)).collect();

    let curve = YieldCurve::create(currency, as_of, tenors, discount_factors, model_config_ref)?;

    let fit_quality = FrozenMap::create([("instrument_count".to_string(), Decimal::from(sorted.len() as i64))]);
    let confidence = Confidence::Derived(
        DerivedConfidence::create("yield_curve_bootstrap", model_config_ref, fit_quality, None, None)
            .map_err(|e| ValidationError::single(e, "INVALID_CONFIDENCE", as_of, source))?,
    );

    create_attestation(curve, confidence, "oracle::calibration::bootstrap_curve", as_of, vec![])
        .map_err(|e| ValidationError::single(e, "ATTESTATION_FAILED", as_of, source))
}

/// Outcome of a calibration attempt that fell short of the attestable bar,
/// kept for audit without ever silently substituting bad output.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedCalibrationRecord {
    pub reason: String,
    pub config_ref: String,
    pub timestamp: UtcDatetime,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationResult<T> {
    Succeeded(Attestation<T>),
    Failed(FailedCalibrationRecord),
}

/// On calibration failure, return the last known-good attestation rather
/// than retry automatically; absent a fallback, the failure is an `Err`.
pub fn handle_calibration_failure(
    reason: &str,
    config_ref: &str,
    last_good: Option<Attestation<YieldCurve>>,
    timestamp: UtcDatetime,
) -> Result<Attestation<YieldCurve>, FailedCalibrationRecord> {
    match last_good {
        Some(attestation) => Ok(attestation),
        None => Err(FailedCalibrationRecord {
            reason: reason.to_string(),
            config_ref: config_ref.to_string(),
            timestamp,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn bootstrap_produces_expected_discount_factors() {
        let quotes = vec![
            RateQuote { instrument_type: RateInstrumentType::Deposit, tenor: dec!(0.25), rate: dec!(0.04) },
            RateQuote { instrument_type: RateInstrumentType::Swap, tenor: dec!(1), rate: dec!(0.05) },
        ];
        let attestation = bootstrap_curve(&quotes, "USD", UtcDatetime::now(), "cfg-yc-1").unwrap();
        let d_quarter = attestation.value.discount_factor(dec!(0.25));
        let d_year = attestation.value.discount_factor(dec!(1));
        assert!((d_quarter - dec!(1) / dec!(1.01)).abs() < dec!(1e-10));
        assert!((d_year - dec!(1) / dec!(1.05)).abs() < dec!(1e-10));
    }

    #[test]
    fn discount_factor_at_zero_is_one() {
        let curve = YieldCurve::create(
            "USD", UtcDatetime::now(), vec![dec!(1), dec!(2)], vec![dec!(0.95), dec!(0.9)], "cfg-1",
        )
        .unwrap();
        assert_eq!(curve.discount_factor(Decimal::ZERO), Decimal::ONE);
    }

    #[test]
    fn create_rejects_non_ascending_tenors() {
        let result = YieldCurve::create(
            "USD", UtcDatetime::now(), vec![dec!(2), dec!(1)], vec![dec!(0.95), dec!(0.9)], "cfg-1",
        );
        assert!(result.is_err());
    }

    #[test]
    fn handle_calibration_failure_without_fallback_is_err() {
        let result = handle_calibration_failure("svd_did_not_converge", "cfg-1", None, UtcDatetime::now());
        assert!(result.is_err());
    }

    #[test]
    fn handle_calibration_failure_returns_last_good() {
        let quotes = vec![RateQuote { instrument_type: RateInstrumentType::Deposit, tenor: dec!(1), rate: dec!(0.03) }];
        let last_good = bootstrap_curve(&quotes, "USD", UtcDatetime::now(), "cfg-1").unwrap();
        let result = handle_calibration_failure("stale_quotes", "cfg-1", Some(last_good.clone()), UtcDatetime::now());
        assert_eq!(result.unwrap().attestation_id, last_good.attestation_id);
    }
}
