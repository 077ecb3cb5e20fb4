//! Curve/surface calibration and the arbitrage-freedom gates that validate
//! them: yield curves, SVI volatility surfaces, credit curves, and FX
//! consistency checks, plus the quote-ingestion boundary that feeds them.

pub mod calibration;
pub mod credit_curve;
pub mod gates;
pub mod ingest;
pub mod vol_surface;

pub use calibration::{
    bootstrap_curve, handle_calibration_failure, CalibrationResult, FailedCalibrationRecord,
    ModelConfig, RateInstrumentType, RateQuote, YieldCurve,
};
pub use credit_curve::{bootstrap_credit_curve, CdsQuote, CreditCurve};
pub use gates::{
    check_covered_interest_parity, check_credit_curve, check_fx_triangular, check_vol_surface,
    check_yield_curve, log_moneyness_grid, FxRateQuote, GateResult, Severity,
};
pub use ingest::{ingest_batch, ingest_quote, RawQuote};
pub use vol_surface::{
    calibrate_svi_slice, implied_vol_from_variance, svi_total_variance,
    svi_total_variance_first_derivative, svi_total_variance_second_derivative, SviParameters,
    VarianceQuote, VolSurface, VolSurfaceSlice,
};
