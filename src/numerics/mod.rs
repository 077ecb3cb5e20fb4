//! Exact-decimal numeric kernel: the process-wide decimal context, pure
//! `exp`/`ln`/`sqrt`/`expm1_neg`, and day-count fractions. No floating point
//! appears anywhere in domain code — everything here operates on
//! [`rust_decimal::Decimal`].

pub mod calendar;
pub mod decimal;
