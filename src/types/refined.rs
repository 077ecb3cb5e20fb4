//! Refined scalars: smart constructors returning `Result`, so once a value
//! exists the invariant holds by type. Grounded on
//! `original_source/attestor/core/money.py`.

use rust_decimal::Decimal;

/// A `Decimal` constrained to be `> 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PositiveDecimal(Decimal);

impl PositiveDecimal {
    pub fn parse(raw: Decimal) -> Result<Self, String> {
        if raw <= Decimal::ZERO {
            return Err(format!("PositiveDecimal requires > 0, got {raw}"));
        }
        Ok(Self(raw))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// A `Decimal` constrained to be `!= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonZeroDecimal(Decimal);

impl NonZeroDecimal {
    pub fn parse(raw: Decimal) -> Result<Self, String> {
        if raw.is_zero() {
            return Err("NonZeroDecimal requires != 0".to_string());
        }
        Ok(Self(raw))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// A `Decimal` constrained to be `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonNegativeDecimal(Decimal);

impl NonNegativeDecimal {
    pub fn parse(raw: Decimal) -> Result<Self, String> {
        if raw < Decimal::ZERO {
            return Err(format!("NonNegativeDecimal requires >= 0, got {raw}"));
        }
        Ok(Self(raw))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// A `String` constrained to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonEmptyStr(String);

impl NonEmptyStr {
    pub fn parse(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err("NonEmptyStr requires non-empty string".to_string());
        }
        Ok(Self(raw))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyStr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn positive_decimal_rejects_exactly_non_satisfying_values() {
        assert!(PositiveDecimal::parse(dec!(0)).is_err());
        assert!(PositiveDecimal::parse(dec!(-1)).is_err());
        assert!(PositiveDecimal::parse(dec!(0.0001)).is_ok());
    }

    #[test]
    fn non_zero_decimal_rejects_zero_only() {
        assert!(NonZeroDecimal::parse(dec!(0)).is_err());
        assert!(NonZeroDecimal::parse(dec!(-1)).is_ok());
        assert!(NonZeroDecimal::parse(dec!(1)).is_ok());
    }

    #[test]
    fn non_negative_decimal_rejects_negative_only() {
        assert!(NonNegativeDecimal::parse(dec!(-0.01)).is_err());
        assert!(NonNegativeDecimal::parse(dec!(0)).is_ok());
    }

    #[test]
    fn non_empty_str_rejects_empty_only() {
        assert!(NonEmptyStr::parse("").is_err());
        assert!(NonEmptyStr::parse("x").is_ok());
    }
}
