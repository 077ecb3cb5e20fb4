//! `Money` and `CurrencyPair`, grounded on
//! `original_source/attestor/core/money.py`.

use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::refined::NonEmptyStr;

/// ISO-4217 minor-unit exponent for the currencies this crate recognizes.
/// Anything not listed here is rejected by `validate_currency` rather than
/// silently defaulting to 2 — an unrecognized code is far more likely a typo
/// than a genuinely exotic currency this crate should guess about.
static ISO4217_MINOR_UNITS: LazyLock<std::collections::HashMap<&'static str, u32>> = LazyLock::new(|| {
    [
        ("USD", 2), ("EUR", 2), ("GBP", 2), ("JPY", 0), ("CHF", 2),
        ("CAD", 2), ("AUD", 2), ("NZD", 2), ("CNY", 2), ("HKD", 2),
        ("SGD", 2), ("SEK", 2), ("NOK", 2), ("DKK", 2), ("KRW", 0),
        ("INR", 2), ("BHD", 3), ("KWD", 3), ("OMR", 3), ("JOD", 3),
        ("BTC", 8), ("ETH", 18),
    ]
    .into_iter()
    .collect()
});

static VALID_CURRENCIES: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ISO4217_MINOR_UNITS.keys().copied().collect());

/// Reject any currency code not in the recognized ISO-4217 set.
pub fn validate_currency(code: &str) -> Result<(), String> {
    if VALID_CURRENCIES.contains(code) {
        Ok(())
    } else {
        Err(format!("unrecognized currency code: {code}"))
    }
}

fn minor_units(code: &str) -> u32 {
    ISO4217_MINOR_UNITS.get(code).copied().unwrap_or(2)
}

/// An exact-decimal amount paired with its currency. All arithmetic rejects
/// cross-currency operands rather than silently converting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money {
    amount: Decimal,
    currency: &'static str,
}

impl Money {
    pub fn create(amount: Decimal, currency: &str) -> Result<Self, String> {
        validate_currency(currency)?;
        let interned = ISO4217_MINOR_UNITS
            .get_key_value(currency)
            .map(|(k, _)| *k)
            .expect("validated above");
        Ok(Self { amount, currency: interned })
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &'static str {
        self.currency
    }

    fn require_same_currency(&self, other: &Money) -> Result<(), String> {
        if self.currency != other.currency {
            return Err(format!(
                "currency mismatch: {} vs {}",
                self.currency, other.currency
            ));
        }
        Ok(())
    }

    pub fn add(&self, other: &Money) -> Result<Money, String> {
        self.require_same_currency(other)?;
        Ok(Money { amount: self.amount + other.amount, currency: self.currency })
    }

    pub fn sub(&self, other: &Money) -> Result<Money, String> {
        self.require_same_currency(other)?;
        Ok(Money { amount: self.amount - other.amount, currency: self.currency })
    }

    pub fn mul(&self, factor: Decimal) -> Money {
        Money { amount: self.amount * factor, currency: self.currency }
    }

    pub fn div(&self, divisor: Decimal) -> Result<Money, String> {
        if divisor.is_zero() {
            return Err("division by zero".to_string());
        }
        Ok(Money { amount: self.amount / divisor, currency: self.currency })
    }

    pub fn negate(&self) -> Money {
        Money { amount: -self.amount, currency: self.currency }
    }

    pub fn abs(&self) -> Money {
        Money { amount: self.amount.abs(), currency: self.currency }
    }

    pub fn round_to_minor_unit(&self) -> Money {
        Money {
            amount: self.amount.round_dp(minor_units(self.currency)),
            currency: self.currency,
        }
    }
}

/// A base/quote currency pair, e.g. `EUR/USD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyPair {
    base: NonEmptyStr,
    quote: NonEmptyStr,
}

impl CurrencyPair {
    pub fn create(base: &str, quote: &str) -> Result<Self, String> {
        validate_currency(base)?;
        validate_currency(quote)?;
        if base == quote {
            return Err(format!("currency pair base and quote must differ, got {base}/{quote}"));
        }
        Ok(Self {
            base: NonEmptyStr::parse(base)?,
            quote: NonEmptyStr::parse(quote)?,
        })
    }

    pub fn parse(pair: &str) -> Result<Self, String> {
        let (base, quote) = pair
            .split_once('/')
            .ok_or_else(|| format!("currency pair must be BASE/QUOTE, got {pair}"))?;
        Self::create(base, quote)
    }

    pub fn base(&self) -> &str {
        self.base.value()
    }

    pub fn quote(&self) -> &str {
        self.quote.value()
    }
}

impl std::fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}
