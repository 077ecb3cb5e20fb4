//! `AssetIdentifier` and security classification, grounded on
//! `original_source/attestor/instrument/asset.py`.

use crate::types::NonEmptyStr;

use super::identifiers::{validate_cusip, validate_isin, validate_sedol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetIdType {
    Isin,
    Cusip,
    Sedol,
    Figi,
    Ric,
    Bbgid,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquityType {
    Ordinary,
    NonConvertiblePreference,
    DepositaryReceipt,
    ConvertiblePreference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentType {
    Equity,
    Debt,
    Fund,
    ListedDerivative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundProductType {
    Etf,
    MutualFund,
    HedgeFund,
    MoneyMarketFund,
}

/// A single identifier for a security, cross-validated against the shape
/// its `identifier_type` names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetIdentifier {
    pub identifier: NonEmptyStr,
    pub identifier_type: AssetIdType,
}

impl AssetIdentifier {
    pub fn create(identifier: &str, identifier_type: AssetIdType) -> Result<Self, String> {
        let ident = NonEmptyStr::parse(identifier).map_err(|e| format!("AssetIdentifier.identifier: {e}"))?;
        match identifier_type {
            AssetIdType::Isin => validate_isin(ident.value()).map_err(|e| format!("AssetIdentifier ISIN validation: {e}"))?,
            AssetIdType::Cusip => validate_cusip(ident.value()).map_err(|e| format!("AssetIdentifier CUSIP validation: {e}"))?,
            AssetIdType::Sedol => validate_sedol(ident.value()).map_err(|e| format!("AssetIdentifier SEDOL validation: {e}"))?,
            AssetIdType::Figi | AssetIdType::Ric | AssetIdType::Bbgid | AssetIdType::Other => {}
        }
        Ok(Self { identifier: ident, identifier_type })
    }
}

/// Classification narrows `InstrumentType` with a sub-classification; there
/// is no state where the broad type and the sub-type disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityClassification {
    Equity(EquityType),
    Fund(FundProductType),
}

impl SecurityClassification {
    pub fn instrument_type(self) -> InstrumentType {
        match self {
            SecurityClassification::Equity(_) => InstrumentType::Equity,
            SecurityClassification::Fund(_) => InstrumentType::Fund,
        }
    }
}

/// A security in the asset taxonomy: one or more distinct-typed identifiers,
/// a classification, an optional listing venue, and a settlement currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Security {
    pub identifiers: Vec<AssetIdentifier>,
    pub classification: SecurityClassification,
    pub exchange: Option<NonEmptyStr>,
    pub currency: NonEmptyStr,
}

impl Security {
    pub fn create(
        identifiers: Vec<AssetIdentifier>,
        classification: SecurityClassification,
        exchange: Option<NonEmptyStr>,
        currency: NonEmptyStr,
    ) -> Result<Self, String> {
        if identifiers.is_empty() {
            return Err("Security.identifiers must be non-empty".to_string());
        }
        let mut seen = Vec::new();
        for id in &identifiers {
            if seen.contains(&id.identifier_type) {
                return Err(format!(
                    "Security.identifiers must not repeat an identifier_type, duplicate {:?}",
                    id.identifier_type
                ));
            }
            seen.push(id.identifier_type);
        }
        Ok(Self { identifiers, classification, exchange, currency })
    }

    pub fn is_exchange_listed(&self) -> bool {
        self.exchange.is_some()
    }

    pub fn instrument_type(&self) -> InstrumentType {
        self.classification.instrument_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn security_rejects_empty_identifiers() {
        let err = Security::create(
            vec![],
            SecurityClassification::Equity(EquityType::Ordinary),
            None,
            NonEmptyStr::parse("USD").unwrap(),
        );
        assert!(err.is_err());
    }

    #[test]
    fn security_rejects_duplicate_identifier_types() {
        let isin1 = AssetIdentifier::create("US0378331005", AssetIdType::Isin).unwrap();
        let isin2 = AssetIdentifier::create("US5949181045", AssetIdType::Isin).unwrap();
        let err = Security::create(
            vec![isin1, isin2],
            SecurityClassification::Equity(EquityType::Ordinary),
            None,
            NonEmptyStr::parse("USD").unwrap(),
        );
        assert!(err.is_err());
    }

    #[test]
    fn is_exchange_listed_derives_from_exchange_field() {
        let isin = AssetIdentifier::create("US0378331005", AssetIdType::Isin).unwrap();
        let sec = Security::create(
            vec![isin],
            SecurityClassification::Equity(EquityType::Ordinary),
            Some(NonEmptyStr::parse("XNAS").unwrap()),
            NonEmptyStr::parse("USD").unwrap(),
        )
        .unwrap();
        assert!(sec.is_exchange_listed());
    }
}
