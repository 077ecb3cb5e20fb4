//! Security identifiers, asset classification, and the instrument-detail
//! sum type a `CanonicalOrder` carries.

pub mod asset;
pub mod detail;
pub mod identifiers;

pub use asset::{AssetIdType, AssetIdentifier, EquityType, FundProductType, InstrumentType, Security, SecurityClassification};
pub use detail::{CdsDetail, EquityDetail, FuturesDetail, FxDetail, FxSettlementType, InstrumentDetail, IrSwapDetail, OptionDetail, OptionKind, SwaptionDetail};
pub use identifiers::{validate_cusip, validate_exchange_mic, validate_isin, validate_lei, validate_sedol};
