//! `PrimitiveInstruction` and `BusinessEvent`, grounded on spec §4.6 and the
//! builder amount-computation rules of §4.4. Each variant carries exactly
//! the inputs its matching builder in `crate::ledger` needs; nothing here
//! touches the ledger engine itself — a consumer pattern-matches the
//! instruction and calls the builder.

use rust_decimal::Decimal;

use crate::types::{NonEmptyStr, PositiveDecimal, UtcDatetime};

/// How a swaption exercise settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwaptionSettlementMode {
    Physical,
    Cash,
}

/// A sum type covering every financial behavior the ledger builders know how
/// to translate into a conserving `Transaction`. The engine never inspects
/// these variants directly (Principle V): only the builder layer does.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveInstruction {
    Transfer {
        source: NonEmptyStr,
        destination: NonEmptyStr,
        unit: NonEmptyStr,
        quantity: PositiveDecimal,
    },
    EquitySettlement {
        cash_account: NonEmptyStr,
        security_account: NonEmptyStr,
        security: NonEmptyStr,
        quantity: PositiveDecimal,
        price: PositiveDecimal,
        currency: NonEmptyStr,
    },
    OptionPremium {
        option_id: NonEmptyStr,
        price: PositiveDecimal,
        quantity: PositiveDecimal,
        multiplier: PositiveDecimal,
        currency: NonEmptyStr,
    },
    OptionPhysicalExercise {
        option_id: NonEmptyStr,
        underlying: NonEmptyStr,
        strike: PositiveDecimal,
        quantity: PositiveDecimal,
        multiplier: PositiveDecimal,
        currency: NonEmptyStr,
        is_call: bool,
    },
    OptionCashSettlement {
        option_id: NonEmptyStr,
        spot: PositiveDecimal,
        strike: PositiveDecimal,
        quantity: PositiveDecimal,
        multiplier: PositiveDecimal,
        currency: NonEmptyStr,
        is_call: bool,
    },
    FuturesOpen {
        contract_id: NonEmptyStr,
        quantity: PositiveDecimal,
    },
    VariationMargin {
        contract_id: NonEmptyStr,
        settle: Decimal,
        prev_settle: Decimal,
        contract_size: PositiveDecimal,
        quantity: PositiveDecimal,
        currency: NonEmptyStr,
    },
    FuturesExpiry {
        contract_id: NonEmptyStr,
        final_settle: Decimal,
        prev_settle: Decimal,
        contract_size: PositiveDecimal,
        quantity: PositiveDecimal,
        currency: NonEmptyStr,
    },
    Dividend {
        security: NonEmptyStr,
        per_share: PositiveDecimal,
        holdings: Vec<(NonEmptyStr, PositiveDecimal)>,
        currency: NonEmptyStr,
    },
    FxSpotSettlement {
        base_currency: NonEmptyStr,
        quote_currency: NonEmptyStr,
        base_notional: PositiveDecimal,
        spot_rate: PositiveDecimal,
    },
    NdfCashSettlement {
        settlement_currency: NonEmptyStr,
        amount: PositiveDecimal,
    },
    IrsCashflow {
        leg_currency: NonEmptyStr,
        notional: PositiveDecimal,
        fixed_rate: Decimal,
        day_count_fraction: Decimal,
    },
    RateFixing {
        contract_id: NonEmptyStr,
        fixed_rate: Decimal,
    },
    CdsPremium {
        contract_id: NonEmptyStr,
        premium_currency: NonEmptyStr,
        amount: PositiveDecimal,
    },
    CreditEvent {
        contract_id: NonEmptyStr,
        notional: PositiveDecimal,
        auction_price: Decimal,
        currency: NonEmptyStr,
        accrued_premium: Option<PositiveDecimal>,
    },
    SwaptionExercise {
        swaption_id: NonEmptyStr,
        mode: SwaptionSettlementMode,
        currency: NonEmptyStr,
        settlement_amount: Option<PositiveDecimal>,
    },
    CollateralCall {
        collateral_unit: NonEmptyStr,
        account: NonEmptyStr,
        quantity: PositiveDecimal,
    },
    CollateralReturnOrSubstitution {
        collateral_unit: NonEmptyStr,
        account: NonEmptyStr,
        quantity: PositiveDecimal,
        substituted_unit: Option<NonEmptyStr>,
    },
}

/// A `PrimitiveInstruction` with the timing and (optional) provenance of the
/// attestation that triggered it.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessEvent {
    pub instruction: PrimitiveInstruction,
    pub timestamp: UtcDatetime,
    pub attestation_id: Option<NonEmptyStr>,
}

impl BusinessEvent {
    pub fn new(
        instruction: PrimitiveInstruction,
        timestamp: UtcDatetime,
        attestation_id: Option<NonEmptyStr>,
    ) -> Self {
        Self { instruction, timestamp, attestation_id }
    }
}
