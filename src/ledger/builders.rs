//! Transaction builders for equity, futures, FX, IRS, CDS, swaption, and
//! collateral flows. Grounded on spec §4.4's amount-computation rules and
//! the move/transaction shapes in `original_source/attestor/ledger/options.py`
//! (every builder here follows the same validate-then-assemble shape that
//! file establishes for the option family).

use rust_decimal::Decimal;

use crate::errors::ValidationError;
use crate::types::{PositiveDecimal, UtcDatetime};

use super::transactions::{Move, Transaction};

fn invalid(message: impl Into<String>, code: &str, timestamp: UtcDatetime, source: &str) -> ValidationError {
    ValidationError::single(message, code, timestamp, source)
}

/// Equity settlement (T+2): cash leg buyer -> seller, security leg seller ->
/// buyer.
#[allow(clippy::too_many_arguments)]
pub fn create_equity_settlement_transaction(
    buyer_cash_account: &str,
    seller_cash_account: &str,
    buyer_securities_account: &str,
    seller_securities_account: &str,
    security: &str,
    quantity: PositiveDecimal,
    price: PositiveDecimal,
    currency: &str,
    tx_id: &str,
    timestamp: UtcDatetime,
) -> Result<Transaction, ValidationError> {
    let source = "ledger::builders::create_equity_settlement_transaction";
    let notional = PositiveDecimal::parse(quantity.value() * price.value())
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_AMOUNT", timestamp, source))?;

    let cash_move = Move::create(buyer_cash_account, seller_cash_account, currency, notional, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;
    let security_move = Move::create(seller_securities_account, buyer_securities_account, security, quantity, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;

    Transaction::create(tx_id, vec![cash_move, security_move], timestamp, vec![])
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_TRANSACTION", timestamp, source))
}

/// Futures open: a single position-opening move, no cash flow.
pub fn create_futures_open_transaction(
    buyer_position_account: &str,
    seller_position_account: &str,
    contract_id: &str,
    quantity: PositiveDecimal,
    tx_id: &str,
    timestamp: UtcDatetime,
) -> Result<Transaction, ValidationError> {
    let source = "ledger::builders::create_futures_open_transaction";
    let position_move = Move::create(seller_position_account, buyer_position_account, contract_id, quantity, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;

    Transaction::create(tx_id, vec![position_move], timestamp, vec![])
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_TRANSACTION", timestamp, source))
}

/// Variation margin: `(settle - prev_settle) * contract_size * qty`,
/// direction following the sign (positive flows short -> long). Zero flow
/// is rejected.
#[allow(clippy::too_many_arguments)]
pub fn create_variation_margin_transaction(
    long_margin_account: &str,
    short_margin_account: &str,
    currency: &str,
    settle: Decimal,
    prev_settle: Decimal,
    contract_size: PositiveDecimal,
    quantity: PositiveDecimal,
    tx_id: &str,
    timestamp: UtcDatetime,
) -> Result<Transaction, ValidationError> {
    let source = "ledger::builders::create_variation_margin_transaction";
    let delta = (settle - prev_settle) * contract_size.value() * quantity.value();
    if delta.is_zero() {
        return Err(invalid("variation margin: zero flow rejected", "ZERO_FLOW", timestamp, source));
    }

    let (from_account, to_account) = if delta > Decimal::ZERO {
        (short_margin_account, long_margin_account)
    } else {
        (long_margin_account, short_margin_account)
    };
    let amount = PositiveDecimal::parse(delta.abs())
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_AMOUNT", timestamp, source))?;

    let margin_move = Move::create(from_account, to_account, currency, amount, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;

    Transaction::create(tx_id, vec![margin_move], timestamp, vec![])
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_TRANSACTION", timestamp, source))
}

/// Futures expiry: final variation margin (if nonzero) plus position close.
#[allow(clippy::too_many_arguments)]
pub fn create_futures_expiry_transaction(
    long_margin_account: &str,
    short_margin_account: &str,
    long_position_account: &str,
    short_position_account: &str,
    contract_id: &str,
    currency: &str,
    final_settle: Decimal,
    prev_settle: Decimal,
    contract_size: PositiveDecimal,
    quantity: PositiveDecimal,
    tx_id: &str,
    timestamp: UtcDatetime,
) -> Result<Transaction, ValidationError> {
    let source = "ledger::builders::create_futures_expiry_transaction";
    let delta = (final_settle - prev_settle) * contract_size.value() * quantity.value();

    let mut moves = Vec::new();
    if !delta.is_zero() {
        let (from_account, to_account) = if delta > Decimal::ZERO {
            (short_margin_account, long_margin_account)
        } else {
            (long_margin_account, short_margin_account)
        };
        let amount = PositiveDecimal::parse(delta.abs())
            .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_AMOUNT", timestamp, source))?;
        moves.push(
            Move::create(from_account, to_account, currency, amount, tx_id)
                .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?,
        );
    }
    moves.push(
        Move::create(long_position_account, short_position_account, contract_id, quantity, tx_id)
            .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?,
    );

    Transaction::create(tx_id, moves, timestamp, vec![])
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_TRANSACTION", timestamp, source))
}

/// Dividend: one cash move per holder, `amount = per_share * holding`.
pub fn create_dividend_transaction(
    issuer_cash_account: &str,
    holder_cash_accounts: &[(&str, PositiveDecimal)],
    per_share: PositiveDecimal,
    currency: &str,
    tx_id: &str,
    timestamp: UtcDatetime,
) -> Result<Transaction, ValidationError> {
    let source = "ledger::builders::create_dividend_transaction";
    if holder_cash_accounts.is_empty() {
        return Err(invalid("dividend requires at least one holder", "EMPTY_HOLDERS", timestamp, source));
    }

    let mut moves = Vec::with_capacity(holder_cash_accounts.len());
    for (holder_account, holding) in holder_cash_accounts {
        let amount = PositiveDecimal::parse(per_share.value() * holding.value())
            .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_AMOUNT", timestamp, source))?;
        moves.push(
            Move::create(issuer_cash_account, *holder_account, currency, amount, tx_id)
                .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?,
        );
    }

    Transaction::create(tx_id, moves, timestamp, vec![])
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_TRANSACTION", timestamp, source))
}

/// FX spot settlement: base-currency leg `base_notional`, quote-currency
/// leg `base_notional * spot_rate`.
#[allow(clippy::too_many_arguments)]
pub fn create_fx_spot_settlement_transaction(
    base_payer_account: &str,
    base_receiver_account: &str,
    quote_payer_account: &str,
    quote_receiver_account: &str,
    base_currency: &str,
    quote_currency: &str,
    base_notional: PositiveDecimal,
    spot_rate: PositiveDecimal,
    tx_id: &str,
    timestamp: UtcDatetime,
) -> Result<Transaction, ValidationError> {
    let source = "ledger::builders::create_fx_spot_settlement_transaction";
    let quote_notional = PositiveDecimal::parse(base_notional.value() * spot_rate.value())
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_AMOUNT", timestamp, source))?;

    let base_move = Move::create(base_payer_account, base_receiver_account, base_currency, base_notional, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;
    let quote_move = Move::create(quote_payer_account, quote_receiver_account, quote_currency, quote_notional, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;

    Transaction::create(tx_id, vec![base_move, quote_move], timestamp, vec![])
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_TRANSACTION", timestamp, source))
}

/// NDF cash settlement: single move in the settlement currency.
pub fn create_ndf_cash_settlement_transaction(
    payer_account: &str,
    receiver_account: &str,
    settlement_currency: &str,
    amount: PositiveDecimal,
    tx_id: &str,
    timestamp: UtcDatetime,
) -> Result<Transaction, ValidationError> {
    let source = "ledger::builders::create_ndf_cash_settlement_transaction";
    let settlement_move = Move::create(payer_account, receiver_account, settlement_currency, amount, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;

    Transaction::create(tx_id, vec![settlement_move], timestamp, vec![])
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_TRANSACTION", timestamp, source))
}

/// IRS fixed cashflow: `notional * fixed_rate * day_count_fraction`.
#[allow(clippy::too_many_arguments)]
pub fn create_irs_fixed_cashflow_transaction(
    payer_account: &str,
    receiver_account: &str,
    leg_currency: &str,
    notional: PositiveDecimal,
    fixed_rate: Decimal,
    day_count_fraction: Decimal,
    tx_id: &str,
    timestamp: UtcDatetime,
) -> Result<Transaction, ValidationError> {
    let source = "ledger::builders::create_irs_fixed_cashflow_transaction";
    let amount = PositiveDecimal::parse(notional.value() * fixed_rate * day_count_fraction)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_AMOUNT", timestamp, source))?;

    let cashflow_move = Move::create(payer_account, receiver_account, leg_currency, amount, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;

    Transaction::create(tx_id, vec![cashflow_move], timestamp, vec![])
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_TRANSACTION", timestamp, source))
}

/// CDS premium: single periodic premium move.
pub fn create_cds_premium_transaction(
    protection_buyer_account: &str,
    protection_seller_account: &str,
    premium_currency: &str,
    amount: PositiveDecimal,
    tx_id: &str,
    timestamp: UtcDatetime,
) -> Result<Transaction, ValidationError> {
    let source = "ledger::builders::create_cds_premium_transaction";
    let premium_move = Move::create(protection_buyer_account, protection_seller_account, premium_currency, amount, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;

    Transaction::create(tx_id, vec![premium_move], timestamp, vec![])
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_TRANSACTION", timestamp, source))
}

/// CDS credit event: `notional * (1 - auction_price)` paid seller -> buyer,
/// plus position close, and an optional accrued-premium move. Rejects
/// `auction_price` outside `[0, 1)` and zero flow.
#[allow(clippy::too_many_arguments)]
pub fn create_cds_credit_event_transaction(
    protection_buyer_account: &str,
    protection_seller_account: &str,
    buyer_position_account: &str,
    seller_position_account: &str,
    contract_id: &str,
    currency: &str,
    notional: PositiveDecimal,
    auction_price: Decimal,
    quantity: PositiveDecimal,
    accrued_premium: Option<PositiveDecimal>,
    tx_id: &str,
    timestamp: UtcDatetime,
) -> Result<Transaction, ValidationError> {
    let source = "ledger::builders::create_cds_credit_event_transaction";
    if auction_price < Decimal::ZERO || auction_price >= Decimal::ONE {
        return Err(invalid(
            format!("auction_price must be in [0,1), got {auction_price}"),
            "INVALID_AUCTION_PRICE",
            timestamp,
            source,
        ));
    }

    let payout = notional.value() * (Decimal::ONE - auction_price);
    if payout.is_zero() {
        return Err(invalid("credit event payout is zero", "ZERO_FLOW", timestamp, source));
    }
    let payout_pd = PositiveDecimal::parse(payout)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_AMOUNT", timestamp, source))?;

    let mut moves = vec![
        Move::create(protection_seller_account, protection_buyer_account, currency, payout_pd, tx_id)
            .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?,
        Move::create(buyer_position_account, seller_position_account, contract_id, quantity, tx_id)
            .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?,
    ];
    if let Some(accrued) = accrued_premium {
        moves.push(
            Move::create(protection_buyer_account, protection_seller_account, currency, accrued, tx_id)
                .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?,
        );
    }

    Transaction::create(tx_id, moves, timestamp, vec![])
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_TRANSACTION", timestamp, source))
}

/// CDS maturity close: position close only, no cash movement.
pub fn create_cds_maturity_close_transaction(
    buyer_position_account: &str,
    seller_position_account: &str,
    contract_id: &str,
    quantity: PositiveDecimal,
    tx_id: &str,
    timestamp: UtcDatetime,
) -> Result<Transaction, ValidationError> {
    let source = "ledger::builders::create_cds_maturity_close_transaction";
    let close_move = Move::create(buyer_position_account, seller_position_account, contract_id, quantity, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;

    Transaction::create(tx_id, vec![close_move], timestamp, vec![])
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_TRANSACTION", timestamp, source))
}

/// Swaption premium: cash leg plus position-opening leg, mirroring the
/// option premium shape.
#[allow(clippy::too_many_arguments)]
pub fn create_swaption_premium_transaction(
    buyer_cash_account: &str,
    seller_cash_account: &str,
    buyer_position_account: &str,
    seller_position_account: &str,
    swaption_id: &str,
    premium: PositiveDecimal,
    quantity: PositiveDecimal,
    currency: &str,
    tx_id: &str,
    timestamp: UtcDatetime,
) -> Result<Transaction, ValidationError> {
    let source = "ledger::builders::create_swaption_premium_transaction";
    let cash_move = Move::create(buyer_cash_account, seller_cash_account, currency, premium, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;
    let position_move = Move::create(seller_position_account, buyer_position_account, swaption_id, quantity, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;

    Transaction::create(tx_id, vec![cash_move, position_move], timestamp, vec![])
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_TRANSACTION", timestamp, source))
}

/// Swaption physical close: the swaption position closes; the underlying
/// swap is constructed separately by the IRS builders.
pub fn create_swaption_physical_close_transaction(
    buyer_position_account: &str,
    seller_position_account: &str,
    swaption_id: &str,
    quantity: PositiveDecimal,
    tx_id: &str,
    timestamp: UtcDatetime,
) -> Result<Transaction, ValidationError> {
    let source = "ledger::builders::create_swaption_physical_close_transaction";
    let close_move = Move::create(buyer_position_account, seller_position_account, swaption_id, quantity, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;

    Transaction::create(tx_id, vec![close_move], timestamp, vec![])
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_TRANSACTION", timestamp, source))
}

/// Swaption cash settlement: settlement amount plus position close.
#[allow(clippy::too_many_arguments)]
pub fn create_swaption_cash_settlement_transaction(
    payer_account: &str,
    receiver_account: &str,
    buyer_position_account: &str,
    seller_position_account: &str,
    swaption_id: &str,
    currency: &str,
    settlement_amount: PositiveDecimal,
    quantity: PositiveDecimal,
    tx_id: &str,
    timestamp: UtcDatetime,
) -> Result<Transaction, ValidationError> {
    let source = "ledger::builders::create_swaption_cash_settlement_transaction";
    let cash_move = Move::create(payer_account, receiver_account, currency, settlement_amount, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;
    let close_move = Move::create(buyer_position_account, seller_position_account, swaption_id, quantity, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;

    Transaction::create(tx_id, vec![cash_move, close_move], timestamp, vec![])
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_TRANSACTION", timestamp, source))
}

/// Collateral margin call: a single move of collateral into the secured
/// account.
pub fn create_collateral_call_transaction(
    poster_account: &str,
    secured_account: &str,
    collateral_unit: &str,
    quantity: PositiveDecimal,
    tx_id: &str,
    timestamp: UtcDatetime,
) -> Result<Transaction, ValidationError> {
    let source = "ledger::builders::create_collateral_call_transaction";
    let call_move = Move::create(poster_account, secured_account, collateral_unit, quantity, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;

    Transaction::create(tx_id, vec![call_move], timestamp, vec![])
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_TRANSACTION", timestamp, source))
}

/// Collateral return: a single move back to the poster.
pub fn create_collateral_return_transaction(
    secured_account: &str,
    poster_account: &str,
    collateral_unit: &str,
    quantity: PositiveDecimal,
    tx_id: &str,
    timestamp: UtcDatetime,
) -> Result<Transaction, ValidationError> {
    let source = "ledger::builders::create_collateral_return_transaction";
    let return_move = Move::create(secured_account, poster_account, collateral_unit, quantity, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;

    Transaction::create(tx_id, vec![return_move], timestamp, vec![])
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_TRANSACTION", timestamp, source))
}

/// Collateral substitution: one unit returns to the poster while a
/// different unit moves in, two legs.
#[allow(clippy::too_many_arguments)]
pub fn create_collateral_substitution_transaction(
    secured_account: &str,
    poster_account: &str,
    outgoing_unit: &str,
    outgoing_quantity: PositiveDecimal,
    incoming_unit: &str,
    incoming_quantity: PositiveDecimal,
    tx_id: &str,
    timestamp: UtcDatetime,
) -> Result<Transaction, ValidationError> {
    let source = "ledger::builders::create_collateral_substitution_transaction";
    let return_move = Move::create(secured_account, poster_account, outgoing_unit, outgoing_quantity, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;
    let call_move = Move::create(poster_account, secured_account, incoming_unit, incoming_quantity, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;

    Transaction::create(tx_id, vec![return_move, call_move], timestamp, vec![])
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_TRANSACTION", timestamp, source))
}
