//! Option transaction builders: premium, physical exercise, cash-settled
//! exercise, expiry. Grounded on
//! `original_source/attestor/ledger/options.py`.

use rust_decimal::Decimal;

use crate::errors::ValidationError;
use crate::types::{PositiveDecimal, UtcDatetime};

use super::transactions::{Move, Transaction};

fn invalid(message: impl Into<String>, code: &str, timestamp: UtcDatetime, source: &str) -> ValidationError {
    ValidationError::single(message, code, timestamp, source)
}

fn contract_unit(underlying: &str, is_call: bool, strike: Decimal, expiry: chrono::NaiveDate) -> String {
    let option_type = if is_call { "CALL" } else { "PUT" };
    format!("OPT-{underlying}-{option_type}-{strike}-{expiry}")
}

/// Premium move (buyer -> seller cash) plus position opening (seller ->
/// buyer option position). `premium = price * quantity * multiplier`.
#[allow(clippy::too_many_arguments)]
pub fn create_premium_transaction(
    buyer_cash_account: &str,
    seller_cash_account: &str,
    buyer_position_account: &str,
    seller_position_account: &str,
    underlying: &str,
    is_call: bool,
    strike: Decimal,
    expiry: chrono::NaiveDate,
    price: Decimal,
    quantity: PositiveDecimal,
    multiplier: PositiveDecimal,
    currency: &str,
    tx_id: &str,
    timestamp: UtcDatetime,
) -> Result<Transaction, ValidationError> {
    let premium = price * quantity.value() * multiplier.value();
    let premium_pd = PositiveDecimal::parse(premium).map_err(|e| {
        invalid(
            format!("create_premium_transaction: premium must be > 0: {e}"),
            "INVALID_PREMIUM",
            timestamp,
            "ledger::options::create_premium_transaction",
        )
    })?;

    let unit = contract_unit(underlying, is_call, strike, expiry);

    let cash_move = Move::create(buyer_cash_account, seller_cash_account, currency, premium_pd, tx_id)
        .map_err(|e| invalid(format!("create_premium_transaction: {e}"), "INVALID_MOVE", timestamp, "ledger::options::create_premium_transaction"))?;
    let position_move = Move::create(seller_position_account, buyer_position_account, &unit, quantity, tx_id)
        .map_err(|e| invalid(format!("create_premium_transaction: {e}"), "INVALID_MOVE", timestamp, "ledger::options::create_premium_transaction"))?;

    Transaction::create(tx_id, vec![cash_move, position_move], timestamp, vec![])
        .map_err(|e| invalid(format!("create_premium_transaction: {e}"), "INVALID_TRANSACTION", timestamp, "ledger::options::create_premium_transaction"))
}

/// Physical exercise: close the option position and deliver the underlying.
/// CALL: holder pays `strike*qty*multiplier` cash, receives securities.
/// PUT: holder delivers securities, receives cash. Both close the position.
#[allow(clippy::too_many_arguments)]
pub fn create_exercise_transaction(
    holder_cash_account: &str,
    holder_securities_account: &str,
    writer_cash_account: &str,
    writer_securities_account: &str,
    holder_position_account: &str,
    writer_position_account: &str,
    underlying: &str,
    is_call: bool,
    strike: Decimal,
    expiry: chrono::NaiveDate,
    quantity: PositiveDecimal,
    multiplier: PositiveDecimal,
    currency: &str,
    tx_id: &str,
    timestamp: UtcDatetime,
) -> Result<Transaction, ValidationError> {
    let cash_amount = strike * quantity.value() * multiplier.value();
    let securities_qty = quantity.value() * multiplier.value();
    let unit = contract_unit(underlying, is_call, strike, expiry);

    let source = "ledger::options::create_exercise_transaction";
    let cash_pd = PositiveDecimal::parse(cash_amount)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_AMOUNT", timestamp, source))?;
    let sec_pd = PositiveDecimal::parse(securities_qty)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_AMOUNT", timestamp, source))?;

    let mut moves = Vec::new();
    if is_call {
        moves.push(
            Move::create(holder_cash_account, writer_cash_account, currency, cash_pd, tx_id)
                .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?,
        );
        moves.push(
            Move::create(writer_securities_account, holder_securities_account, underlying, sec_pd, tx_id)
                .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?,
        );
    } else {
        moves.push(
            Move::create(holder_securities_account, writer_securities_account, underlying, sec_pd, tx_id)
                .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?,
        );
        moves.push(
            Move::create(writer_cash_account, holder_cash_account, currency, cash_pd, tx_id)
                .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?,
        );
    }
    moves.push(
        Move::create(holder_position_account, writer_position_account, &unit, quantity, tx_id)
            .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?,
    );

    Transaction::create(tx_id, moves, timestamp, vec![])
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_TRANSACTION", timestamp, source))
}

/// Cash-settled exercise: writer pays intrinsic value to holder, then the
/// position closes. OTM exercise (non-positive intrinsic) is rejected.
#[allow(clippy::too_many_arguments)]
pub fn create_cash_settlement_exercise_transaction(
    holder_cash_account: &str,
    writer_cash_account: &str,
    holder_position_account: &str,
    writer_position_account: &str,
    underlying: &str,
    is_call: bool,
    strike: Decimal,
    expiry: chrono::NaiveDate,
    quantity: PositiveDecimal,
    multiplier: PositiveDecimal,
    currency: &str,
    tx_id: &str,
    timestamp: UtcDatetime,
    settlement_price: Decimal,
) -> Result<Transaction, ValidationError> {
    let source = "ledger::options::create_cash_settlement_exercise_transaction";

    if is_call && settlement_price <= strike {
        return Err(invalid(
            format!("CALL exercise rejected: settlement_price ({settlement_price}) <= strike ({strike})"),
            "OTM_EXERCISE",
            timestamp,
            source,
        ));
    }
    if !is_call && settlement_price >= strike {
        return Err(invalid(
            format!("PUT exercise rejected: settlement_price ({settlement_price}) >= strike ({strike})"),
            "OTM_EXERCISE",
            timestamp,
            source,
        ));
    }

    let qty_mul = quantity.value() * multiplier.value();
    let intrinsic = if is_call {
        (settlement_price - strike) * qty_mul
    } else {
        (strike - settlement_price) * qty_mul
    };

    let unit = contract_unit(underlying, is_call, strike, expiry);
    let intrinsic_pd = PositiveDecimal::parse(intrinsic)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_AMOUNT", timestamp, source))?;

    let cash_move = Move::create(writer_cash_account, holder_cash_account, currency, intrinsic_pd, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;
    let position_move = Move::create(holder_position_account, writer_position_account, &unit, quantity, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;

    Transaction::create(tx_id, vec![cash_move, position_move], timestamp, vec![])
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_TRANSACTION", timestamp, source))
}

/// OTM expiry: close the derivative position with no cash movement.
pub fn create_expiry_transaction(
    holder_position_account: &str,
    writer_position_account: &str,
    quantity: PositiveDecimal,
    contract_unit: &str,
    tx_id: &str,
    timestamp: UtcDatetime,
) -> Result<Transaction, ValidationError> {
    let source = "ledger::options::create_expiry_transaction";
    let position_move = Move::create(holder_position_account, writer_position_account, contract_unit, quantity, tx_id)
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_MOVE", timestamp, source))?;

    Transaction::create(tx_id, vec![position_move], timestamp, vec![])
        .map_err(|e| invalid(format!("{source}: {e}"), "INVALID_TRANSACTION", timestamp, source))
}
