//! End-to-end scenarios with literal inputs and expected outputs, per
//! spec.md §8 (S1-S7).

use attestor::ledger::{
    create_cds_credit_event_transaction, create_equity_settlement_transaction,
    create_fx_spot_settlement_transaction, create_premium_transaction, create_variation_margin_transaction,
    Account, AccountType, ExecuteResult, LedgerEngine,
};
use attestor::numerics::decimal::sqrt_d;
use attestor::oracle::calibration::{bootstrap_curve, RateInstrumentType, RateQuote};
use attestor::oracle::gates::check_yield_curve;
use attestor::oracle::vol_surface::{implied_vol_from_variance, svi_total_variance, SviParameters};
use attestor::types::{PositiveDecimal, UtcDatetime};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn account(id: &str) -> Account {
    Account { account_id: attestor::types::NonEmptyStr::parse(id).unwrap(), account_type: AccountType::Cash }
}

/// S1: equity settlement, buy 100 AAPL @ 175.50 USD.
#[test]
fn s1_equity_settlement() {
    let mut engine = LedgerEngine::new();
    for id in ["buyer-cash", "seller-cash", "buyer-sec", "seller-sec"] {
        engine.register_account(account(id)).unwrap();
    }

    let qty = PositiveDecimal::parse(dec!(100)).unwrap();
    let price = PositiveDecimal::parse(dec!(175.50)).unwrap();
    let tx = create_equity_settlement_transaction(
        "buyer-cash", "seller-cash", "buyer-sec", "seller-sec",
        "AAPL", qty, price, "USD", "s1-tx", UtcDatetime::now(),
    )
    .unwrap();

    let result = engine.execute(tx.clone()).unwrap();
    assert_eq!(result, ExecuteResult::Applied);

    assert_eq!(engine.get_balance("buyer-cash", "USD"), dec!(-17550.00));
    assert_eq!(engine.get_balance("seller-cash", "USD"), dec!(17550.00));
    assert_eq!(engine.get_balance("seller-sec", "AAPL"), dec!(-100));
    assert_eq!(engine.get_balance("buyer-sec", "AAPL"), dec!(100));
    assert_eq!(engine.total_supply("USD"), Decimal::ZERO);
    assert_eq!(engine.total_supply("AAPL"), Decimal::ZERO);
    assert_eq!(engine.transaction_count(), 1);

    let re_executed = engine.execute(tx).unwrap();
    assert_eq!(re_executed, ExecuteResult::AlreadyApplied);
}

/// S2: CALL AAPL strike 150 premium, 10 contracts @ 5.50, multiplier 100,
/// then OTM expiry closes the position with no cash movement.
#[test]
fn s2_option_premium_then_otm_expiry() {
    let mut engine = LedgerEngine::new();
    for id in ["buyer-cash", "seller-cash", "buyer-pos", "seller-pos"] {
        engine.register_account(account(id)).unwrap();
    }

    let expiry = NaiveDate::from_ymd_opt(2025, 12, 19).unwrap();
    let qty = PositiveDecimal::parse(dec!(10)).unwrap();
    let multiplier = PositiveDecimal::parse(dec!(100)).unwrap();

    let premium_tx = create_premium_transaction(
        "buyer-cash", "seller-cash", "buyer-pos", "seller-pos",
        "AAPL", true, dec!(150), expiry, dec!(5.50), qty, multiplier, "USD", "s2-premium", UtcDatetime::now(),
    )
    .unwrap();
    engine.execute(premium_tx).unwrap();

    assert_eq!(engine.get_balance("buyer-cash", "USD"), dec!(-5500));
    assert_eq!(engine.get_balance("seller-cash", "USD"), dec!(5500));

    let unit = "OPT-AAPL-CALL-150-2025-12-19";
    let expiry_tx = attestor::ledger::create_expiry_transaction(
        "buyer-pos", "seller-pos", qty, unit, "s2-expiry", UtcDatetime::now(),
    )
    .unwrap();
    engine.execute(expiry_tx).unwrap();

    assert_eq!(engine.total_supply("USD"), Decimal::ZERO);
    assert_eq!(engine.total_supply(unit), Decimal::ZERO);
}

/// S3: variation margin on ES futures, contract size 50, qty 5, settle
/// moves 5200 -> 5250, flow = 12500.
#[test]
fn s3_variation_margin() {
    let mut engine = LedgerEngine::new();
    for id in ["long-margin", "short-margin"] {
        engine.register_account(account(id)).unwrap();
    }

    let contract_size = PositiveDecimal::parse(dec!(50)).unwrap();
    let qty = PositiveDecimal::parse(dec!(5)).unwrap();
    let tx = create_variation_margin_transaction(
        "long-margin", "short-margin", "USD", dec!(5250), dec!(5200), contract_size, qty, "s3-tx", UtcDatetime::now(),
    )
    .unwrap();
    engine.execute(tx).unwrap();

    assert_eq!(engine.get_balance("long-margin", "USD"), dec!(12500));
    assert_eq!(engine.get_balance("short-margin", "USD"), dec!(-12500));
    assert_eq!(engine.total_supply("USD"), Decimal::ZERO);
}

/// S4: EUR/USD spot, base 1,000,000 EUR @ 1.0850.
#[test]
fn s4_fx_spot_settlement() {
    let mut engine = LedgerEngine::new();
    for id in ["eur-payer", "eur-receiver", "usd-payer", "usd-receiver"] {
        engine.register_account(account(id)).unwrap();
    }

    let base_notional = PositiveDecimal::parse(dec!(1000000)).unwrap();
    let spot = PositiveDecimal::parse(dec!(1.0850)).unwrap();
    let tx = create_fx_spot_settlement_transaction(
        "eur-payer", "eur-receiver", "usd-payer", "usd-receiver",
        "EUR", "USD", base_notional, spot, "s4-tx", UtcDatetime::now(),
    )
    .unwrap();
    engine.execute(tx).unwrap();

    assert_eq!(engine.get_balance("eur-payer", "EUR"), dec!(-1000000));
    assert_eq!(engine.get_balance("eur-receiver", "EUR"), dec!(1000000));
    assert_eq!(engine.get_balance("usd-payer", "USD"), dec!(-1085000.0000));
    assert_eq!(engine.get_balance("usd-receiver", "USD"), dec!(1085000.0000));
    assert_eq!(engine.total_supply("EUR"), Decimal::ZERO);
    assert_eq!(engine.total_supply("USD"), Decimal::ZERO);
}

/// S5: CDS credit event, notional 10,000,000 USD, auction price 0.40,
/// protection payment 6,000,000 USD seller -> buyer.
#[test]
fn s5_cds_credit_event() {
    let mut engine = LedgerEngine::new();
    for id in ["prot-buyer-cash", "prot-seller-cash", "buyer-pos", "seller-pos"] {
        engine.register_account(account(id)).unwrap();
    }

    let notional = PositiveDecimal::parse(dec!(10000000)).unwrap();
    let qty = PositiveDecimal::parse(dec!(1)).unwrap();
    let tx = create_cds_credit_event_transaction(
        "prot-buyer-cash", "prot-seller-cash", "buyer-pos", "seller-pos",
        "CDS-ACME-2030", "USD", notional, dec!(0.40), qty, None, "s5-tx", UtcDatetime::now(),
    )
    .unwrap();
    engine.execute(tx).unwrap();

    assert_eq!(engine.get_balance("prot-buyer-cash", "USD"), dec!(6000000.00));
    assert_eq!(engine.get_balance("prot-seller-cash", "USD"), dec!(-6000000.00));
    assert_eq!(engine.total_supply("USD"), Decimal::ZERO);
}

/// S6: yield curve bootstrap from (deposit, 0.25, 0.04) and (swap, 1, 0.05);
/// all AF-YC gates pass with forward_floor = -0.01, smoothness_bound = 10.
#[test]
fn s6_yield_curve_bootstrap_and_gates() {
    let quotes = vec![
        RateQuote { instrument_type: RateInstrumentType::Deposit, tenor: dec!(0.25), rate: dec!(0.04) },
        RateQuote { instrument_type: RateInstrumentType::Swap, tenor: dec!(1), rate: dec!(0.05) },
    ];
    let attestation = bootstrap_curve(&quotes, "USD", UtcDatetime::now(), "usd-ois-2025-06-15").unwrap();
    let curve = &attestation.value;

    let d_quarter = curve.discount_factor(dec!(0.25));
    let d_one = curve.discount_factor(dec!(1));
    assert!((d_quarter - Decimal::ONE / dec!(1.01)).abs() < dec!(0.00001));
    assert!((d_one - Decimal::ONE / dec!(1.05)).abs() < dec!(0.00001));

    let gates = check_yield_curve(curve, dec!(-0.01), dec!(10));
    assert!(gates.iter().all(|g| g.passed), "expected all AF-YC gates to pass: {gates:?}");
}

/// S7: single SVI slice, w(0) = 0.04 + 0.4*0.2 = 0.12, implied_vol(0,1) =
/// sqrt(0.12).
#[test]
fn s7_svi_surface_atm_variance_and_implied_vol() {
    let params = SviParameters::create(dec!(0.04), dec!(0.4), dec!(-0.4), Decimal::ZERO, dec!(0.2), Decimal::ONE).unwrap();

    let w_atm = svi_total_variance(&params, Decimal::ZERO);
    assert!((w_atm - dec!(0.12)).abs() < dec!(0.0000001));

    let vol = implied_vol_from_variance(w_atm, Decimal::ONE).unwrap();
    let expected = sqrt_d(dec!(0.12)).unwrap();
    assert!((vol - expected).abs() < dec!(0.0000001));
}
