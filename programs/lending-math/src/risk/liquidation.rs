//! Liquidation sizing
//!
//! How much debt a liquidator may repay against one collateral of a
//! (possibly multi-collateral) position, and how much of that collateral
//! they receive in return.
//!
//! The repay bound restores the position to exactly health 1:
//!
//! ```text
//! repay = (debt - Σ secured_i) / (1 - (1 + premium_t) * liqLtv_t)
//! ```
//!
//! The secured value is summed over ALL collaterals. Using only the target's
//! own secured value is wrong for multi-collateral positions.

use anchor_lang::prelude::*;
use rust_decimal::Decimal;
use crate::math::safe_math::{d_add, d_div, d_mul, d_sub, non_negative};
use crate::math::shares::debt_shares_to_assets;
use crate::risk::account::total_secured_value;
use crate::state::{Collateral, InterestRateParams};

/// Repay needed to bring a position back to health 1 by seizing `target`
///
/// Not clamped: negative when the position is already healthy.
/// When the denominator is exactly zero, no finite repay restores health;
/// the full collateral cap is reported if the position is short, else 0.
pub fn repay_to_restore(
    debt_assets: Decimal,
    total_secured: Decimal,
    target: &Collateral,
) -> Result<Decimal> {
    let liquidation_ltv = target.liquidation_ltv()?;
    let premium = target.liquidation_premium()?;

    let shortfall = d_sub(debt_assets, total_secured)?;
    let denominator = d_sub(
        Decimal::ONE,
        d_mul(d_add(Decimal::ONE, premium)?, liquidation_ltv)?,
    )?;

    if denominator.is_zero() {
        msg!("liquidation denominator is zero, falling back to collateral cap");
        return if shortfall > Decimal::ZERO {
            seizable_value(target)
        } else {
            Ok(Decimal::ZERO)
        };
    }

    d_div(shortfall, denominator)
}

/// Largest repay whose premium-inclusive seizure fits in `target`
///
/// `amount * price / (1 + premium)`
pub fn seizable_value(target: &Collateral) -> Result<Decimal> {
    let premium = target.liquidation_premium()?;
    d_div(target.value()?, d_add(Decimal::ONE, premium)?)
}

/// Maximum a liquidator may repay against `target_collateral`
///
/// # Arguments
/// * `debt_shares` .. `elapsed` - Borrower's debt and the pool it sits in
/// * `target_collateral` - Collateral the liquidator will seize
/// * `all_collaterals` - Every collateral of the position (including target)
///
/// Healthy positions return exactly 0.
#[allow(clippy::too_many_arguments)]
pub fn liquidator_max_repay(
    debt_shares: Decimal,
    open_interest: Decimal,
    total_debt_shares: Decimal,
    total_assets: Decimal,
    params: &InterestRateParams,
    elapsed: u64,
    target_collateral: &Collateral,
    all_collaterals: &[Collateral],
) -> Result<Decimal> {
    // Target ratios are checked before anything is computed
    target_collateral.liquidation_ltv()?;
    target_collateral.liquidation_premium()?;

    let debt_assets = debt_shares_to_assets(
        debt_shares,
        open_interest,
        total_debt_shares,
        total_assets,
        params,
        elapsed,
    )?;
    let total_secured = total_secured_value(all_collaterals)?;

    let restore = repay_to_restore(debt_assets, total_secured, target_collateral)?;
    let cap = seizable_value(target_collateral)?;

    Ok(non_negative(restore.min(cap)))
}

/// Collateral tokens handed to the liquidator for `repay_amount`
///
/// `(repay + repay * premium) / price`
pub fn collateral_to_transfer(repay_amount: Decimal, collateral: &Collateral) -> Result<Decimal> {
    let premium = collateral.liquidation_premium()?;
    let bonus = d_mul(repay_amount, premium)?;
    d_div(d_add(repay_amount, bonus)?, collateral.price)
}
