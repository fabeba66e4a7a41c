//! Account-level collateral and risk metrics
//!
//! Every collateral list is value-weighted by `amount * price`. Functions
//! that need a risk ratio fail on the first collateral missing it.

use anchor_lang::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use crate::constants::{seconds_per_year, REPAY_BUFFER_SECONDS, WITHDRAW_WINDOW_SECONDS};
use crate::errors::LendingMathError;
use crate::math::irm::pool_annualized_rate;
use crate::math::safe_math::{d_add, d_div, d_mul, d_sub, non_negative};
use crate::math::shares::debt_shares_to_assets;
use crate::state::collateral::at_index;
use crate::state::{Collateral, InterestRateParams};

/// Σ value_i * ratio_i, plus Σ value_i
fn weighted_sums<F>(collaterals: &[Collateral], ratio: F) -> Result<(Decimal, Decimal)>
where
    F: Fn(&Collateral) -> Result<Decimal>,
{
    let mut weighted = Decimal::ZERO;
    let mut total_value = Decimal::ZERO;

    for (index, collateral) in collaterals.iter().enumerate() {
        let r = at_index(index, ratio(collateral))?;
        let value = collateral.value()?;
        weighted = d_add(weighted, d_mul(value, r)?)?;
        total_value = d_add(total_value, value)?;
    }

    Ok((weighted, total_value))
}

fn value_weighted_average<F>(collaterals: &[Collateral], ratio: F) -> Result<Decimal>
where
    F: Fn(&Collateral) -> Result<Decimal>,
{
    let (weighted, total_value) = weighted_sums(collaterals, ratio)?;
    if total_value.is_zero() {
        return Ok(Decimal::ZERO);
    }
    d_div(weighted, total_value)
}

/// Σ amount * price
pub fn total_collateral_value(collaterals: &[Collateral]) -> Result<Decimal> {
    collaterals
        .iter()
        .try_fold(Decimal::ZERO, |acc, c| d_add(acc, c.value()?))
}

/// Σ amount * price * liquidation_ltv
pub fn total_secured_value(collaterals: &[Collateral]) -> Result<Decimal> {
    weighted_sums(collaterals, Collateral::liquidation_ltv).map(|(secured, _)| secured)
}

/// Debt / collateral value, 0 with no collateral
pub fn account_ltv(total_debt: Decimal, collaterals: &[Collateral]) -> Result<Decimal> {
    let value = total_collateral_value(collaterals)?;
    if value.is_zero() {
        return Ok(Decimal::ZERO);
    }
    d_div(total_debt, value)
}

/// Value-weighted max LTV across collaterals
pub fn account_max_ltv(collaterals: &[Collateral]) -> Result<Decimal> {
    value_weighted_average(collaterals, Collateral::max_ltv)
}

/// Value-weighted liquidation LTV across collaterals
pub fn account_liq_ltv(collaterals: &[Collateral]) -> Result<Decimal> {
    value_weighted_average(collaterals, Collateral::liquidation_ltv)
}

/// Health factor = secured value / debt
///
/// Below 1 the position is liquidatable. Health of a debt-free position is
/// undefined and rejected rather than reported as infinity.
pub fn account_health(collaterals: &[Collateral], current_debt: Decimal) -> Result<Decimal> {
    require!(!current_debt.is_zero(), LendingMathError::ZeroDebt);
    d_div(total_secured_value(collaterals)?, current_debt)
}

/// Whether health has fallen below 1; a debt-free position never is
pub fn is_liquidatable(collaterals: &[Collateral], current_debt: Decimal) -> Result<bool> {
    if current_debt.is_zero() {
        return Ok(false);
    }
    Ok(account_health(collaterals, current_debt)? < Decimal::ONE)
}

/// Fractional collateral price drop that would trigger liquidation
///
/// `1 - debt / secured value`; 0 when nothing is secured.
pub fn drop_to_liquidation(collaterals: &[Collateral], current_debt: Decimal) -> Result<Decimal> {
    let secured = total_secured_value(collaterals)?;
    if secured.is_zero() {
        return Ok(Decimal::ZERO);
    }
    d_sub(Decimal::ONE, d_div(current_debt, secured)?)
}

/// Σ amount * price * max_ltv
pub fn borrow_capacity(collaterals: &[Collateral]) -> Result<Decimal> {
    weighted_sums(collaterals, Collateral::max_ltv).map(|(capacity, _)| capacity)
}

/// Share of borrow capacity in use, 0 with no capacity
pub fn collateral_usage(total_debt: Decimal, collaterals: &[Collateral]) -> Result<Decimal> {
    let capacity = borrow_capacity(collaterals)?;
    if capacity.is_zero() {
        return Ok(Decimal::ZERO);
    }
    d_div(total_debt, capacity)
}

/// Collateral value at which the current debt hits the liquidation LTV
pub fn liquidation_point(
    account_liq_ltv: Decimal,
    debt_shares: Decimal,
    open_interest: Decimal,
    total_debt_shares: Decimal,
    total_assets: Decimal,
    params: &InterestRateParams,
    elapsed: u64,
) -> Result<Decimal> {
    if account_liq_ltv.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let debt = debt_shares_to_assets(
        debt_shares,
        open_interest,
        total_debt_shares,
        total_assets,
        params,
        elapsed,
    )?;
    d_div(debt, account_liq_ltv)
}

/// Largest amount of `collateral_to_withdraw` that keeps the position
/// within its max LTV ten minutes from now
///
/// See `max_withdraw_amount_with_window`.
#[allow(clippy::too_many_arguments)]
pub fn max_withdraw_amount(
    collateral_to_withdraw: &Collateral,
    all_collaterals: &[Collateral],
    debt_shares: Decimal,
    open_interest: Decimal,
    total_debt_shares: Decimal,
    total_assets: Decimal,
    params: &InterestRateParams,
    elapsed: u64,
    decimals: u32,
) -> Result<Decimal> {
    max_withdraw_amount_with_window(
        collateral_to_withdraw,
        all_collaterals,
        debt_shares,
        open_interest,
        total_debt_shares,
        total_assets,
        params,
        elapsed,
        decimals,
        WITHDRAW_WINDOW_SECONDS,
    )
}

/// Largest withdrawable amount with an explicit look-ahead window
///
/// Debt is projected `elapsed + future_window` seconds forward, the
/// collateral value it requires at the target's max LTV is reserved, and
/// the excess is converted to tokens, floored to `decimals` and clamped to
/// `[0, amount]`. A debt-free position can withdraw everything.
#[allow(clippy::too_many_arguments)]
pub fn max_withdraw_amount_with_window(
    collateral_to_withdraw: &Collateral,
    all_collaterals: &[Collateral],
    debt_shares: Decimal,
    open_interest: Decimal,
    total_debt_shares: Decimal,
    total_assets: Decimal,
    params: &InterestRateParams,
    elapsed: u64,
    decimals: u32,
    future_window: u64,
) -> Result<Decimal> {
    let amount = collateral_to_withdraw.amount;
    if debt_shares.is_zero() {
        return Ok(amount);
    }

    let max_ltv = collateral_to_withdraw.max_ltv()?;
    require!(max_ltv > Decimal::ZERO, LendingMathError::InvalidMaxLtv);

    // worthless collateral backs nothing, so removing it changes nothing
    if collateral_to_withdraw.price.is_zero() {
        return Ok(amount);
    }

    let horizon = elapsed
        .checked_add(future_window)
        .ok_or(LendingMathError::MathOverflow)?;
    let future_debt = debt_shares_to_assets(
        debt_shares,
        open_interest,
        total_debt_shares,
        total_assets,
        params,
        horizon,
    )?;

    let required_value = d_div(future_debt, max_ltv)?;
    let excess_value = d_sub(total_collateral_value(all_collaterals)?, required_value)?;
    let tokens = d_div(excess_value, collateral_to_withdraw.price)?
        .round_dp_with_strategy(decimals, RoundingStrategy::ToNegativeInfinity);

    Ok(non_negative(tokens).min(amount))
}

/// Liquidity the protocol can lend after keeping its reserve
pub fn protocol_available_to_borrow(
    free_liquidity: Decimal,
    reserve_balance: Decimal,
) -> Result<Decimal> {
    Ok(non_negative(d_sub(free_liquidity, reserve_balance)?))
}

/// What this account may borrow: its unused capacity, bounded by the
/// protocol's lendable liquidity
pub fn user_available_to_borrow(
    collaterals: &[Collateral],
    free_liquidity: Decimal,
    reserve_balance: Decimal,
    current_debt: Decimal,
) -> Result<Decimal> {
    let protocol_available = protocol_available_to_borrow(free_liquidity, reserve_balance)?;
    let headroom = non_negative(d_sub(borrow_capacity(collaterals)?, current_debt)?);
    Ok(protocol_available.min(headroom))
}

/// Current debt plus ten minutes of simple interest at today's rate
///
/// Quoted so a repay submitted now still clears the debt when it lands.
pub fn max_repay_amount(
    debt_shares: Decimal,
    open_interest: Decimal,
    total_debt_shares: Decimal,
    total_assets: Decimal,
    params: &InterestRateParams,
    elapsed: u64,
) -> Result<Decimal> {
    let debt = debt_shares_to_assets(
        debt_shares,
        open_interest,
        total_debt_shares,
        total_assets,
        params,
        elapsed,
    )?;
    let apr = pool_annualized_rate(open_interest, total_assets, params)?;
    let buffer = d_mul(
        d_div(apr, seconds_per_year())?,
        Decimal::from(REPAY_BUFFER_SECONDS),
    )?;
    d_mul(debt, d_add(Decimal::ONE, buffer)?)
}
