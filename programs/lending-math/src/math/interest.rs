//! Compounding engine
//!
//! Debt grows per second: `principal * (1 + rate / SECONDS_PER_YEAR)^elapsed`,
//! a discrete approximation of continuous growth. The power is taken by
//! square-and-multiply over `Decimal`, so every platform computes the same
//! digits.
//!
//! The `_wad` variants run the same accrual over u128 WAD integers with a
//! Taylor expansion of e^(rt) - 1 for callers mirroring on-chain math.

use anchor_lang::prelude::*;
use rust_decimal::Decimal;
use crate::constants::{seconds_per_year, SECONDS_PER_YEAR};
use crate::errors::LendingMathError;
use crate::state::InterestRateParams;
use super::irm::pool_annualized_rate;
use super::safe_math::{checked_add, checked_div, d_add, d_div, d_mul, d_sub};
use super::wad::{decimal_to_wad, w_taylor_compounded, wad_mul_down};

/// Raise `base` to an integer power by repeated squaring
pub fn checked_pow(base: Decimal, exp: u64) -> Result<Decimal> {
    let mut result = Decimal::ONE;
    let mut square = base;
    let mut remaining = exp;

    while remaining > 0 {
        if remaining & 1 == 1 {
            result = result
                .checked_mul(square)
                .ok_or(LendingMathError::MathOverflow)?;
        }
        remaining >>= 1;
        if remaining > 0 {
            square = square
                .checked_mul(square)
                .ok_or(LendingMathError::MathOverflow)?;
        }
    }

    Ok(result)
}

/// Growth factor `(1 + annual_rate / SECONDS_PER_YEAR)^elapsed`
pub fn interest_factor(annual_rate: Decimal, elapsed: u64) -> Result<Decimal> {
    let per_second = d_div(annual_rate, seconds_per_year())?;
    checked_pow(d_add(Decimal::ONE, per_second)?, elapsed)
}

/// Principal plus interest after `elapsed` seconds at the pool's current rate
///
/// # Arguments
/// * `principal` - Amount the interest is charged on
/// * `open_interest` - Outstanding borrows, drives utilization
/// * `total_assets` - Pool deposits
/// * `params` - Rate curve
/// * `elapsed` - Seconds since the last accrual
pub fn due_amount(
    principal: Decimal,
    open_interest: Decimal,
    total_assets: Decimal,
    params: &InterestRateParams,
    elapsed: u64,
) -> Result<Decimal> {
    if elapsed == 0 || principal.is_zero() {
        return Ok(principal);
    }

    let rate = pool_annualized_rate(open_interest, total_assets, params)?;
    d_mul(principal, interest_factor(rate, elapsed)?)
}

/// Interest-only component of `due_amount`
///
/// `due_amount - principal`, computed from the same factor so that
/// `due_amount - accrued_interest == principal` holds exactly.
pub fn accrued_interest(
    principal: Decimal,
    open_interest: Decimal,
    total_assets: Decimal,
    params: &InterestRateParams,
    elapsed: u64,
) -> Result<Decimal> {
    let due = due_amount(principal, open_interest, total_assets, params, elapsed)?;
    d_sub(due, principal)
}

/// Pool's annualized rate scaled to WAD
pub fn annual_rate_wad(
    open_interest: Decimal,
    total_assets: Decimal,
    params: &InterestRateParams,
) -> Result<u128> {
    decimal_to_wad(pool_annualized_rate(open_interest, total_assets, params)?)
}

/// Interest on `principal` using the fixed-point Taylor path
///
/// # Arguments
/// * `principal` - Amount in token base units or WAD-scaled; the result
///   uses the same scale
/// * `annual_rate` - Yearly rate (WAD-scaled)
/// * `elapsed` - Seconds since the last accrual
pub fn accrued_interest_wad(principal: u128, annual_rate: u128, elapsed: u64) -> Result<u128> {
    if elapsed == 0 || principal == 0 {
        return Ok(0);
    }

    let per_second = checked_div(annual_rate, SECONDS_PER_YEAR as u128)?;
    let factor = w_taylor_compounded(per_second, elapsed as u128)?;
    wad_mul_down(principal, factor)
}

/// Principal plus interest using the fixed-point Taylor path
pub fn due_amount_wad(principal: u128, annual_rate: u128, elapsed: u64) -> Result<u128> {
    checked_add(principal, accrued_interest_wad(principal, annual_rate, elapsed)?)
}
