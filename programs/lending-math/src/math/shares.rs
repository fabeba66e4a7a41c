//! Share-based accounting for the lender (LP) and borrower (debt) pools
//!
//! Price per share = (pool anchor + accrued interest) / share count.
//!
//! | Pool | Anchor          | Interest counted          |
//! |------|-----------------|---------------------------|
//! | LP   | total assets    | net of the reserve cut    |
//! | Debt | open interest   | net of reserve (to shares), gross (to assets) |
//!
//! Interest is always accrued on open interest over `elapsed` seconds, so a
//! round trip holds when both legs use the same pool snapshot and `elapsed`.
//! It holds up to Decimal's 28 significant digits: `1 / 3` shares of a pool
//! come back as `0.9999999999999999999999999999`, so compare with a
//! tolerance, never `==`.

use anchor_lang::prelude::*;
use rust_decimal::Decimal;
use crate::state::InterestRateParams;
use super::interest::accrued_interest;
use super::safe_math::{d_add, d_div, d_mul, d_sub};

/// Accrued interest on open interest, less the protocol reserve cut
fn net_accrued_interest(
    open_interest: Decimal,
    total_assets: Decimal,
    reserve_pct: Decimal,
    params: &InterestRateParams,
    elapsed: u64,
) -> Result<Decimal> {
    let interest = accrued_interest(open_interest, open_interest, total_assets, params, elapsed)?;
    d_mul(interest, d_sub(Decimal::ONE, reserve_pct)?)
}

/// Convert deposited assets to LP shares
///
/// Formula: shares = assets * totalShares / (netInterest + totalAssets)
/// An empty pool mints nothing. The division rounds at the 28th significant
/// digit, so converting back may differ from `assets` in that last digit.
pub fn assets_to_lp_shares(
    assets: Decimal,
    total_shares: Decimal,
    total_assets: Decimal,
    open_interest: Decimal,
    reserve_pct: Decimal,
    params: &InterestRateParams,
    elapsed: u64,
) -> Result<Decimal> {
    if total_assets.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let interest = net_accrued_interest(open_interest, total_assets, reserve_pct, params, elapsed)?;
    let pool_value = d_add(interest, total_assets)?;
    d_div(d_mul(assets, total_shares)?, pool_value)
}

/// Convert LP shares back to assets
///
/// Formula: assets = shares * (netInterest + totalAssets) / totalShares
pub fn lp_shares_to_assets(
    shares: Decimal,
    total_shares: Decimal,
    total_assets: Decimal,
    open_interest: Decimal,
    reserve_pct: Decimal,
    params: &InterestRateParams,
    elapsed: u64,
) -> Result<Decimal> {
    if total_shares.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let interest = net_accrued_interest(open_interest, total_assets, reserve_pct, params, elapsed)?;
    let pool_value = d_add(interest, total_assets)?;
    d_div(d_mul(shares, pool_value)?, total_shares)
}

/// Convert borrowed assets to debt shares
///
/// Formula: shares = debtAssets * totalDebtShares / (netInterest + openInterest)
///
/// The denominator anchors on open interest: debt share price tracks the
/// loan book, not the deposit pool.
pub fn debt_assets_to_shares(
    debt_assets: Decimal,
    total_debt_shares: Decimal,
    total_assets: Decimal,
    open_interest: Decimal,
    reserve_pct: Decimal,
    params: &InterestRateParams,
    elapsed: u64,
) -> Result<Decimal> {
    if total_assets.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let interest = net_accrued_interest(open_interest, total_assets, reserve_pct, params, elapsed)?;
    let book_value = d_add(interest, open_interest)?;
    if book_value.is_zero() {
        // nothing borrowed yet, so there is no share price to quote against
        return Ok(Decimal::ZERO);
    }
    d_div(d_mul(debt_assets, total_debt_shares)?, book_value)
}

/// Convert debt shares to the assets currently owed
///
/// Formula: assets = debtShares * (openInterest + interest) / totalDebtShares
pub fn debt_shares_to_assets(
    debt_shares: Decimal,
    open_interest: Decimal,
    total_debt_shares: Decimal,
    total_assets: Decimal,
    params: &InterestRateParams,
    elapsed: u64,
) -> Result<Decimal> {
    if total_debt_shares.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let interest = accrued_interest(open_interest, open_interest, total_assets, params, elapsed)?;
    let book_value = d_add(open_interest, interest)?;
    d_div(d_mul(debt_shares, book_value)?, total_debt_shares)
}
