//! Leverage helpers
//!
//! Bookkeeping for building a looped position with a flash loan: how far
//! leverage can go, how much headroom is left, and what swap slippage
//! costs along the way.

use anchor_lang::prelude::*;
use rust_decimal::Decimal;
use crate::errors::LendingMathError;
use crate::math::safe_math::{d_add, d_div, d_mul, d_sub};
use crate::math::shares::debt_shares_to_assets;
use crate::state::{Collateral, InterestRateParams};

/// Flash loan sizing for one leverage step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashLoanValues {
    /// Amount to flash borrow, swap loss included
    pub flash_loan_value: Decimal,
    /// Swap loss as a fraction of the flash loan
    pub slippage: Decimal,
}

fn require_slippage(slippage: Decimal) -> Result<()> {
    require!(
        slippage >= Decimal::ZERO && slippage < Decimal::ONE,
        LendingMathError::InvalidSlippage
    );
    Ok(())
}

/// Theoretical leverage ceiling `1 / (1 - max_ltv)` from infinite looping
pub fn absolute_max_leverage(max_ltv: Decimal) -> Result<Decimal> {
    require!(
        max_ltv > Decimal::ZERO && max_ltv < Decimal::ONE,
        LendingMathError::InvalidMaxLtv
    );
    d_div(Decimal::ONE, d_sub(Decimal::ONE, max_ltv)?)
}

/// Max LTV after paying the flash loan fee and swap slippage
pub fn corrected_max_ltv(
    collateral: &Collateral,
    flash_loan_fee: Decimal,
    slippage: Decimal,
) -> Result<Decimal> {
    let haircut = d_sub(d_sub(Decimal::ONE, flash_loan_fee)?, slippage)?;
    d_mul(haircut, collateral.max_ltv()?)
}

/// Collateral value not needed to back current debt at `corrected_max_ltv`
///
/// Negative when the position is already past the corrected limit.
#[allow(clippy::too_many_arguments)]
pub fn unencumbered_collateral(
    debt_shares: Decimal,
    open_interest: Decimal,
    total_debt_shares: Decimal,
    total_assets: Decimal,
    params: &InterestRateParams,
    elapsed: u64,
    collateral: &Collateral,
    corrected_max_ltv: Decimal,
) -> Result<Decimal> {
    require!(corrected_max_ltv > Decimal::ZERO, LendingMathError::InvalidMaxLtv);

    let debt = debt_shares_to_assets(
        debt_shares,
        open_interest,
        total_debt_shares,
        total_assets,
        params,
        elapsed,
    )?;
    d_sub(collateral.value()?, d_div(debt, corrected_max_ltv)?)
}

/// Expected swap loss when levering `collateral_value` up to `leverage`
pub fn leverage_max_slippage(
    collateral_value: Decimal,
    leverage: Decimal,
    slippage: Decimal,
) -> Result<Decimal> {
    require_slippage(slippage)?;

    let new_collateral_value = d_mul(collateral_value, d_sub(leverage, Decimal::ONE)?)?;
    let loss_ratio = d_div(slippage, d_sub(Decimal::ONE, slippage)?)?;
    d_mul(new_collateral_value, loss_ratio)
}

/// Value lost between the flash loan and the swap quote
///
/// `flash_loan_amount - quote_received * collateral_price / market_asset_price`
pub fn swap_loss(
    flash_loan_amount: Decimal,
    quote_received: Decimal,
    collateral_price: Decimal,
    market_asset_price: Decimal,
) -> Result<Decimal> {
    let received_value = d_div(d_mul(quote_received, collateral_price)?, market_asset_price)?;
    d_sub(flash_loan_amount, received_value)
}

/// Flash loan needed to add `new_collateral_value` after `swap_loss`
pub fn flash_loan_values(new_collateral_value: Decimal, swap_loss: Decimal) -> Result<FlashLoanValues> {
    let flash_loan_value = d_add(new_collateral_value, swap_loss)?;
    let slippage = if flash_loan_value.is_zero() {
        Decimal::ZERO
    } else {
        d_div(swap_loss, flash_loan_value)?
    };

    Ok(FlashLoanValues { flash_loan_value, slippage })
}
