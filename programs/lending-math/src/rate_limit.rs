//! Adaptive daily cap
//!
//! A token bucket sized as a fraction of pool liquidity that refills
//! linearly over `reset_window` seconds. Used to throttle actions such as
//! daily withdrawals or borrows.

use anchor_lang::prelude::*;
use rust_decimal::Decimal;
use crate::errors::LendingMathError;
use crate::math::safe_math::{d_add, d_div, d_mul, d_sub};

/// Bucket level after `elapsed` seconds of refill
///
/// # Arguments
/// * `cap_factor` - Bucket size as a fraction of `total_liquidity`
/// * `current_value` - Level at the last update
/// * `total_liquidity` - Pool liquidity the cap is sized against
/// * `elapsed` - Seconds since the last update
/// * `reset_window` - Seconds for an empty bucket to refill completely
pub fn refill_bucket(
    cap_factor: Decimal,
    current_value: Decimal,
    total_liquidity: Decimal,
    elapsed: u64,
    reset_window: u64,
) -> Result<Decimal> {
    require!(reset_window > 0, LendingMathError::InvalidResetWindow);

    let max_bucket = d_mul(total_liquidity, cap_factor)?;
    let refill = if elapsed > reset_window {
        max_bucket
    } else {
        d_div(
            d_mul(max_bucket, Decimal::from(elapsed))?,
            Decimal::from(reset_window),
        )?
    };

    Ok(max_bucket.min(d_add(current_value, refill)?))
}

/// Bucket level after spending `amount`, rejected if the bucket is too low
pub fn consume_from_bucket(current_value: Decimal, amount: Decimal) -> Result<Decimal> {
    require!(amount <= current_value, LendingMathError::CapExceeded);
    d_sub(current_value, amount)
}
