//! Time-weighted reward accrual over an epoch
//!
//! Each pair of consecutive snapshots is an interval. The interval's reward
//! is weighted by the share ratio at its LATER snapshot, i.e. the ratio a
//! participant reached is assumed to have held for the interval before it.

use anchor_lang::prelude::*;
use rust_decimal::Decimal;
use crate::constants::seconds_per_year;
use crate::errors::LendingMathError;
use crate::math::safe_math::{d_add, d_div, d_mul};
use crate::state::{Epoch, Snapshot};

fn share_ratio(snapshot: &Snapshot) -> Result<Decimal> {
    if snapshot.total_lp_shares.is_zero() {
        return Ok(Decimal::ZERO);
    }
    d_div(snapshot.user_lp_shares, snapshot.total_lp_shares)
}

/// Rewards a participant earned across `snapshots`
pub fn earned_rewards(epoch: &Epoch, snapshots: &[Snapshot]) -> Result<Decimal> {
    require!(snapshots.len() >= 2, LendingMathError::InsufficientSnapshots);
    let duration = epoch.duration()?;

    let mut earned = Decimal::ZERO;
    for pair in snapshots.windows(2) {
        let (prev, snapshot) = (&pair[0], &pair[1]);
        require!(
            snapshot.timestamp >= prev.timestamp,
            LendingMathError::SnapshotsOutOfOrder
        );

        let elapsed = snapshot
            .timestamp
            .checked_sub(prev.timestamp)
            .ok_or(LendingMathError::MathOverflow)?;
        let elapsed = Decimal::from(elapsed);
        let time_weight = d_div(elapsed, duration)?;
        let interval = d_mul(d_mul(epoch.total_rewards, time_weight)?, share_ratio(snapshot)?)?;
        earned = d_add(earned, interval)?;
    }

    Ok(earned)
}

/// Rewards needed to pay `target_apr` on the full cap for this epoch
pub fn total_lp_rewards(epoch: &Epoch) -> Result<Decimal> {
    let year_fraction = d_div(epoch.duration()?, seconds_per_year())?;
    d_mul(d_mul(epoch.target_apr, year_fraction)?, epoch.cap)
}

/// Simple-interest reward estimate for a deposit
pub fn estimated_rewards(deposit: Decimal, apr: Decimal, duration_seconds: i64) -> Result<Decimal> {
    require!(deposit > Decimal::ZERO, LendingMathError::NonPositiveDeposit);
    require!(apr >= Decimal::ZERO, LendingMathError::NegativeApr);
    require!(duration_seconds > 0, LendingMathError::NonPositiveDuration);

    let year_fraction = d_div(Decimal::from(duration_seconds), seconds_per_year())?;
    d_mul(d_mul(deposit, apr)?, year_fraction)
}

/// Annualized reward yield of an LP position held through the epoch
///
/// # Arguments
/// * `user_lp_shares` - Participant's shares, must be positive
/// * `total_lp_shares` - Pool shares the epoch rewards are split across
/// * `lp_share_value` - Value of one LP share in reward units
pub fn lp_reward_apr(
    epoch: &Epoch,
    user_lp_shares: Decimal,
    total_lp_shares: Decimal,
    lp_share_value: Decimal,
) -> Result<Decimal> {
    require!(user_lp_shares > Decimal::ZERO, LendingMathError::NonPositiveLpShares);
    require!(lp_share_value > Decimal::ZERO, LendingMathError::NonPositiveShareValue);
    let duration = epoch.duration()?;

    let user_rewards = d_div(d_mul(epoch.total_rewards, user_lp_shares)?, total_lp_shares)?;
    let position_value = d_mul(user_lp_shares, lp_share_value)?;
    let periods_per_year = d_div(seconds_per_year(), duration)?;
    d_mul(d_div(user_rewards, position_value)?, periods_per_year)
}
