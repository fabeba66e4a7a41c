//! Safety module staking rewards
//!
//! Reuses the kinked rate curve, keyed on the fraction of supply staked.

use anchor_lang::prelude::*;
use rust_decimal::Decimal;
use crate::math::irm::annualized_rate;
use crate::math::safe_math::d_div;
use crate::state::SafetyModuleParams;

/// Fraction of token supply currently staked, 0 with no supply
pub fn staked_percentage(total_staked: Decimal, total_supply: Decimal) -> Result<Decimal> {
    if total_supply.is_zero() {
        return Ok(Decimal::ZERO);
    }
    d_div(total_staked, total_supply)
}

/// Annual staking reward rate at `staked_percentage`
pub fn staking_reward_rate(staked_percentage: Decimal, params: &SafetyModuleParams) -> Result<Decimal> {
    annualized_rate(staked_percentage, &params.as_curve())
}
