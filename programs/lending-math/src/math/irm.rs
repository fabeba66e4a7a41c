//! Interest rate model
//!
//! Utilization and the kinked annual rate curve. Rates are annual ratios;
//! `borrow_rate_per_second` converts for per-second compounding.
//!
//! Example: 5% APY ≈ 1.585e-9 per second

use anchor_lang::prelude::*;
use rust_decimal::Decimal;
use crate::constants::seconds_per_year;
use crate::state::InterestRateParams;
use super::safe_math::{d_add, d_div, d_mul, d_sub};

/// Utilization = open interest / total assets
///
/// An empty pool is reported as 0% utilized rather than an error.
/// The result may exceed 1 when bad debt or reserves shrink assets.
pub fn utilization_rate(open_interest: Decimal, total_assets: Decimal) -> Result<Decimal> {
    if total_assets.is_zero() {
        return Ok(Decimal::ZERO);
    }
    d_div(open_interest, total_assets)
}

/// Annualized rate on the two-segment curve
///
/// Below kink: `slope1 * ur + base`
/// Above kink: `slope2 * (ur - kink) + slope1 * kink + base`
///
/// Continuous at the kink. Parameters are not validated: negative slopes
/// are used by the staking curve.
pub fn annualized_rate(ur: Decimal, params: &InterestRateParams) -> Result<Decimal> {
    if ur < params.ur_kink {
        return d_add(d_mul(params.slope1, ur)?, params.base_ir);
    }

    let rate_at_kink = d_add(d_mul(params.slope1, params.ur_kink)?, params.base_ir)?;
    let excess = d_sub(ur, params.ur_kink)?;
    d_add(d_mul(params.slope2, excess)?, rate_at_kink)
}

/// Annualized rate for the current pool state
pub fn pool_annualized_rate(
    open_interest: Decimal,
    total_assets: Decimal,
    params: &InterestRateParams,
) -> Result<Decimal> {
    annualized_rate(utilization_rate(open_interest, total_assets)?, params)
}

/// Per-second rate, uncompounded
pub fn borrow_rate_per_second(ur: Decimal, params: &InterestRateParams) -> Result<Decimal> {
    d_div(annualized_rate(ur, params)?, seconds_per_year())
}
