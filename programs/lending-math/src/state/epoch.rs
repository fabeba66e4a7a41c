//! Reward epochs and participation snapshots

use anchor_lang::prelude::*;
use rust_decimal::Decimal;
use crate::errors::LendingMathError;

/// A fixed reward-distribution window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Epoch {
    /// Unix timestamp (seconds) the epoch opens
    pub start_timestamp: i64,

    /// Unix timestamp (seconds) the epoch closes, strictly after start
    pub end_timestamp: i64,

    /// Rewards distributed across the whole epoch
    pub total_rewards: Decimal,

    /// Annual reward yield targeted for a fully used cap
    pub target_apr: Decimal,

    /// Liquidity cap the target APR is paid on
    pub cap: Decimal,
}

impl Epoch {
    /// Epoch length in seconds; zero or negative lengths are rejected
    pub fn duration(&self) -> Result<Decimal> {
        let seconds = self
            .end_timestamp
            .checked_sub(self.start_timestamp)
            .ok_or(LendingMathError::MathUnderflow)?;
        require!(seconds > 0, LendingMathError::InvalidEpochDuration);
        Ok(Decimal::from(seconds))
    }
}

/// One participant's pool share at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub timestamp: i64,
    pub user_lp_shares: Decimal,
    pub total_lp_shares: Decimal,
}

impl Snapshot {
    pub fn new(timestamp: i64, user_lp_shares: Decimal, total_lp_shares: Decimal) -> Self {
        Self { timestamp, user_lp_shares, total_lp_shares }
    }
}
