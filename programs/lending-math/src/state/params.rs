//! Curve parameters supplied by the caller on every computation

use rust_decimal::Decimal;

/// Two-segment (kinked) interest rate curve
///
/// All fields are annual ratios, not percentages. Mirrors parameters that
/// can be updated out-of-band, so nothing here is cached between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InterestRateParams {
    /// Utilization kink point (e.g. 0.8 = 80%)
    pub ur_kink: Decimal,

    /// Base rate at 0% utilization
    pub base_ir: Decimal,

    /// Slope below kink
    pub slope1: Decimal,

    /// Slope above kink
    pub slope2: Decimal,
}

impl InterestRateParams {
    pub fn new(ur_kink: Decimal, base_ir: Decimal, slope1: Decimal, slope2: Decimal) -> Self {
        Self { ur_kink, base_ir, slope1, slope2 }
    }

    /// Stablecoin lending: 1% base, 4% below an 80% kink, 75% above
    pub fn stable() -> Self {
        Self::new(
            Decimal::new(80, 2),
            Decimal::new(1, 2),
            Decimal::new(4, 2),
            Decimal::new(75, 2),
        )
    }

    /// Volatile asset lending: 2% base, 8% below a 70% kink, 100% above
    pub fn volatile() -> Self {
        Self::new(
            Decimal::new(70, 2),
            Decimal::new(2, 2),
            Decimal::new(8, 2),
            Decimal::ONE,
        )
    }
}

/// Staking reward curve for the safety module
///
/// Same shape as `InterestRateParams`, evaluated on the staked ratio.
/// Slopes are usually negative so the reward decays as stake grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SafetyModuleParams {
    pub slope1: Decimal,
    pub slope2: Decimal,
    pub base_reward_rate: Decimal,
    pub staked_percentage_kink: Decimal,
}

impl SafetyModuleParams {
    pub fn new(
        slope1: Decimal,
        slope2: Decimal,
        base_reward_rate: Decimal,
        staked_percentage_kink: Decimal,
    ) -> Self {
        Self { slope1, slope2, base_reward_rate, staked_percentage_kink }
    }

    /// View as a rate curve keyed on the staked ratio
    pub fn as_curve(&self) -> InterestRateParams {
        InterestRateParams {
            ur_kink: self.staked_percentage_kink,
            base_ir: self.base_reward_rate,
            slope1: self.slope1,
            slope2: self.slope2,
        }
    }
}
