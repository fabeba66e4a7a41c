//! Collateral positions
//!
//! A `Collateral` always carries an amount and a price. The risk ratios are
//! optional because not every operation needs them; operations that do
//! fetch them through the accessors below, which fail with the matching
//! missing-parameter error. Callers that want the failure at construction
//! time build positions from a `RiskParams` via `Collateral::with_risk`.

use anchor_lang::prelude::*;
use rust_decimal::Decimal;
use crate::errors::LendingMathError;
use crate::math::safe_math::d_mul;

/// Risk ratios that make a collateral usable for borrowing and liquidation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskParams {
    /// Max loan-to-value when opening or growing debt
    pub max_ltv: Decimal,

    /// LTV at which the position becomes liquidatable
    pub liquidation_ltv: Decimal,

    /// Bonus paid to liquidators on seized collateral (e.g. 0.05 = 5%)
    pub liquidation_premium: Decimal,
}

/// One deposited asset position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Collateral {
    /// Token amount deposited
    pub amount: Decimal,

    /// Price of one token in the market asset's unit
    pub price: Decimal,

    pub max_ltv: Option<Decimal>,
    pub liquidation_ltv: Option<Decimal>,
    pub liquidation_premium: Option<Decimal>,

    /// Protocol-wide supply cap for this asset, informational only
    pub cap: Option<Decimal>,
}

impl Collateral {
    pub fn new(amount: Decimal, price: Decimal) -> Self {
        Self { amount, price, ..Default::default() }
    }

    /// Fully parameterised position; risk accessors on it cannot fail
    pub fn with_risk(amount: Decimal, price: Decimal, risk: RiskParams) -> Self {
        Self {
            amount,
            price,
            max_ltv: Some(risk.max_ltv),
            liquidation_ltv: Some(risk.liquidation_ltv),
            liquidation_premium: Some(risk.liquidation_premium),
            cap: None,
        }
    }

    pub fn with_max_ltv(mut self, max_ltv: Decimal) -> Self {
        self.max_ltv = Some(max_ltv);
        self
    }

    pub fn with_liquidation_ltv(mut self, liquidation_ltv: Decimal) -> Self {
        self.liquidation_ltv = Some(liquidation_ltv);
        self
    }

    pub fn with_liquidation_premium(mut self, liquidation_premium: Decimal) -> Self {
        self.liquidation_premium = Some(liquidation_premium);
        self
    }

    pub fn with_cap(mut self, cap: Decimal) -> Self {
        self.cap = Some(cap);
        self
    }

    /// amount * price
    pub fn value(&self) -> Result<Decimal> {
        d_mul(self.amount, self.price)
    }

    pub fn max_ltv(&self) -> Result<Decimal> {
        self.max_ltv
            .ok_or_else(|| LendingMathError::MissingMaxLtv.into())
    }

    pub fn liquidation_ltv(&self) -> Result<Decimal> {
        self.liquidation_ltv
            .ok_or_else(|| LendingMathError::MissingLiquidationLtv.into())
    }

    pub fn liquidation_premium(&self) -> Result<Decimal> {
        self.liquidation_premium
            .ok_or_else(|| LendingMathError::MissingLiquidationPremium.into())
    }

    /// Validate all three risk ratios at once, failing on the first absent one
    pub fn risk_params(&self) -> Result<RiskParams> {
        Ok(RiskParams {
            max_ltv: self.max_ltv()?,
            liquidation_ltv: self.liquidation_ltv()?,
            liquidation_premium: self.liquidation_premium()?,
        })
    }

    /// amount * price * liquidation_ltv
    pub fn secured_value(&self) -> Result<Decimal> {
        d_mul(self.value()?, self.liquidation_ltv()?)
    }

    /// amount * price * max_ltv
    pub fn borrowable_value(&self) -> Result<Decimal> {
        d_mul(self.value()?, self.max_ltv()?)
    }
}

impl TryFrom<&Collateral> for RiskParams {
    type Error = anchor_lang::error::Error;

    fn try_from(collateral: &Collateral) -> Result<Self> {
        collateral.risk_params()
    }
}

/// Log which collateral in a list failed a risk lookup and pass the error on
pub(crate) fn at_index<T>(index: usize, result: Result<T>) -> Result<T> {
    if result.is_err() {
        msg!("collateral #{} is missing a required risk parameter", index);
    }
    result
}
