//! Fixed-point WAD (1e18) arithmetic operations
//!
//! All calculations use u128 with WAD scaling. This is the integer-only path
//! for callers that need results bit-identical to an on-chain program;
//! the Decimal formula layer is the default everywhere else.

use anchor_lang::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use crate::errors::LendingMathError;
use crate::constants::{TAYLOR_TERMS, WAD};
use super::safe_math::{checked_add, checked_mul};

const WAD_DECIMALS: u32 = 18;

/// Multiply then divide, rounding DOWN
/// Order: (a * b) / c
///
/// When `a * b` does not fit in u128 the larger operand is split around `c`:
/// `(x / c) * y + (x % c) * y / c`, which floors to the same value. Only a
/// quotient that itself exceeds u128 is an overflow.
pub fn mul_div_down(a: u128, b: u128, c: u128) -> Result<u128> {
    if c == 0 {
        return Err(LendingMathError::DivisionByZero.into());
    }

    if a == 0 || b == 0 {
        return Ok(0);
    }

    if let Some(product) = a.checked_mul(b) {
        return Ok(product / c);
    }

    let (x, y) = if a >= b { (a, b) } else { (b, a) };
    let whole = checked_mul(x / c, y)?;
    let fraction = checked_mul(x % c, y)? / c;
    checked_add(whole, fraction)
}

/// WAD multiplication (a * b / WAD), rounded down
#[inline]
pub fn wad_mul_down(a: u128, b: u128) -> Result<u128> {
    mul_div_down(a, b, WAD)
}

/// Compound interest factor using a six-term Taylor expansion
///
/// e^(rate * time) - 1 ≈ x + x²/2! + x³/3! + x⁴/4! + x⁵/5! + x⁶/6!
///
/// Each term is derived from the previous one (`term * x / k`), so the
/// result only depends on integer operations and is reproducible.
///
/// # Arguments
/// * `rate` - Per-second interest rate (WAD-scaled)
/// * `time` - Time elapsed in seconds
pub fn w_taylor_compounded(rate: u128, time: u128) -> Result<u128> {
    let x = checked_mul(rate, time)?;

    if x == 0 {
        return Ok(0);
    }

    let mut term = x;
    let mut sum = x;
    for k in 2..=TAYLOR_TERMS as u128 {
        term = wad_mul_down(term, x)? / k;
        if term == 0 {
            break;
        }
        sum = checked_add(sum, term)?;
    }

    Ok(sum)
}

/// Scale a Decimal into WAD, truncating digits beyond 1e-18
pub fn decimal_to_wad(value: Decimal) -> Result<u128> {
    require!(!value.is_sign_negative(), LendingMathError::MathUnderflow);

    let truncated = value.round_dp_with_strategy(WAD_DECIMALS, RoundingStrategy::ToZero);
    let mantissa = truncated.mantissa() as u128;
    let padding = 10u128.pow(WAD_DECIMALS - truncated.scale());
    checked_mul(mantissa, padding)
}

/// Convert a WAD-scaled integer back into a Decimal
pub fn wad_to_decimal(value: u128) -> Result<Decimal> {
    let whole = Decimal::try_from_i128_with_scale((value / WAD) as i128, 0)
        .map_err(|_| LendingMathError::MathOverflow)?;
    let fraction = Decimal::try_from_i128_with_scale((value % WAD) as i128, WAD_DECIMALS)
        .map_err(|_| LendingMathError::MathOverflow)?;
    whole
        .checked_add(fraction)
        .ok_or_else(|| LendingMathError::MathOverflow.into())
}
