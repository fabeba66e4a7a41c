//! Safe math utilities to prevent overflow/underflow
//!
//! Decimal helpers (`d_*`) back the formula layer; the u128 helpers back the
//! WAD fixed-point path. Nothing here panics on bad input.

use anchor_lang::prelude::*;
use rust_decimal::Decimal;
use crate::errors::LendingMathError;

/// Checked addition with custom error
#[inline]
pub fn checked_add(a: u128, b: u128) -> Result<u128> {
    a.checked_add(b).ok_or_else(|| LendingMathError::MathOverflow.into())
}

/// Checked multiplication with custom error
#[inline]
pub fn checked_mul(a: u128, b: u128) -> Result<u128> {
    a.checked_mul(b).ok_or_else(|| LendingMathError::MathOverflow.into())
}

/// Checked division with custom error
#[inline]
pub fn checked_div(a: u128, b: u128) -> Result<u128> {
    if b == 0 {
        return Err(LendingMathError::DivisionByZero.into());
    }
    Ok(a / b)
}

/// Checked Decimal addition
#[inline]
pub fn d_add(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_add(b).ok_or_else(|| LendingMathError::MathOverflow.into())
}

/// Checked Decimal subtraction
///
/// Negative results are legal; only magnitude overflow errors.
#[inline]
pub fn d_sub(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_sub(b).ok_or_else(|| LendingMathError::MathUnderflow.into())
}

/// Checked Decimal multiplication
#[inline]
pub fn d_mul(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_mul(b).ok_or_else(|| LendingMathError::MathOverflow.into())
}

/// Checked Decimal division
#[inline]
pub fn d_div(a: Decimal, b: Decimal) -> Result<Decimal> {
    if b.is_zero() {
        return Err(LendingMathError::DivisionByZero.into());
    }
    a.checked_div(b).ok_or_else(|| LendingMathError::MathOverflow.into())
}

/// Clamp a Decimal at zero from below
#[inline]
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
