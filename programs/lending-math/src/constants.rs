//! Protocol constants shared by every formula group

use rust_decimal::Decimal;

// === Fixed-Point Constants ===

/// WAD = 1e18 (standard DeFi fixed-point)
pub const WAD: u128 = 1_000_000_000_000_000_000;

// === Time Constants ===

/// Seconds per year for rate conversions (365 days, no leap adjustment)
///
/// Must match on-chain logic being mirrored bit for bit.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Forward buffer applied to repay quotes (10 minutes)
pub const REPAY_BUFFER_SECONDS: u64 = 600;

/// Default look-ahead when projecting debt for a collateral withdrawal
pub const WITHDRAW_WINDOW_SECONDS: u64 = 600;

// === Series Constants ===

/// Number of terms used by the fixed-point Taylor expansion of e^x - 1
pub const TAYLOR_TERMS: u32 = 6;

/// `SECONDS_PER_YEAR` as a `Decimal`
#[inline]
pub fn seconds_per_year() -> Decimal {
    Decimal::from(SECONDS_PER_YEAR)
}
