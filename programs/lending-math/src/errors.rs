use anchor_lang::prelude::*;

#[error_code]
pub enum LendingMathError {
    // === Missing Parameter Errors (6000-6009) ===
    #[msg("Collateral is missing its max LTV")]
    MissingMaxLtv = 6000,

    #[msg("Collateral is missing its liquidation LTV")]
    MissingLiquidationLtv = 6001,

    #[msg("Collateral is missing its liquidation premium")]
    MissingLiquidationPremium = 6002,

    // === Invalid Domain Errors (6010-6039) ===
    #[msg("Slippage must be in [0, 1)")]
    InvalidSlippage = 6010,

    #[msg("Max LTV must be in (0, 1)")]
    InvalidMaxLtv = 6011,

    #[msg("Health is undefined for a position without debt")]
    ZeroDebt = 6012,

    #[msg("Epoch end must be after epoch start")]
    InvalidEpochDuration = 6013,

    #[msg("LP shares must be greater than zero")]
    NonPositiveLpShares = 6014,

    #[msg("Deposit must be greater than zero")]
    NonPositiveDeposit = 6015,

    #[msg("APR cannot be negative")]
    NegativeApr = 6016,

    #[msg("Duration must be greater than zero")]
    NonPositiveDuration = 6017,

    #[msg("Reset window must be greater than zero")]
    InvalidResetWindow = 6018,

    #[msg("Snapshots must be ordered by timestamp")]
    SnapshotsOutOfOrder = 6019,

    #[msg("LP share value must be greater than zero")]
    NonPositiveShareValue = 6020,

    #[msg("Amount exceeds remaining cap")]
    CapExceeded = 6021,

    // === Insufficient Data Errors (6040-6049) ===
    #[msg("At least two snapshots are required")]
    InsufficientSnapshots = 6040,

    // === Math Errors (6120-6139) ===
    #[msg("Math overflow")]
    MathOverflow = 6120,

    #[msg("Math underflow")]
    MathUnderflow = 6121,

    #[msg("Division by zero")]
    DivisionByZero = 6122,
}

/// Coarse classification of a `LendingMathError`
///
/// Every kind except `Arithmetic` is a caller-input error; none are retryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingParameter,
    InvalidDomain,
    InsufficientData,
    Arithmetic,
}

impl LendingMathError {
    pub fn kind(&self) -> ErrorKind {
        use LendingMathError::*;
        match self {
            MissingMaxLtv | MissingLiquidationLtv | MissingLiquidationPremium => {
                ErrorKind::MissingParameter
            }
            InvalidSlippage
            | InvalidMaxLtv
            | ZeroDebt
            | InvalidEpochDuration
            | NonPositiveLpShares
            | NonPositiveDeposit
            | NegativeApr
            | NonPositiveDuration
            | InvalidResetWindow
            | SnapshotsOutOfOrder
            | NonPositiveShareValue
            | CapExceeded => ErrorKind::InvalidDomain,
            InsufficientSnapshots => ErrorKind::InsufficientData,
            MathOverflow | MathUnderflow | DivisionByZero => ErrorKind::Arithmetic,
        }
    }
}

/// Assert that `result` failed with exactly `expected`
#[cfg(test)]
pub(crate) fn assert_error<T: std::fmt::Debug>(result: Result<T>, expected: LendingMathError) {
    let expected: anchor_lang::error::Error = expected.into();
    assert_eq!(result.unwrap_err(), expected);
}
