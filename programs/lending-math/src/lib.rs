//! Collateralized lending math
//!
//! Deterministic formulas for a pooled lending protocol. Every function maps
//! numeric inputs (balances, rates, timestamps) to a numeric output or an
//! error; nothing reads or writes state, so all of it is safe to call from
//! any number of threads.
//!
//! ## Modules
//! - `math` - utilization, the kinked rate curve, compounding, share prices
//!   and the WAD fixed-point path
//! - `risk` - collateral value, LTVs, health, withdraw/borrow limits,
//!   liquidation sizing and leverage helpers
//! - `rewards` - epoch reward accrual and safety module staking rates
//! - `rate_limit` - daily cap token bucket

pub mod constants;
pub mod errors;
pub mod math;
pub mod state;
pub mod risk;
pub mod rewards;
pub mod rate_limit;

pub use errors::{ErrorKind, LendingMathError};
pub use state::*;
