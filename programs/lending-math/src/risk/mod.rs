//! Collateral risk, liquidation sizing and leverage

pub mod account;
pub mod liquidation;
pub mod leverage;

pub use account::*;
pub use liquidation::*;
pub use leverage::*;
