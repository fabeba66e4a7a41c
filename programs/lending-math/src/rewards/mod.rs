//! Reward accrual: LP epochs and the safety module

pub mod epoch;
pub mod safety_module;

pub use epoch::*;
pub use safety_module::*;
