//! Plain value types shared by every formula group

pub mod params;
pub mod collateral;
pub mod epoch;

pub use params::*;
pub use collateral::*;
pub use epoch::*;
