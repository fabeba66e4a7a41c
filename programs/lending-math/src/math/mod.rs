//! Math library modules: safe arithmetic, rates, compounding and shares

pub mod safe_math;
pub mod wad;
pub mod irm;
pub mod interest;
pub mod shares;

pub use safe_math::*;
pub use wad::*;
pub use irm::*;
pub use interest::*;
pub use shares::*;
