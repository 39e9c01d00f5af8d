//! Foundational types: investment options and catalogs, price scenarios
//! and bounds, discounting bases, the payback sentinel.

pub mod discount;
pub mod investment;
pub mod payback;
pub mod scenario;
