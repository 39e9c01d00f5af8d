//! Catalog evaluation and price sensitivity analysis.

pub mod evaluation;
pub mod sensitivity;
