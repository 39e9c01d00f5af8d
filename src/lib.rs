//! # appraisal-engine
//!
//! Open investment appraisal and energy price sensitivity engine.
//!
//! Given a catalog of capital investment options and a market-price
//! scenario for electricity and gas, this engine computes each option's
//! annual net savings, net present value and payback period, and can sweep
//! one price axis to show how those metrics respond.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: investment options and catalogs, price
//!   scenarios and bounds, discounting bases, the payback sentinel
//! - **analysis** — Catalog evaluation and price sensitivity sweeps
//! - **fixtures** — Random catalog generation for benchmarks and demos

pub mod analysis;
pub mod core;
pub mod fixtures;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::analysis::evaluation::{AppraisalEngine, CatalogEvaluation, EvaluationResult};
    pub use crate::analysis::sensitivity::{SensitivitySweep, SweepPoint};
    pub use crate::core::discount::DiscountBasis;
    pub use crate::core::investment::{GasSavings, InvestmentCatalog, InvestmentOption};
    pub use crate::core::payback::Payback;
    pub use crate::core::scenario::{PriceAxis, PriceRange, PriceScenario, ScenarioBounds};
}
