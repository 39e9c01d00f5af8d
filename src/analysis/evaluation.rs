use crate::core::investment::{InvestmentCatalog, InvestmentOption};
use crate::core::payback::Payback;
use crate::core::scenario::{PriceScenario, ScenarioBounds, ScenarioError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Appraisal of a single investment option under one price scenario.
///
/// Plain data, recomputed on every call and never cached across scenarios.
/// `net_savings` is the canonical zero-floored figure that NPV and payback
/// are derived from; `net_savings_unclamped` keeps the raw value for
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub investment_name: String,
    /// Canonical annual net savings, floored at zero.
    pub net_savings: Decimal,
    /// Annual net savings before the zero floor.
    pub net_savings_unclamped: Decimal,
    /// Net present value of the savings stream.
    pub npv: Decimal,
    /// Years to break even, or the unbounded sentinel.
    pub payback: Payback,
}

impl EvaluationResult {
    /// Appraise one option under one scenario.
    pub fn for_option(option: &InvestmentOption, scenario: &PriceScenario) -> Self {
        let net_savings_unclamped = option.annual_net_savings_unclamped(scenario);
        let net_savings = net_savings_unclamped.max(Decimal::ZERO);
        let npv = option.discount().npv(net_savings);
        let payback = Payback::compute(option.cost(), net_savings);
        Self {
            investment_name: option.name().to_string(),
            net_savings,
            net_savings_unclamped,
            npv,
            payback,
        }
    }

    /// True when the option actually saves money under its scenario.
    pub fn is_viable(&self) -> bool {
        self.net_savings > Decimal::ZERO
    }
}

/// Results of appraising a whole catalog under one scenario.
///
/// Result order matches catalog order exactly. The series accessors hand a
/// rendering layer the plain sequences a comparative display needs, without
/// tying the engine to any charting technology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEvaluation {
    scenario: PriceScenario,
    results: Vec<EvaluationResult>,
}

impl CatalogEvaluation {
    /// The scenario this evaluation ran under.
    pub fn scenario(&self) -> PriceScenario {
        self.scenario
    }

    /// Per-option results in catalog order.
    pub fn results(&self) -> &[EvaluationResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Result for a specific option, if it was in the catalog.
    pub fn get(&self, investment_name: &str) -> Option<&EvaluationResult> {
        self.results
            .iter()
            .find(|result| result.investment_name == investment_name)
    }

    /// Option names in catalog order.
    pub fn investment_names(&self) -> Vec<&str> {
        self.results
            .iter()
            .map(|result| result.investment_name.as_str())
            .collect()
    }

    /// NPV per option, in catalog order.
    pub fn npv_values(&self) -> Vec<Decimal> {
        self.results.iter().map(|result| result.npv).collect()
    }

    /// Payback per option, in catalog order.
    pub fn payback_values(&self) -> Vec<Payback> {
        self.results.iter().map(|result| result.payback).collect()
    }

    /// The highest-NPV result, if any options were evaluated.
    pub fn best_by_npv(&self) -> Option<&EvaluationResult> {
        self.results.iter().max_by_key(|result| result.npv)
    }
}

impl fmt::Display for CatalogEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Catalog Evaluation ===")?;
        writeln!(f, "Electricity Price: {}", self.scenario.electricity_price())?;
        writeln!(f, "Gas Price:         {}", self.scenario.gas_price())?;
        writeln!(f, "Options:           {}", self.results.len())?;

        for result in &self.results {
            writeln!(f, "\n--- {} ---", result.investment_name)?;
            writeln!(f, "  Net Savings: {}", result.net_savings.round_dp(2))?;
            writeln!(f, "  NPV:         {}", result.npv.round_dp(2))?;
            writeln!(f, "  Payback:     {}", result.payback)?;
        }
        Ok(())
    }
}

/// The appraisal engine.
///
/// Validates each requested scenario against its configured price bounds,
/// then computes annual net savings, net present value and payback for
/// every option in a catalog. The engine is pure: no I/O, no caching, no
/// interior mutability. Calls are independent, and identical inputs always
/// produce identical results.
///
/// # Examples
///
/// ```
/// use appraisal_engine::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let mut catalog = InvestmentCatalog::new();
/// catalog
///     .add(
///         InvestmentOption::new(
///             "Heat recovery",
///             dec!(1200),
///             DiscountBasis::annuity_factor(dec!(8)),
///         )
///         .with_maintenance(dec!(100))
///         .with_gas_savings(GasSavings::energy(dec!(10_000))),
///     )
///     .unwrap();
///
/// let engine = AppraisalEngine::default();
/// let evaluation = engine
///     .evaluate(&catalog, &PriceScenario::new(dec!(0.10), dec!(0.05)))
///     .unwrap();
///
/// assert_eq!(evaluation.results()[0].net_savings, dec!(400));
/// assert_eq!(evaluation.results()[0].npv, dec!(3200));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AppraisalEngine {
    bounds: ScenarioBounds,
}

impl AppraisalEngine {
    /// Create an engine with explicit scenario bounds.
    pub fn new(bounds: ScenarioBounds) -> Self {
        Self { bounds }
    }

    /// The configured price bounds.
    pub fn bounds(&self) -> ScenarioBounds {
        self.bounds
    }

    /// Appraise every option in the catalog under one scenario.
    ///
    /// The scenario is validated against the configured bounds before any
    /// computation; on a rejected price the caller receives no results at
    /// all. Output is index-aligned with the catalog.
    pub fn evaluate(
        &self,
        catalog: &InvestmentCatalog,
        scenario: &PriceScenario,
    ) -> Result<CatalogEvaluation, ScenarioError> {
        self.bounds.validate(scenario)?;

        let results = catalog
            .options()
            .iter()
            .map(|option| EvaluationResult::for_option(option, scenario))
            .collect();

        Ok(CatalogEvaluation {
            scenario: *scenario,
            results,
        })
    }
}
