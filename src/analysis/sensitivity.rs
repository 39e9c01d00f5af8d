use crate::analysis::evaluation::{AppraisalEngine, EvaluationResult};
use crate::core::investment::InvestmentCatalog;
use crate::core::payback::Payback;
use crate::core::scenario::{PriceAxis, PriceScenario, ScenarioError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One sample of a sensitivity sweep: the varied price and the full catalog
/// appraisal at that price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Value of the varied price at this sample.
    pub axis_value: Decimal,
    /// Per-option results, index-aligned with the catalog.
    pub results: Vec<EvaluationResult>,
}

/// A sensitivity sweep: one price axis varied over caller-supplied sample
/// values while the price on the other axis stays fixed.
///
/// Points keep the order the samples were supplied in, and each point's
/// results keep catalog order. No smoothing or interpolation happens
/// between samples. The curve accessors produce the plain
/// `(axis value, metric)` sequences a line display consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivitySweep {
    axis: PriceAxis,
    fixed_price: Decimal,
    points: Vec<SweepPoint>,
}

impl AppraisalEngine {
    /// Sweep one price axis across the supplied sample values, holding the
    /// other price fixed, and appraise the full catalog at every sample.
    ///
    /// Every sampled scenario, including the fixed price on the other axis,
    /// is validated against the configured bounds up front. One
    /// out-of-range sample fails the whole sweep and no partial results are
    /// returned.
    pub fn sweep(
        &self,
        catalog: &InvestmentCatalog,
        axis: PriceAxis,
        axis_values: &[Decimal],
        fixed_price: Decimal,
    ) -> Result<SensitivitySweep, ScenarioError> {
        self.bounds().validate_price(axis.other(), fixed_price)?;
        for &value in axis_values {
            self.bounds().validate_price(axis, value)?;
        }

        let scenario_at = |value: Decimal| match axis {
            PriceAxis::Electricity => PriceScenario::new(value, fixed_price),
            PriceAxis::Gas => PriceScenario::new(fixed_price, value),
        };

        let points = axis_values
            .iter()
            .map(|&value| {
                let scenario = scenario_at(value);
                let results = catalog
                    .options()
                    .iter()
                    .map(|option| EvaluationResult::for_option(option, &scenario))
                    .collect();
                SweepPoint {
                    axis_value: value,
                    results,
                }
            })
            .collect();

        Ok(SensitivitySweep {
            axis,
            fixed_price,
            points,
        })
    }
}

impl SensitivitySweep {
    /// The varied axis.
    pub fn axis(&self) -> PriceAxis {
        self.axis
    }

    /// The price held fixed on the other axis.
    pub fn fixed_price(&self) -> Decimal {
        self.fixed_price
    }

    /// All sample points, in the order supplied.
    pub fn points(&self) -> &[SweepPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The sampled axis values, in order.
    pub fn axis_values(&self) -> Vec<Decimal> {
        self.points.iter().map(|point| point.axis_value).collect()
    }

    /// Results at one exact axis value, if it was sampled.
    pub fn results_at(&self, axis_value: Decimal) -> Option<&[EvaluationResult]> {
        self.points
            .iter()
            .find(|point| point.axis_value == axis_value)
            .map(|point| point.results.as_slice())
    }

    /// `(axis value, NPV)` curve for one option across the sweep.
    ///
    /// An unknown name produces an empty curve.
    pub fn npv_curve(&self, investment_name: &str) -> Vec<(Decimal, Decimal)> {
        self.metric_curve(investment_name, |result| result.npv)
    }

    /// `(axis value, net savings)` curve for one option across the sweep.
    pub fn net_savings_curve(&self, investment_name: &str) -> Vec<(Decimal, Decimal)> {
        self.metric_curve(investment_name, |result| result.net_savings)
    }

    /// `(axis value, payback)` curve for one option across the sweep.
    pub fn payback_curve(&self, investment_name: &str) -> Vec<(Decimal, Payback)> {
        self.points
            .iter()
            .filter_map(|point| {
                point
                    .results
                    .iter()
                    .find(|result| result.investment_name == investment_name)
                    .map(|result| (point.axis_value, result.payback))
            })
            .collect()
    }

    fn metric_curve(
        &self,
        investment_name: &str,
        metric: impl Fn(&EvaluationResult) -> Decimal,
    ) -> Vec<(Decimal, Decimal)> {
        self.points
            .iter()
            .filter_map(|point| {
                point
                    .results
                    .iter()
                    .find(|result| result.investment_name == investment_name)
                    .map(|result| (point.axis_value, metric(result)))
            })
            .collect()
    }
}

impl fmt::Display for SensitivitySweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Sensitivity Sweep ===")?;
        writeln!(f, "Varied Axis:  {}", self.axis)?;
        writeln!(f, "Fixed Price:  {} ({})", self.fixed_price, self.axis.other())?;
        writeln!(f, "Samples:      {}", self.points.len())?;

        for point in &self.points {
            writeln!(f, "\n--- {} = {} ---", self.axis, point.axis_value)?;
            for result in &point.results {
                writeln!(
                    f,
                    "  {:<30} NPV {:>16}  payback {}",
                    result.investment_name,
                    result.npv.round_dp(2),
                    result.payback
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::discount::DiscountBasis;
    use crate::core::investment::{GasSavings, InvestmentOption};
    use rust_decimal_macros::dec;

    fn sample_catalog() -> InvestmentCatalog {
        let mut catalog = InvestmentCatalog::new();
        catalog
            .add(
                InvestmentOption::new(
                    "Heat recovery",
                    dec!(180_000),
                    DiscountBasis::annuity_factor(dec!(8.443793688)),
                )
                .with_maintenance(dec!(4500))
                .with_gas_savings(GasSavings::energy(dec!(1_407_055)))
                .with_electricity_consumption(dec!(424_422)),
            )
            .unwrap();
        catalog
            .add(
                InvestmentOption::new(
                    "Insulation",
                    dec!(60_000),
                    DiscountBasis::from_rate(dec!(0.06), 20),
                )
                .with_gas_savings(GasSavings::energy(dec!(250_000))),
            )
            .unwrap();
        catalog
    }

    #[test]
    fn test_sweep_shape_matches_samples_and_catalog() {
        let engine = AppraisalEngine::default();
        let catalog = sample_catalog();
        let samples = [dec!(0.05), dec!(0.10), dec!(0.15), dec!(0.20)];

        let sweep = engine
            .sweep(&catalog, PriceAxis::Electricity, &samples, dec!(0.05))
            .unwrap();

        assert_eq!(sweep.len(), samples.len());
        assert_eq!(sweep.axis_values(), samples.to_vec());
        for point in sweep.points() {
            assert_eq!(point.results.len(), catalog.len());
            assert_eq!(point.results[0].investment_name, "Heat recovery");
        }
    }

    #[test]
    fn test_sweep_rejects_out_of_range_sample() {
        let engine = AppraisalEngine::default();
        let catalog = sample_catalog();
        let samples = [dec!(0.05), dec!(0.35)];

        let result = engine.sweep(&catalog, PriceAxis::Electricity, &samples, dec!(0.05));
        assert!(matches!(
            result,
            Err(ScenarioError::PriceOutOfRange {
                axis: PriceAxis::Electricity,
                ..
            })
        ));
    }

    #[test]
    fn test_sweep_rejects_out_of_range_fixed_price() {
        let engine = AppraisalEngine::default();
        let catalog = sample_catalog();
        let samples = [dec!(0.05)];

        let result = engine.sweep(&catalog, PriceAxis::Electricity, &samples, dec!(0.50));
        assert!(matches!(
            result,
            Err(ScenarioError::PriceOutOfRange {
                axis: PriceAxis::Gas,
                ..
            })
        ));
    }

    #[test]
    fn test_npv_falls_as_electricity_price_rises() {
        let engine = AppraisalEngine::default();
        let catalog = sample_catalog();
        let samples = [dec!(0.05), dec!(0.10), dec!(0.15), dec!(0.20), dec!(0.25)];

        let sweep = engine
            .sweep(&catalog, PriceAxis::Electricity, &samples, dec!(0.05))
            .unwrap();

        let curve = sweep.npv_curve("Heat recovery");
        assert_eq!(curve.len(), samples.len());
        for pair in curve.windows(2) {
            assert!(pair[1].1 <= pair[0].1);
        }
    }

    #[test]
    fn test_npv_rises_with_gas_price() {
        let engine = AppraisalEngine::default();
        let catalog = sample_catalog();
        let samples = [dec!(0.02), dec!(0.04), dec!(0.06), dec!(0.08), dec!(0.10)];

        let sweep = engine
            .sweep(&catalog, PriceAxis::Gas, &samples, dec!(0.10))
            .unwrap();

        let curve = sweep.npv_curve("Insulation");
        for pair in curve.windows(2) {
            assert!(pair[1].1 >= pair[0].1);
        }
    }

    #[test]
    fn test_payback_curve_carries_unbounded_points() {
        let mut catalog = InvestmentCatalog::new();
        catalog
            .add(
                InvestmentOption::new(
                    "Electric-heavy measure",
                    dec!(10_000),
                    DiscountBasis::annuity_factor(dec!(8)),
                )
                .with_gas_savings(GasSavings::energy(dec!(30_000)))
                .with_electricity_consumption(dec!(10_000)),
            )
            .unwrap();

        // Net savings cross zero as electricity gets expensive:
        // 30000 * 0.02 - 10000 * p.
        let engine = AppraisalEngine::default();
        let samples = [dec!(0.05), dec!(0.10), dec!(0.20)];
        let sweep = engine
            .sweep(&catalog, PriceAxis::Electricity, &samples, dec!(0.02))
            .unwrap();

        let curve = sweep.payback_curve("Electric-heavy measure");
        assert_eq!(curve[0].1, Payback::Years(dec!(100)));
        assert!(curve[2].1.is_unbounded());
    }

    #[test]
    fn test_results_at_exact_sample() {
        let engine = AppraisalEngine::default();
        let catalog = sample_catalog();
        let samples = [dec!(0.05), dec!(0.10)];
        let sweep = engine
            .sweep(&catalog, PriceAxis::Electricity, &samples, dec!(0.05))
            .unwrap();

        assert!(sweep.results_at(dec!(0.10)).is_some());
        assert!(sweep.results_at(dec!(0.11)).is_none());
    }

    #[test]
    fn test_unknown_name_yields_empty_curve() {
        let engine = AppraisalEngine::default();
        let catalog = sample_catalog();
        let sweep = engine
            .sweep(&catalog, PriceAxis::Gas, &[dec!(0.05)], dec!(0.10))
            .unwrap();
        assert!(sweep.npv_curve("Unknown").is_empty());
    }

    #[test]
    fn test_empty_samples_yield_empty_sweep() {
        let engine = AppraisalEngine::default();
        let catalog = sample_catalog();
        let sweep = engine
            .sweep(&catalog, PriceAxis::Gas, &[], dec!(0.10))
            .unwrap();
        assert!(sweep.is_empty());
    }

    #[test]
    fn test_display_lists_every_sample() {
        let engine = AppraisalEngine::default();
        let catalog = sample_catalog();
        let sweep = engine
            .sweep(&catalog, PriceAxis::Gas, &[dec!(0.02), dec!(0.10)], dec!(0.10))
            .unwrap();

        let rendered = sweep.to_string();
        assert!(rendered.contains("=== Sensitivity Sweep ==="));
        assert!(rendered.contains("gas = 0.02"));
        assert!(rendered.contains("gas = 0.10"));
    }
}
