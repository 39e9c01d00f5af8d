//! Random catalog generation for benchmarks and CLI experiments.
//!
//! Produces catalogs of plausible efficiency-retrofit options so the engine
//! can be exercised at arbitrary catalog sizes without hand-written data.

use crate::core::discount::DiscountBasis;
use crate::core::investment::{GasSavings, InvestmentCatalog, InvestmentOption};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Configuration for generating a random investment catalog.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Number of options to generate.
    pub option_count: usize,
    /// Minimum upfront cost.
    pub min_cost: Decimal,
    /// Maximum upfront cost.
    pub max_cost: Decimal,
    /// Lower heating value used for volumetric gas drivers (kWh per unit
    /// volume).
    pub lower_heating_value: Decimal,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            option_count: 10,
            min_cost: Decimal::from(50_000),
            max_cost: Decimal::from(500_000),
            lower_heating_value: dec!(9.5),
        }
    }
}

/// Generate a random catalog of investment options.
///
/// Every generated option satisfies the catalog invariants. Magnitudes
/// follow typical retrofit proportions: maintenance a small share of the
/// upfront cost, savings drivers scaled to it, and a mix of both
/// discounting forms.
///
/// # Panics
///
/// Panics if `min_cost` exceeds `max_cost`.
pub fn generate_random_catalog(config: &CatalogConfig) -> InvestmentCatalog {
    let mut rng = rand::thread_rng();
    let mut catalog = InvestmentCatalog::new();

    let min_f64: f64 = config.min_cost.to_string().parse().unwrap_or(50_000.0);
    let max_f64: f64 = config.max_cost.to_string().parse().unwrap_or(500_000.0);

    for i in 0..config.option_count {
        let cost_f64 = rng.gen_range(min_f64..=max_f64);
        let cost = Decimal::from_f64_retain(cost_f64)
            .unwrap_or(Decimal::from(100_000))
            .round_dp(2)
            .max(Decimal::ONE);

        let maintenance = (cost * dec!(0.025)).round_dp(2);

        // Gas volume sized so savings land in the low single-digit payback
        // range at mid prices.
        let volume_f64 = rng.gen_range(0.5..=2.0) * cost_f64;
        let volume = Decimal::from_f64_retain(volume_f64)
            .unwrap_or(Decimal::from(100_000))
            .round_dp(4)
            .max(Decimal::ZERO);

        let consumption_f64 = rng.gen_range(0.0..=0.5) * cost_f64;
        let electricity_consumption = Decimal::from_f64_retain(consumption_f64)
            .unwrap_or(Decimal::ZERO)
            .round_dp(4)
            .max(Decimal::ZERO);

        let discount = if rng.gen_bool(0.5) {
            let factor_f64 = rng.gen_range(6.0..=12.0);
            DiscountBasis::annuity_factor(
                Decimal::from_f64_retain(factor_f64)
                    .unwrap_or(dec!(8))
                    .round_dp(6),
            )
        } else {
            let rate_f64 = rng.gen_range(0.04..=0.12);
            let rate = Decimal::from_f64_retain(rate_f64)
                .unwrap_or(dec!(0.06))
                .round_dp(4);
            DiscountBasis::from_rate(rate, rng.gen_range(10..=25))
        };

        let mut option = InvestmentOption::new(format!("OPTION-{:03}", i), cost, discount)
            .with_maintenance(maintenance)
            .with_gas_savings(GasSavings::volumetric(volume, config.lower_heating_value))
            .with_electricity_consumption(electricity_consumption);

        if rng.gen_bool(0.5) {
            option = option.with_co2_savings((cost * dec!(0.02)).round_dp(2));
        }

        catalog
            .add(option)
            .expect("generated option satisfies catalog invariants");
    }

    catalog
}
