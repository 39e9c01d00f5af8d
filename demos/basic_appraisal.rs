//! Basic catalog appraisal example.
//!
//! Demonstrates how the appraisal engine turns a catalog of
//! energy-efficiency retrofits into net savings, NPV and payback
//! figures under a single energy price scenario.

use appraisal_engine::analysis::evaluation::AppraisalEngine;
use appraisal_engine::core::discount::DiscountBasis;
use appraisal_engine::core::investment::{GasSavings, InvestmentCatalog, InvestmentOption};
use appraisal_engine::core::scenario::PriceScenario;
use rust_decimal_macros::dec;

fn main() {
    println!("╔═════════════════════════════════════════════╗");
    println!("║  appraisal-engine: Basic Appraisal Example  ║");
    println!("╚═════════════════════════════════════════════╝\n");

    // --- Scenario 1: a single option, flow by flow ---
    println!("━━━ Scenario 1: One Option, Flow by Flow ━━━\n");

    let heat_recovery = InvestmentOption::new(
        "Exhaust air heat recovery",
        dec!(180_000),
        DiscountBasis::annuity_factor(dec!(8.443793688)),
    )
    .with_maintenance(dec!(4_500))
    .with_gas_savings(GasSavings::volumetric(dec!(139_727.4074), dec!(9.5)))
    .with_electricity_consumption(dec!(282_948))
    .with_co2_savings(dec!(26_548.20741));

    let scenario = PriceScenario::new(dec!(0.10), dec!(0.053));

    let gas = heat_recovery.annual_gas_savings(scenario.gas_price());
    let electricity = heat_recovery.annual_electricity_cost(scenario.electricity_price());
    println!("Gas savings:        {}", gas.round_dp(2));
    println!("CO2 credit:         {}", heat_recovery.co2_savings().unwrap_or_default().round_dp(2));
    println!("Electricity cost:  -{}", electricity.round_dp(2));
    println!("Maintenance:       -{}", heat_recovery.maintenance().round_dp(2));
    println!("Net savings:        {}", heat_recovery.annual_net_savings(&scenario).round_dp(2));
    println!();

    // --- Scenario 2: a full retrofit catalog ---
    println!("━━━ Scenario 2: Full Retrofit Catalog ━━━\n");

    let mut catalog = InvestmentCatalog::new();
    catalog.add(heat_recovery).expect("option satisfies catalog invariants");
    catalog
        .add(
            InvestmentOption::new(
                "Roof insulation",
                dec!(60_000),
                DiscountBasis::from_rate(dec!(0.06), 20),
            )
            .with_gas_savings(GasSavings::energy(dec!(250_000))),
        )
        .expect("option satisfies catalog invariants");
    catalog
        .add(
            InvestmentOption::new(
                "Ventilation upgrade",
                dec!(42_000),
                DiscountBasis::annuity_factor(dec!(7.5)),
            )
            .with_maintenance(dec!(800))
            .with_gas_savings(GasSavings::energy(dec!(120_000)))
            .with_electricity_consumption(dec!(45_000)),
        )
        .expect("option satisfies catalog invariants");

    let engine = AppraisalEngine::default();
    let evaluation = engine
        .evaluate(&catalog, &PriceScenario::new(dec!(0.10), dec!(0.05)))
        .expect("scenario lies inside the default price bounds");

    println!("{}", evaluation);

    // Comparative ranking
    println!("\n━━━ Ranking ━━━\n");
    for result in evaluation.results() {
        let status = if result.is_viable() { "VIABLE" } else { "NOT VIABLE" };
        println!(
            "  {:<28} NPV {:>14}  payback {:<12} [{}]",
            result.investment_name,
            result.npv.round_dp(2),
            result.payback.to_string(),
            status
        );
    }

    if let Some(best) = evaluation.best_by_npv() {
        println!("\nBest option by NPV: {}", best.investment_name);
    }
}
