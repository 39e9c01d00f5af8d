//! Price sensitivity sweep example.
//!
//! Demonstrates how the engine sweeps one energy price across its
//! configured band while the other stays fixed, and how viability
//! shifts along the axis.

use appraisal_engine::analysis::evaluation::AppraisalEngine;
use appraisal_engine::core::discount::DiscountBasis;
use appraisal_engine::core::investment::{GasSavings, InvestmentCatalog, InvestmentOption};
use appraisal_engine::core::scenario::PriceAxis;
use rust_decimal_macros::dec;

fn main() {
    println!("╔═══════════════════════════════════════════════╗");
    println!("║  appraisal-engine: Price Sensitivity Example  ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    let mut catalog = InvestmentCatalog::new();
    catalog
        .add(
            InvestmentOption::new(
                "Heat recovery",
                dec!(180_000),
                DiscountBasis::annuity_factor(dec!(8.443793688)),
            )
            .with_maintenance(dec!(4_500))
            .with_gas_savings(GasSavings::energy(dec!(1_327_410.3703)))
            .with_electricity_consumption(dec!(282_948))
            .with_co2_savings(dec!(26_548.20741)),
        )
        .expect("option satisfies catalog invariants");
    catalog
        .add(
            InvestmentOption::new(
                "Insulation",
                dec!(60_000),
                DiscountBasis::from_rate(dec!(0.06), 20),
            )
            .with_gas_savings(GasSavings::energy(dec!(250_000))),
        )
        .expect("option satisfies catalog invariants");
    catalog
        .add(
            InvestmentOption::new(
                "Ventilation",
                dec!(42_000),
                DiscountBasis::annuity_factor(dec!(7.5)),
            )
            .with_maintenance(dec!(800))
            .with_gas_savings(GasSavings::energy(dec!(120_000)))
            .with_electricity_consumption(dec!(45_000)),
        )
        .expect("option satisfies catalog invariants");

    let engine = AppraisalEngine::default();

    // --- Sweep the gas axis, electricity held at 0.10 ---
    let samples = engine.bounds().range(PriceAxis::Gas).sample_points(9);
    let sweep = engine
        .sweep(&catalog, PriceAxis::Gas, &samples, dec!(0.10))
        .expect("samples lie inside the default price bounds");

    println!(
        "━━━ NPV by Gas Price (electricity fixed at {}) ━━━\n",
        sweep.fixed_price()
    );

    let names = catalog.names();
    print!("  {:>8}", "gas");
    for name in &names {
        print!("  {:>14}", name);
    }
    println!();
    for point in sweep.points() {
        print!("  {:>8}", point.axis_value);
        for result in &point.results {
            print!("  {:>14}", result.npv.round_dp(0));
        }
        println!();
    }

    // --- Where each option reaches break-even ---
    println!("\n━━━ Break-even Along the Axis ━━━\n");
    for (index, name) in names.iter().enumerate() {
        let first_viable = sweep
            .points()
            .iter()
            .find(|point| point.results[index].is_viable());
        match first_viable {
            Some(point) => println!("  {:<14} viable from gas price {}", name, point.axis_value),
            None => println!("  {:<14} never viable on this axis", name),
        }
    }

    // --- The other direction: payback as electricity gets expensive ---
    let samples = engine
        .bounds()
        .range(PriceAxis::Electricity)
        .sample_points(6);
    let sweep = engine
        .sweep(&catalog, PriceAxis::Electricity, &samples, dec!(0.05))
        .expect("samples lie inside the default price bounds");

    println!(
        "\n━━━ Heat Recovery Payback by Electricity Price (gas fixed at {}) ━━━\n",
        sweep.fixed_price()
    );
    for (price, payback) in sweep.payback_curve("Heat recovery") {
        println!("  electricity {}  →  {}", price, payback);
    }

    println!("\n━━━ Interpretation ━━━\n");
    println!("  Gas savings scale with the gas price while electricity cost and");
    println!("  maintenance do not, so every NPV curve rises from left to right.");
    println!("  A curve pinned at zero has not reached break-even yet, and the");
    println!("  payback column shows how rising electricity prices erode it.");
}
