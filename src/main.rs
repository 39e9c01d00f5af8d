//! appraisal-engine CLI
//!
//! Appraise investment catalogs from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Appraise a catalog at explicit prices
//! appraisal-engine evaluate --input catalog.json --electricity 0.10 --gas 0.05
//!
//! # Output as JSON
//! appraisal-engine evaluate --input catalog.json --format json
//!
//! # Sweep the electricity axis across its valid range
//! appraisal-engine sweep --input catalog.json --axis electricity
//!
//! # Generate a random catalog for experimentation
//! appraisal-engine generate --options 10 --output catalog.json
//! ```

use appraisal_engine::analysis::evaluation::{AppraisalEngine, CatalogEvaluation, EvaluationResult};
use appraisal_engine::analysis::sensitivity::SensitivitySweep;
use appraisal_engine::core::discount::DiscountBasis;
use appraisal_engine::core::investment::{GasSavings, InvestmentCatalog, InvestmentOption};
use appraisal_engine::core::scenario::{PriceAxis, PriceRange, PriceScenario, ScenarioBounds};
use appraisal_engine::fixtures::{generate_random_catalog, CatalogConfig};
use rust_decimal::Decimal;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"appraisal-engine — open investment appraisal and energy price sensitivity

USAGE:
    appraisal-engine <COMMAND> [OPTIONS]

COMMANDS:
    evaluate    Appraise every catalog option under one price scenario
    sweep       Vary one price axis and appraise the catalog at each sample
    generate    Generate a random investment catalog (for testing)
    help        Show this message

OPTIONS (evaluate):
    --input <FILE>         Path to JSON catalog file
    --electricity <PRICE>  Electricity price per kWh (default: 0.10)
    --gas <PRICE>          Gas price per kWh (default: 0.05)
    --format <FORMAT>      Output format: text (default) or json

OPTIONS (sweep):
    --input <FILE>         Path to JSON catalog file
    --axis <AXIS>          Axis to vary: electricity or gas
    --points <N>           Number of samples across the axis range
                           (default: 26 for electricity, 17 for gas)
    --fixed <PRICE>        Price held on the other axis
                           (default: 0.10 electricity, 0.05 gas)
    --format <FORMAT>      Output format: text (default) or json

OPTIONS (evaluate, sweep):
    --electricity-range <MIN,MAX>  Valid electricity band (default: 0.05,0.30)
    --gas-range <MIN,MAX>          Valid gas band (default: 0.02,0.10)

OPTIONS (generate):
    --options <N>          Number of options (default: 10)
    --output <FILE>        Write to file instead of stdout

EXAMPLES:
    appraisal-engine evaluate --input catalog.json
    appraisal-engine evaluate --input catalog.json --electricity 0.18 --format json
    appraisal-engine sweep --input catalog.json --axis gas --points 9
    appraisal-engine generate --options 20 --output catalog.json"#
    );
}

/// JSON schema for input catalogs.
#[derive(serde::Deserialize)]
struct InvestmentInput {
    name: String,
    cost: Decimal,
    #[serde(default)]
    maintenance: Decimal,
    pv_factor: Option<Decimal>,
    discount_rate: Option<Decimal>,
    horizon_years: Option<u32>,
    gas_savings_volume: Option<Decimal>,
    lower_heating_value: Option<Decimal>,
    gas_savings_energy: Option<Decimal>,
    #[serde(default)]
    electricity_consumption: Decimal,
    co2_savings: Option<Decimal>,
}

#[derive(serde::Deserialize)]
struct CatalogFile {
    investments: Vec<InvestmentInput>,
}

/// JSON output schema for a single appraised option.
#[derive(serde::Serialize)]
struct ResultOutput {
    name: String,
    net_savings: String,
    net_savings_unclamped: String,
    npv: String,
    /// `null` means the option never pays back at these prices.
    payback_years: Option<String>,
    viable: bool,
}

#[derive(serde::Serialize)]
struct EvaluationOutput {
    electricity_price: String,
    gas_price: String,
    results: Vec<ResultOutput>,
}

#[derive(serde::Serialize)]
struct SweepOutput {
    axis: String,
    fixed_price: String,
    samples: Vec<SampleOutput>,
}

#[derive(serde::Serialize)]
struct SampleOutput {
    axis_value: String,
    results: Vec<ResultOutput>,
}

fn result_outputs(results: &[EvaluationResult]) -> Vec<ResultOutput> {
    results
        .iter()
        .map(|result| ResultOutput {
            name: result.investment_name.clone(),
            net_savings: result.net_savings.to_string(),
            net_savings_unclamped: result.net_savings_unclamped.to_string(),
            npv: result.npv.to_string(),
            payback_years: result.payback.years().map(|years| years.to_string()),
            viable: result.is_viable(),
        })
        .collect()
}

fn build_option(input: InvestmentInput) -> Result<InvestmentOption, String> {
    let discount = match (input.pv_factor, input.discount_rate, input.horizon_years) {
        (Some(factor), None, None) => DiscountBasis::annuity_factor(factor),
        (None, Some(rate), Some(horizon)) => DiscountBasis::from_rate(rate, horizon),
        _ => {
            return Err(format!(
                "investment '{}': supply either pv_factor or discount_rate + horizon_years",
                input.name
            ))
        }
    };

    let gas_savings = match (
        input.gas_savings_volume,
        input.lower_heating_value,
        input.gas_savings_energy,
    ) {
        (Some(volume), Some(heating_value), None) => GasSavings::volumetric(volume, heating_value),
        (None, None, Some(energy)) => GasSavings::energy(energy),
        (None, None, None) => GasSavings::energy(Decimal::ZERO),
        _ => {
            return Err(format!(
                "investment '{}': supply gas_savings_volume + lower_heating_value, \
                 or gas_savings_energy, or neither",
                input.name
            ))
        }
    };

    let mut option = InvestmentOption::new(input.name, input.cost, discount)
        .with_maintenance(input.maintenance)
        .with_gas_savings(gas_savings)
        .with_electricity_consumption(input.electricity_consumption);
    if let Some(co2) = input.co2_savings {
        option = option.with_co2_savings(co2);
    }
    Ok(option)
}

fn load_catalog(path: &str) -> InvestmentCatalog {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: CatalogFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "investments": [
    {{ "name": "Heat recovery", "cost": "180000", "maintenance": "4500",
      "pv_factor": "8.443793688", "gas_savings_volume": "139727.4074",
      "lower_heating_value": "9.5", "electricity_consumption": "282948",
      "co2_savings": "26548.20741" }}
  ]
}}"#
        );
        process::exit(1);
    });

    let mut catalog = InvestmentCatalog::new();
    for input in file.investments {
        let option = build_option(input).unwrap_or_else(|message| {
            eprintln!("{}", message);
            process::exit(1);
        });
        catalog.add(option).unwrap_or_else(|e| {
            eprintln!("Invalid catalog entry: {}", e);
            process::exit(1);
        });
    }
    log::info!("loaded {} investment options from {}", catalog.len(), path);
    catalog
}

fn parse_price(value: &str, flag: &str) -> Decimal {
    value.parse().unwrap_or_else(|e| {
        eprintln!("Invalid value for {}: '{}' ({})", flag, value, e);
        process::exit(1);
    })
}

fn parse_range(value: &str, flag: &str) -> PriceRange {
    let (min_str, max_str) = value.split_once(',').unwrap_or_else(|| {
        eprintln!("{} expects MIN,MAX", flag);
        process::exit(1);
    });
    let min = parse_price(min_str.trim(), flag);
    let max = parse_price(max_str.trim(), flag);
    if min > max {
        eprintln!("{}: minimum {} exceeds maximum {}", flag, min, max);
        process::exit(1);
    }
    PriceRange::new(min, max)
}

fn build_bounds(electricity_range: Option<PriceRange>, gas_range: Option<PriceRange>) -> ScenarioBounds {
    let defaults = ScenarioBounds::default();
    ScenarioBounds::new(
        electricity_range.unwrap_or_else(|| defaults.range(PriceAxis::Electricity)),
        gas_range.unwrap_or_else(|| defaults.range(PriceAxis::Gas)),
    )
}

fn cmd_evaluate(args: &[String]) {
    let mut input_path = None;
    let mut electricity = Decimal::new(1, 1); // 0.1
    let mut gas = Decimal::new(5, 2); // 0.05
    let mut format = "text".to_string();
    let mut electricity_range = None;
    let mut gas_range = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--electricity" => {
                i += 1;
                let value = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--electricity requires a price");
                    process::exit(1);
                });
                electricity = parse_price(&value, "--electricity");
            }
            "--gas" => {
                i += 1;
                let value = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--gas requires a price");
                    process::exit(1);
                });
                gas = parse_price(&value, "--gas");
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            "--electricity-range" => {
                i += 1;
                let value = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--electricity-range requires MIN,MAX");
                    process::exit(1);
                });
                electricity_range = Some(parse_range(&value, "--electricity-range"));
            }
            "--gas-range" => {
                i += 1;
                let value = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--gas-range requires MIN,MAX");
                    process::exit(1);
                });
                gas_range = Some(parse_range(&value, "--gas-range"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    let catalog = load_catalog(&path);
    let engine = AppraisalEngine::new(build_bounds(electricity_range, gas_range));
    let scenario = PriceScenario::new(electricity, gas);
    log::debug!("evaluating under {}", scenario);

    let evaluation: CatalogEvaluation = engine.evaluate(&catalog, &scenario).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    if format == "json" {
        let output = EvaluationOutput {
            electricity_price: scenario.electricity_price().to_string(),
            gas_price: scenario.gas_price().to_string(),
            results: result_outputs(evaluation.results()),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("{}", evaluation);
        if let Some(best) = evaluation.best_by_npv() {
            println!(
                "\nBest option by NPV: {} ({})",
                best.investment_name,
                best.npv.round_dp(2)
            );
        }
    }
}

fn cmd_sweep(args: &[String]) {
    let mut input_path = None;
    let mut axis: Option<PriceAxis> = None;
    let mut points: Option<usize> = None;
    let mut fixed: Option<Decimal> = None;
    let mut format = "text".to_string();
    let mut electricity_range = None;
    let mut gas_range = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--axis" => {
                i += 1;
                let value = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--axis requires 'electricity' or 'gas'");
                    process::exit(1);
                });
                axis = Some(value.parse().unwrap_or_else(|e| {
                    eprintln!("{}", e);
                    process::exit(1);
                }));
            }
            "--points" => {
                i += 1;
                points = Some(args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--points requires a number");
                    process::exit(1);
                }));
            }
            "--fixed" => {
                i += 1;
                let value = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--fixed requires a price");
                    process::exit(1);
                });
                fixed = Some(parse_price(&value, "--fixed"));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            "--electricity-range" => {
                i += 1;
                let value = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--electricity-range requires MIN,MAX");
                    process::exit(1);
                });
                electricity_range = Some(parse_range(&value, "--electricity-range"));
            }
            "--gas-range" => {
                i += 1;
                let value = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--gas-range requires MIN,MAX");
                    process::exit(1);
                });
                gas_range = Some(parse_range(&value, "--gas-range"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });
    let axis = axis.unwrap_or_else(|| {
        eprintln!("Error: --axis <AXIS> is required");
        process::exit(1);
    });

    // Sample counts matching a 0.01 electricity / 0.005 gas step over the
    // default bands.
    let points = points.unwrap_or(match axis {
        PriceAxis::Electricity => 26,
        PriceAxis::Gas => 17,
    });
    let fixed = fixed.unwrap_or(match axis.other() {
        PriceAxis::Electricity => Decimal::new(1, 1), // 0.1
        PriceAxis::Gas => Decimal::new(5, 2),         // 0.05
    });

    let catalog = load_catalog(&path);
    let engine = AppraisalEngine::new(build_bounds(electricity_range, gas_range));
    let axis_values = engine.bounds().range(axis).sample_points(points);
    log::debug!(
        "sweeping {} over {} samples, {} fixed at {}",
        axis,
        axis_values.len(),
        axis.other(),
        fixed
    );

    let sweep: SensitivitySweep = engine
        .sweep(&catalog, axis, &axis_values, fixed)
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        });

    if format == "json" {
        let output = SweepOutput {
            axis: sweep.axis().to_string(),
            fixed_price: sweep.fixed_price().to_string(),
            samples: sweep
                .points()
                .iter()
                .map(|point| SampleOutput {
                    axis_value: point.axis_value.to_string(),
                    results: result_outputs(&point.results),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("{}", sweep);
    }
}

fn cmd_generate(args: &[String]) {
    let mut option_count = 10usize;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--options" => {
                i += 1;
                option_count = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--options requires a number");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = CatalogConfig {
        option_count,
        ..Default::default()
    };

    let catalog = generate_random_catalog(&config);

    #[derive(serde::Serialize)]
    struct OutputInvestment {
        name: String,
        cost: String,
        maintenance: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pv_factor: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        discount_rate: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        horizon_years: Option<u32>,
        gas_savings_volume: String,
        lower_heating_value: String,
        electricity_consumption: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        co2_savings: Option<String>,
    }

    #[derive(serde::Serialize)]
    struct OutputFile {
        investments: Vec<OutputInvestment>,
    }

    let output = OutputFile {
        investments: catalog
            .options()
            .iter()
            .map(|option| {
                let (pv_factor, discount_rate, horizon_years) = match option.discount() {
                    DiscountBasis::AnnuityFactor(factor) => (Some(factor.to_string()), None, None),
                    DiscountBasis::FromRate { rate, horizon_years } => {
                        (None, Some(rate.to_string()), Some(horizon_years))
                    }
                };
                let (volume, heating_value) = match option.gas_savings() {
                    GasSavings::Volumetric {
                        volume,
                        lower_heating_value,
                    } => (volume, lower_heating_value),
                    GasSavings::Energy(energy) => (energy, Decimal::ONE),
                };
                OutputInvestment {
                    name: option.name().to_string(),
                    cost: option.cost().to_string(),
                    maintenance: option.maintenance().to_string(),
                    pv_factor,
                    discount_rate,
                    horizon_years,
                    gas_savings_volume: volume.to_string(),
                    lower_heating_value: heating_value.to_string(),
                    electricity_consumption: option.electricity_consumption().to_string(),
                    co2_savings: option.co2_savings().map(|co2| co2.to_string()),
                }
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} investment options ({} total cost) → {}",
            catalog.len(),
            catalog.total_cost().round_dp(2),
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "evaluate" => cmd_evaluate(rest),
        "sweep" => cmd_sweep(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
