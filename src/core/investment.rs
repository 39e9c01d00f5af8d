use crate::core::discount::{DiscountBasis, DiscountError};
use crate::core::scenario::PriceScenario;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while assembling an investment catalog.
///
/// Each variant corresponds to a violated catalog invariant. Offending
/// entries are rejected when the catalog is built and never reach an
/// evaluation.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("investment '{name}': upfront cost must be positive, got {cost}")]
    NonPositiveCost { name: String, cost: Decimal },
    #[error("investment '{name}': maintenance must not be negative, got {maintenance}")]
    NegativeMaintenance { name: String, maintenance: Decimal },
    #[error("investment '{name}': {source}")]
    InvalidDiscount {
        name: String,
        #[source]
        source: DiscountError,
    },
    #[error("investment '{name}': {driver} must not be negative, got {value}")]
    NegativeSavingsDriver {
        name: String,
        driver: &'static str,
        value: Decimal,
    },
    #[error("duplicate investment name '{name}' in catalog")]
    DuplicateName { name: String },
}

/// Annual gas savings driver of an investment option.
///
/// The volumetric form is the general one: a physical volume of fuel saved
/// per year together with its lower heating value, priced per unit of
/// energy. The pre-scaled form carries the annual energy figure directly,
/// heating value already applied, and prices identically.
///
/// # Examples
///
/// ```
/// use appraisal_engine::core::investment::GasSavings;
/// use rust_decimal_macros::dec;
///
/// let volumetric = GasSavings::volumetric(dec!(1000), dec!(9.5));
/// assert_eq!(volumetric.annual_energy(), dec!(9500));
/// assert_eq!(volumetric.monetary(dec!(0.05)), dec!(475));
///
/// let energy = GasSavings::energy(dec!(9500));
/// assert_eq!(energy.monetary(dec!(0.05)), dec!(475));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GasSavings {
    /// Volume of fuel saved per year (e.g. m³) and its lower heating value
    /// (energy per unit volume, e.g. kWh/m³).
    Volumetric {
        volume: Decimal,
        lower_heating_value: Decimal,
    },
    /// Energy saved per year (e.g. kWh), heating value already applied.
    Energy(Decimal),
}

impl GasSavings {
    pub fn volumetric(volume: Decimal, lower_heating_value: Decimal) -> Self {
        GasSavings::Volumetric {
            volume,
            lower_heating_value,
        }
    }

    pub fn energy(per_year: Decimal) -> Self {
        GasSavings::Energy(per_year)
    }

    /// The annual energy this driver represents.
    pub fn annual_energy(&self) -> Decimal {
        match self {
            GasSavings::Volumetric {
                volume,
                lower_heating_value,
            } => *volume * *lower_heating_value,
            GasSavings::Energy(energy) => *energy,
        }
    }

    /// Monetary gas savings at the given price per unit of energy.
    ///
    /// A zero price yields zero savings; it is not an error.
    pub fn monetary(&self, gas_price: Decimal) -> Decimal {
        self.annual_energy() * gas_price
    }

    fn validate(&self, name: &str) -> Result<(), CatalogError> {
        let reject = |driver: &'static str, value: Decimal| CatalogError::NegativeSavingsDriver {
            name: name.to_string(),
            driver,
            value,
        };
        match self {
            GasSavings::Volumetric {
                volume,
                lower_heating_value,
            } => {
                if *volume < Decimal::ZERO {
                    return Err(reject("gas savings volume", *volume));
                }
                if *lower_heating_value < Decimal::ZERO {
                    return Err(reject("lower heating value", *lower_heating_value));
                }
            }
            GasSavings::Energy(energy) => {
                if *energy < Decimal::ZERO {
                    return Err(reject("gas savings energy", *energy));
                }
            }
        }
        Ok(())
    }
}

impl Default for GasSavings {
    fn default() -> Self {
        GasSavings::Energy(Decimal::ZERO)
    }
}

/// A capital investment option under appraisal.
///
/// Combines the upfront cost, the recurring annual maintenance cost, the
/// discounting basis, and the savings drivers that a price scenario turns
/// into annual monetary flows. Options are immutable once created and are
/// identified by name within a catalog.
///
/// # Examples
///
/// ```
/// use appraisal_engine::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let option = InvestmentOption::new(
///     "Condensing boiler retrofit",
///     dec!(1200),
///     DiscountBasis::annuity_factor(dec!(8)),
/// )
/// .with_maintenance(dec!(100))
/// .with_gas_savings(GasSavings::volumetric(dec!(1000), dec!(10)));
///
/// let scenario = PriceScenario::new(dec!(0.10), dec!(0.05));
/// assert_eq!(option.annual_net_savings(&scenario), dec!(400));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentOption {
    /// Identifying label, unique within a catalog.
    name: String,
    /// Upfront capital cost. Must be positive.
    cost: Decimal,
    /// Recurring annual cost. Must not be negative.
    maintenance: Decimal,
    /// How future net savings are discounted.
    discount: DiscountBasis,
    /// Annual gas savings driver.
    gas_savings: GasSavings,
    /// Annual electricity the measure draws (e.g. kWh for fans and pumps).
    electricity_consumption: Decimal,
    /// Optional price-independent annual credit, such as avoided emission
    /// certificate costs.
    co2_savings: Option<Decimal>,
}

impl InvestmentOption {
    /// Create an option with the given name, upfront cost and discounting
    /// basis. Savings drivers start at zero and are attached with the
    /// `with_*` methods.
    pub fn new(name: impl Into<String>, cost: Decimal, discount: DiscountBasis) -> Self {
        Self {
            name: name.into(),
            cost,
            maintenance: Decimal::ZERO,
            discount,
            gas_savings: GasSavings::default(),
            electricity_consumption: Decimal::ZERO,
            co2_savings: None,
        }
    }

    /// Set the recurring annual maintenance cost.
    pub fn with_maintenance(mut self, maintenance: Decimal) -> Self {
        self.maintenance = maintenance;
        self
    }

    /// Set the annual gas savings driver.
    pub fn with_gas_savings(mut self, gas_savings: GasSavings) -> Self {
        self.gas_savings = gas_savings;
        self
    }

    /// Set the annual electricity consumption the measure draws.
    pub fn with_electricity_consumption(mut self, consumption: Decimal) -> Self {
        self.electricity_consumption = consumption;
        self
    }

    /// Set the price-independent annual credit.
    pub fn with_co2_savings(mut self, co2_savings: Decimal) -> Self {
        self.co2_savings = Some(co2_savings);
        self
    }

    // --- Accessors ---

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> Decimal {
        self.cost
    }

    pub fn maintenance(&self) -> Decimal {
        self.maintenance
    }

    pub fn discount(&self) -> DiscountBasis {
        self.discount
    }

    pub fn gas_savings(&self) -> GasSavings {
        self.gas_savings
    }

    pub fn electricity_consumption(&self) -> Decimal {
        self.electricity_consumption
    }

    pub fn co2_savings(&self) -> Option<Decimal> {
        self.co2_savings
    }

    // --- Annual flows under a scenario ---

    /// Monetary gas savings per year at the scenario's gas price.
    pub fn annual_gas_savings(&self, gas_price: Decimal) -> Decimal {
        self.gas_savings.monetary(gas_price)
    }

    /// Monetary electricity cost per year at the scenario's electricity
    /// price.
    pub fn annual_electricity_cost(&self, electricity_price: Decimal) -> Decimal {
        self.electricity_consumption * electricity_price
    }

    /// Annual net savings before the zero floor: gas savings plus the
    /// price-independent credit, minus electricity cost and maintenance.
    pub fn annual_net_savings_unclamped(&self, scenario: &PriceScenario) -> Decimal {
        self.annual_gas_savings(scenario.gas_price())
            + self.co2_savings.unwrap_or(Decimal::ZERO)
            - self.annual_electricity_cost(scenario.electricity_price())
            - self.maintenance
    }

    /// Canonical annual net savings, floored at zero. A scenario where the
    /// option loses money reads as exactly zero savings, and downstream
    /// NPV and payback are computed from that zero.
    pub fn annual_net_savings(&self, scenario: &PriceScenario) -> Decimal {
        self.annual_net_savings_unclamped(scenario).max(Decimal::ZERO)
    }

    /// Check this option against the catalog invariants.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.cost <= Decimal::ZERO {
            return Err(CatalogError::NonPositiveCost {
                name: self.name.clone(),
                cost: self.cost,
            });
        }
        if self.maintenance < Decimal::ZERO {
            return Err(CatalogError::NegativeMaintenance {
                name: self.name.clone(),
                maintenance: self.maintenance,
            });
        }
        self.discount.validate().map_err(|source| CatalogError::InvalidDiscount {
            name: self.name.clone(),
            source,
        })?;
        self.gas_savings.validate(&self.name)?;
        if self.electricity_consumption < Decimal::ZERO {
            return Err(CatalogError::NegativeSavingsDriver {
                name: self.name.clone(),
                driver: "electricity consumption",
                value: self.electricity_consumption,
            });
        }
        if let Some(co2) = self.co2_savings {
            if co2 < Decimal::ZERO {
                return Err(CatalogError::NegativeSavingsDriver {
                    name: self.name.clone(),
                    driver: "co2 savings",
                    value: co2,
                });
            }
        }
        Ok(())
    }
}

/// An ordered, validated collection of investment options.
///
/// The catalog is the only long-lived piece of data in the engine: built
/// once from configuration, immutable afterwards, and passed by reference
/// into every evaluation. Entries keep their insertion order, and
/// evaluation output is index-aligned with it.
///
/// # Examples
///
/// ```
/// use appraisal_engine::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let mut catalog = InvestmentCatalog::new();
/// catalog
///     .add(InvestmentOption::new(
///         "Heat recovery",
///         dec!(180_000),
///         DiscountBasis::annuity_factor(dec!(8.44)),
///     ))
///     .unwrap();
///
/// assert_eq!(catalog.len(), 1);
/// assert!(catalog.get("Heat recovery").is_some());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<InvestmentOption>", into = "Vec<InvestmentOption>")]
pub struct InvestmentCatalog {
    options: Vec<InvestmentOption>,
}

impl InvestmentCatalog {
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
        }
    }

    /// Validate and append an option.
    ///
    /// A rejected option is not inserted: the catalog never holds an entry
    /// that violates an invariant or reuses a name.
    pub fn add(&mut self, option: InvestmentOption) -> Result<(), CatalogError> {
        option.validate()?;
        if self.options.iter().any(|existing| existing.name() == option.name()) {
            return Err(CatalogError::DuplicateName {
                name: option.name().to_string(),
            });
        }
        self.options.push(option);
        Ok(())
    }

    /// Build a catalog from a sequence of options, failing on the first
    /// invalid entry.
    pub fn from_options(
        options: impl IntoIterator<Item = InvestmentOption>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for option in options {
            catalog.add(option)?;
        }
        Ok(catalog)
    }

    pub fn options(&self) -> &[InvestmentOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Look up an option by name.
    pub fn get(&self, name: &str) -> Option<&InvestmentOption> {
        self.options.iter().find(|option| option.name() == name)
    }

    /// All option names in catalog order.
    pub fn names(&self) -> Vec<&str> {
        self.options.iter().map(|option| option.name()).collect()
    }

    /// Combined upfront cost of every option.
    pub fn total_cost(&self) -> Decimal {
        self.options.iter().map(|option| option.cost()).sum()
    }
}

impl TryFrom<Vec<InvestmentOption>> for InvestmentCatalog {
    type Error = CatalogError;

    fn try_from(options: Vec<InvestmentOption>) -> Result<Self, Self::Error> {
        Self::from_options(options)
    }
}

impl From<InvestmentCatalog> for Vec<InvestmentOption> {
    fn from(catalog: InvestmentCatalog) -> Self {
        catalog.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_option() -> InvestmentOption {
        InvestmentOption::new(
            "Heat recovery",
            dec!(180_000),
            DiscountBasis::annuity_factor(dec!(8.443793688)),
        )
        .with_maintenance(dec!(4500))
        .with_gas_savings(GasSavings::volumetric(dec!(139_727.4074), dec!(9.5)))
        .with_electricity_consumption(dec!(282_948))
        .with_co2_savings(dec!(26_548.20741))
    }

    #[test]
    fn test_option_creation() {
        let option = sample_option();
        assert_eq!(option.name(), "Heat recovery");
        assert_eq!(option.cost(), dec!(180_000));
        assert_eq!(option.maintenance(), dec!(4500));
        assert_eq!(option.co2_savings(), Some(dec!(26_548.20741)));
        assert!(option.validate().is_ok());
    }

    #[test]
    fn test_volumetric_energy_scaling() {
        let driver = GasSavings::volumetric(dec!(139_727.4074), dec!(9.5));
        assert_eq!(driver.annual_energy(), dec!(1_327_410.3703));
        assert_eq!(driver.monetary(dec!(0.05)), dec!(66_370.518515));
    }

    #[test]
    fn test_prescaled_energy_matches_volumetric() {
        let volumetric = GasSavings::volumetric(dec!(1000), dec!(9.5));
        let prescaled = GasSavings::energy(dec!(9500));
        assert_eq!(
            volumetric.monetary(dec!(0.07)),
            prescaled.monetary(dec!(0.07))
        );
    }

    #[test]
    fn test_zero_price_yields_zero_savings() {
        let option = sample_option();
        assert_eq!(option.annual_gas_savings(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(option.annual_electricity_cost(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_net_savings_composition() {
        // gas 139727.4074 * 9.5 * 0.053 + co2 26548.20741
        //   - electricity 282948 * 0.1 - maintenance 4500
        let option = sample_option();
        let scenario = PriceScenario::new(dec!(0.1), dec!(0.053));
        let expected = dec!(70_352.7496259) + dec!(26_548.20741) - dec!(28_294.8) - dec!(4500);
        assert_eq!(option.annual_net_savings_unclamped(&scenario), expected);
        assert_eq!(option.annual_net_savings(&scenario), expected);
    }

    #[test]
    fn test_net_savings_clamped_at_zero() {
        let option = InvestmentOption::new(
            "Electric-heavy measure",
            dec!(50_000),
            DiscountBasis::annuity_factor(dec!(8)),
        )
        .with_gas_savings(GasSavings::energy(dec!(1000)))
        .with_electricity_consumption(dec!(100_000));

        // 1000 * 0.02 - 100000 * 0.30 is deeply negative.
        let scenario = PriceScenario::new(dec!(0.30), dec!(0.02));
        assert!(option.annual_net_savings_unclamped(&scenario) < Decimal::ZERO);
        assert_eq!(option.annual_net_savings(&scenario), Decimal::ZERO);
    }

    #[test]
    fn test_validate_rejects_zero_cost() {
        let option = InvestmentOption::new(
            "Free lunch",
            Decimal::ZERO,
            DiscountBasis::annuity_factor(dec!(8)),
        );
        assert!(matches!(
            option.validate(),
            Err(CatalogError::NonPositiveCost { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_maintenance() {
        let option = InvestmentOption::new(
            "Odd entry",
            dec!(1000),
            DiscountBasis::annuity_factor(dec!(8)),
        )
        .with_maintenance(dec!(-1));
        assert!(matches!(
            option.validate(),
            Err(CatalogError::NegativeMaintenance { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_discount() {
        let option = InvestmentOption::new(
            "Odd entry",
            dec!(1000),
            DiscountBasis::annuity_factor(dec!(-2)),
        );
        assert!(matches!(
            option.validate(),
            Err(CatalogError::InvalidDiscount { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_drivers() {
        let base = |driver| {
            InvestmentOption::new("Odd entry", dec!(1000), DiscountBasis::annuity_factor(dec!(8)))
                .with_gas_savings(driver)
        };
        assert!(matches!(
            base(GasSavings::energy(dec!(-1))).validate(),
            Err(CatalogError::NegativeSavingsDriver { .. })
        ));
        assert!(matches!(
            base(GasSavings::volumetric(dec!(-1), dec!(9.5))).validate(),
            Err(CatalogError::NegativeSavingsDriver { .. })
        ));

        let electric = InvestmentOption::new(
            "Odd entry",
            dec!(1000),
            DiscountBasis::annuity_factor(dec!(8)),
        )
        .with_electricity_consumption(dec!(-5));
        assert!(matches!(
            electric.validate(),
            Err(CatalogError::NegativeSavingsDriver { .. })
        ));
    }

    #[test]
    fn test_catalog_rejects_invalid_option() {
        let mut catalog = InvestmentCatalog::new();
        let invalid = InvestmentOption::new(
            "Broken",
            dec!(-100),
            DiscountBasis::annuity_factor(dec!(8)),
        );
        assert!(catalog.add(invalid).is_err());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_catalog_rejects_duplicate_name() {
        let mut catalog = InvestmentCatalog::new();
        catalog.add(sample_option()).unwrap();
        let result = catalog.add(sample_option());
        assert!(matches!(result, Err(CatalogError::DuplicateName { .. })));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_catalog_preserves_insertion_order() {
        let names = ["Zeta", "Alpha", "Mid"];
        let catalog = InvestmentCatalog::from_options(names.iter().map(|name| {
            InvestmentOption::new(*name, dec!(1000), DiscountBasis::annuity_factor(dec!(8)))
        }))
        .unwrap();
        assert_eq!(catalog.names(), vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_catalog_lookup_and_totals() {
        let mut catalog = InvestmentCatalog::new();
        catalog.add(sample_option()).unwrap();
        catalog
            .add(InvestmentOption::new(
                "Insulation",
                dec!(20_000),
                DiscountBasis::from_rate(dec!(0.06), 20),
            ))
            .unwrap();

        assert_eq!(catalog.total_cost(), dec!(200_000));
        assert!(catalog.get("Insulation").is_some());
        assert!(catalog.get("Unknown").is_none());
    }

    #[test]
    fn test_catalog_deserialization_revalidates() {
        let json = r#"[
            {
                "name": "Broken",
                "cost": "-100",
                "maintenance": "0",
                "discount": { "annuity_factor": "8" },
                "gas_savings": { "energy": "0" },
                "electricity_consumption": "0",
                "co2_savings": null
            }
        ]"#;
        let result: Result<InvestmentCatalog, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
