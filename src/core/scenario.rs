use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The two exogenous market prices the model is sensitive to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceAxis {
    Electricity,
    Gas,
}

impl PriceAxis {
    /// The other axis, the one a sweep holds fixed.
    pub fn other(&self) -> PriceAxis {
        match self {
            PriceAxis::Electricity => PriceAxis::Gas,
            PriceAxis::Gas => PriceAxis::Electricity,
        }
    }
}

impl fmt::Display for PriceAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceAxis::Electricity => write!(f, "electricity"),
            PriceAxis::Gas => write!(f, "gas"),
        }
    }
}

/// Error for an unrecognized axis name.
#[derive(Debug, Error)]
#[error("unknown price axis '{0}', expected 'electricity' or 'gas'")]
pub struct ParsePriceAxisError(String);

impl FromStr for PriceAxis {
    type Err = ParsePriceAxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "electricity" => Ok(PriceAxis::Electricity),
            "gas" => Ok(PriceAxis::Gas),
            other => Err(ParsePriceAxisError(other.to_string())),
        }
    }
}

/// A market-price scenario: the pair of prices one evaluation runs under.
///
/// Scenarios are plain values supplied on every call. The engine keeps no
/// ambient price state between evaluations.
///
/// # Examples
///
/// ```
/// use appraisal_engine::core::scenario::{PriceAxis, PriceScenario};
/// use rust_decimal_macros::dec;
///
/// let scenario = PriceScenario::new(dec!(0.10), dec!(0.05));
/// assert_eq!(scenario.price(PriceAxis::Gas), dec!(0.05));
///
/// let shifted = scenario.with_price(PriceAxis::Electricity, dec!(0.12));
/// assert_eq!(shifted.electricity_price(), dec!(0.12));
/// assert_eq!(shifted.gas_price(), dec!(0.05));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceScenario {
    /// Electricity price per unit of energy (e.g. EUR/kWh).
    electricity_price: Decimal,
    /// Gas price per unit of energy (e.g. EUR/kWh).
    gas_price: Decimal,
}

impl PriceScenario {
    pub fn new(electricity_price: Decimal, gas_price: Decimal) -> Self {
        Self {
            electricity_price,
            gas_price,
        }
    }

    pub fn electricity_price(&self) -> Decimal {
        self.electricity_price
    }

    pub fn gas_price(&self) -> Decimal {
        self.gas_price
    }

    /// The price on the given axis.
    pub fn price(&self, axis: PriceAxis) -> Decimal {
        match axis {
            PriceAxis::Electricity => self.electricity_price,
            PriceAxis::Gas => self.gas_price,
        }
    }

    /// A copy of this scenario with the price on one axis replaced.
    pub fn with_price(&self, axis: PriceAxis, price: Decimal) -> Self {
        match axis {
            PriceAxis::Electricity => Self {
                electricity_price: price,
                ..*self
            },
            PriceAxis::Gas => Self {
                gas_price: price,
                ..*self
            },
        }
    }
}

impl fmt::Display for PriceScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "electricity {} / gas {}",
            self.electricity_price, self.gas_price
        )
    }
}

/// An inclusive band of valid prices for one axis.
///
/// # Examples
///
/// ```
/// use appraisal_engine::core::scenario::PriceRange;
/// use rust_decimal_macros::dec;
///
/// let range = PriceRange::new(dec!(0.02), dec!(0.10));
/// assert!(range.contains(dec!(0.02)));
/// assert!(range.contains(dec!(0.10)));
/// assert!(!range.contains(dec!(0.101)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    min: Decimal,
    max: Decimal,
}

impl PriceRange {
    /// Create an inclusive range.
    ///
    /// # Panics
    ///
    /// Panics if `min` exceeds `max`.
    pub fn new(min: Decimal, max: Decimal) -> Self {
        assert!(
            min <= max,
            "price range minimum {} exceeds maximum {}",
            min,
            max
        );
        Self { min, max }
    }

    pub fn min(&self) -> Decimal {
        self.min
    }

    pub fn max(&self) -> Decimal {
        self.max
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && price <= self.max
    }

    /// `count` linearly spaced sample points across the range, endpoints
    /// included.
    ///
    /// Zero points is an empty sweep; a single point is the lower bound. The
    /// final point is pinned to the upper bound so accumulated step rounding
    /// can never push it outside the range.
    pub fn sample_points(&self, count: usize) -> Vec<Decimal> {
        match count {
            0 => Vec::new(),
            1 => vec![self.min],
            _ => {
                let step = (self.max - self.min) / Decimal::from(count as u64 - 1);
                (0..count)
                    .map(|i| {
                        if i == count - 1 {
                            self.max
                        } else {
                            self.min + step * Decimal::from(i as u64)
                        }
                    })
                    .collect()
            }
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Errors arising from a supplied price scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("{axis} price {price} is outside the valid range [{min}, {max}]")]
    PriceOutOfRange {
        axis: PriceAxis,
        price: Decimal,
        min: Decimal,
        max: Decimal,
    },
}

/// The configured valid price ranges for the two axes.
///
/// Prices outside their range fail evaluation with an error. The engine
/// never clamps an out-of-range price to the boundary.
///
/// # Examples
///
/// ```
/// use appraisal_engine::core::scenario::{PriceScenario, ScenarioBounds};
/// use rust_decimal_macros::dec;
///
/// let bounds = ScenarioBounds::default();
/// assert!(bounds.validate(&PriceScenario::new(dec!(0.10), dec!(0.05))).is_ok());
/// assert!(bounds.validate(&PriceScenario::new(dec!(0.31), dec!(0.05))).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioBounds {
    electricity: PriceRange,
    gas: PriceRange,
}

impl ScenarioBounds {
    pub fn new(electricity: PriceRange, gas: PriceRange) -> Self {
        Self { electricity, gas }
    }

    /// The valid range on the given axis.
    pub fn range(&self, axis: PriceAxis) -> PriceRange {
        match axis {
            PriceAxis::Electricity => self.electricity,
            PriceAxis::Gas => self.gas,
        }
    }

    /// Check both of a scenario's prices against their ranges.
    pub fn validate(&self, scenario: &PriceScenario) -> Result<(), ScenarioError> {
        self.validate_price(PriceAxis::Electricity, scenario.electricity_price())?;
        self.validate_price(PriceAxis::Gas, scenario.gas_price())
    }

    /// Check a single price against its axis range.
    pub fn validate_price(&self, axis: PriceAxis, price: Decimal) -> Result<(), ScenarioError> {
        let range = self.range(axis);
        if range.contains(price) {
            Ok(())
        } else {
            Err(ScenarioError::PriceOutOfRange {
                axis,
                price,
                min: range.min(),
                max: range.max(),
            })
        }
    }
}

impl Default for ScenarioBounds {
    /// Default bands: electricity in [0.05, 0.30] and gas in [0.02, 0.10]
    /// currency units per kWh.
    fn default() -> Self {
        Self {
            electricity: PriceRange::new(dec!(0.05), dec!(0.30)),
            gas: PriceRange::new(dec!(0.02), dec!(0.10)),
        }
    }
}
