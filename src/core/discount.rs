use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors arising from a discounting configuration.
#[derive(Debug, Error)]
pub enum DiscountError {
    #[error("present-value factor must be positive, got {factor}")]
    NonPositiveFactor { factor: Decimal },
    #[error("discount rate must be greater than -100%, got {rate}")]
    RateBelowFloor { rate: Decimal },
    #[error("evaluation horizon must be at least one year")]
    EmptyHorizon,
}

/// How future net savings are discounted to present value.
///
/// The canonical configuration supplies the annuity present-value factor
/// directly: the sum of per-year discount factors over the evaluation
/// horizon. The explicit configuration supplies a discount rate and horizon
/// instead and derives the same factor. Both forms are accepted wherever an
/// investment option is defined.
///
/// # Examples
///
/// ```
/// use appraisal_engine::core::discount::DiscountBasis;
/// use rust_decimal_macros::dec;
///
/// // A zero discount rate values every year at par.
/// let flat = DiscountBasis::from_rate(dec!(0), 15);
/// assert_eq!(flat.present_value_factor(), dec!(15));
///
/// let supplied = DiscountBasis::annuity_factor(dec!(8.443793688));
/// assert_eq!(supplied.present_value_factor(), dec!(8.443793688));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountBasis {
    /// Precomputed annuity present-value factor. Must be positive.
    AnnuityFactor(Decimal),
    /// Discount rate per year and evaluation horizon in years. The factor
    /// is derived as the sum of `1 / (1 + rate)^t` for `t` in `1..=horizon`.
    FromRate { rate: Decimal, horizon_years: u32 },
}

impl DiscountBasis {
    pub fn annuity_factor(factor: Decimal) -> Self {
        DiscountBasis::AnnuityFactor(factor)
    }

    pub fn from_rate(rate: Decimal, horizon_years: u32) -> Self {
        DiscountBasis::FromRate { rate, horizon_years }
    }

    /// The annuity present-value factor for this basis.
    ///
    /// The explicit form accumulates per-year discount factors iteratively,
    /// one division by `1 + rate` per year, so the result is exact decimal
    /// arithmetic with no power function involved. A rate at or below -100%
    /// yields a zero factor; catalog validation rejects such a basis before
    /// it ever reaches an evaluation.
    pub fn present_value_factor(&self) -> Decimal {
        match self {
            DiscountBasis::AnnuityFactor(factor) => *factor,
            DiscountBasis::FromRate { rate, horizon_years } => {
                let one_plus_rate = Decimal::ONE + *rate;
                if one_plus_rate <= Decimal::ZERO {
                    return Decimal::ZERO;
                }
                let mut discount = Decimal::ONE;
                let mut factor = Decimal::ZERO;
                for _ in 0..*horizon_years {
                    discount /= one_plus_rate;
                    factor += discount;
                }
                factor
            }
        }
    }

    /// Net present value of an annual net-savings stream under this basis.
    ///
    /// A non-positive stream has a present value of exactly zero.
    pub fn npv(&self, net_savings: Decimal) -> Decimal {
        if net_savings <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        net_savings * self.present_value_factor()
    }

    /// Check this basis against the catalog invariants.
    pub fn validate(&self) -> Result<(), DiscountError> {
        match self {
            DiscountBasis::AnnuityFactor(factor) if *factor <= Decimal::ZERO => {
                Err(DiscountError::NonPositiveFactor { factor: *factor })
            }
            DiscountBasis::FromRate { rate, .. } if *rate <= Decimal::NEGATIVE_ONE => {
                Err(DiscountError::RateBelowFloor { rate: *rate })
            }
            DiscountBasis::FromRate { horizon_years: 0, .. } => Err(DiscountError::EmptyHorizon),
            _ => Ok(()),
        }
    }
}
