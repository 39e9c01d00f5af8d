use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payback period of an investment: how long until cumulative net savings
/// recover the upfront cost.
///
/// An option whose net savings are zero or negative never breaks even. That
/// case is the distinct `Unbounded` sentinel rather than a number, so it can
/// never be confused with a near-zero (excellent) payback in a comparison or
/// a serialized result. Variant order gives the derived ordering the natural
/// meaning: every finite payback sorts before `Unbounded`.
///
/// # Examples
///
/// ```
/// use appraisal_engine::core::payback::Payback;
/// use rust_decimal_macros::dec;
///
/// let fast = Payback::compute(dec!(120_000), dec!(60_000));
/// assert_eq!(fast, Payback::Years(dec!(2)));
///
/// let never = Payback::compute(dec!(120_000), dec!(0));
/// assert!(never.is_unbounded());
/// assert!(fast < never);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payback {
    /// Fractional years until break-even.
    Years(Decimal),
    /// Break-even is never reached at the evaluated prices.
    Unbounded,
}

impl Payback {
    /// Payback of an investment with the given upfront cost and annual net
    /// savings.
    ///
    /// Non-positive net savings never pay back. The division keeps its
    /// fractional part; a quotient too large to represent also reads as
    /// unbounded.
    pub fn compute(cost: Decimal, net_savings: Decimal) -> Self {
        if net_savings <= Decimal::ZERO {
            return Payback::Unbounded;
        }
        cost.checked_div(net_savings)
            .map_or(Payback::Unbounded, Payback::Years)
    }

    /// The payback in years, if break-even is ever reached.
    pub fn years(&self) -> Option<Decimal> {
        match self {
            Payback::Years(years) => Some(*years),
            Payback::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Payback::Unbounded)
    }

    /// Float form for plotting layers: finite years, or `f64::INFINITY` for
    /// the unbounded sentinel.
    pub fn to_f64(&self) -> f64 {
        match self {
            Payback::Years(years) => years.to_f64().unwrap_or(f64::INFINITY),
            Payback::Unbounded => f64::INFINITY,
        }
    }
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payback::Years(years) => write!(f, "{} years", years.round_dp(2)),
            Payback::Unbounded => write!(f, "unbounded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fractional_years() {
        let payback = Payback::compute(dec!(180_000), dec!(64_000));
        assert_eq!(payback, Payback::Years(dec!(2.8125)));
    }

    #[test]
    fn test_zero_savings_never_pay_back() {
        assert!(Payback::compute(dec!(100_000), Decimal::ZERO).is_unbounded());
    }

    #[test]
    fn test_negative_savings_never_pay_back() {
        assert!(Payback::compute(dec!(100_000), dec!(-5000)).is_unbounded());
    }

    #[test]
    fn test_finite_sorts_before_unbounded() {
        let short = Payback::Years(dec!(1.5));
        let long = Payback::Years(dec!(30));
        assert!(short < long);
        assert!(long < Payback::Unbounded);
    }

    #[test]
    fn test_years_accessor() {
        assert_eq!(Payback::Years(dec!(2.5)).years(), Some(dec!(2.5)));
        assert_eq!(Payback::Unbounded.years(), None);
    }

    #[test]
    fn test_to_f64_sentinel_is_infinite() {
        assert!(Payback::Unbounded.to_f64().is_infinite());
        assert!((Payback::Years(dec!(2.5)).to_f64() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        assert_eq!(Payback::Years(dec!(2.8125)).to_string(), "2.81 years");
        assert_eq!(Payback::Unbounded.to_string(), "unbounded");
    }
}
