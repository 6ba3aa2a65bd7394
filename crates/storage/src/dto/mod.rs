pub mod analytics;
pub mod round;
pub mod score;

use rust_decimal::Decimal;

/// NUMERIC columns travel as `Decimal`; responses expose plain numbers.
pub(crate) fn decimal_to_f64(decimal: Decimal) -> f64 {
    decimal.to_string().parse().unwrap_or(0.0)
}
