//! Decimal rounding of reported values.

/// Rounds `value` to `decimals` decimal places.
///
/// Rounding works on the exact decimal expansion of the binary value, so
/// `round_to(2.675, 2)` gives `2.67` (the double nearest to 2.675 lies just
/// below it). Non-finite values are returned unchanged.
///
/// # Examples
///
/// ```
/// use agenorm_stats::rounding::round_to;
///
/// assert_eq!(round_to(1.23456, 2), 1.23);
/// assert_eq!(round_to(2.675, 2), 2.67);
/// assert_eq!(round_to(-1.005, 1), -1.0);
/// ```
#[must_use]
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.decimals$}").parse().unwrap_or(value)
}
