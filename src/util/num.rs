/// `2^63` as an `f64`; the first value above the `i64` range.
const I64_UPPER_EXCLUSIVE: f64 = 9_223_372_036_854_775_808.0;

/// Converts an `f64` to `i64` when it is integral and inside the `i64` range.
///
/// This is the demotion test used by arithmetic: `floor(x) == x` and the
/// value fits. Non-finite values are never integral.
///
/// ## Example
/// ```
/// use sprig::util::num::integral_f64_to_i64;
///
/// assert_eq!(integral_f64_to_i64(5.0), Some(5));
/// assert_eq!(integral_f64_to_i64(-0.0), Some(0));
/// assert_eq!(integral_f64_to_i64(2.5), None);
/// assert_eq!(integral_f64_to_i64(f64::INFINITY), None);
/// assert_eq!(integral_f64_to_i64(1e300), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::float_cmp)]
#[must_use]
pub fn integral_f64_to_i64(value: f64) -> Option<i64> {
    if !value.is_finite() || value.floor() != value {
        return None;
    }
    if value < -I64_UPPER_EXCLUSIVE || value >= I64_UPPER_EXCLUSIVE {
        return None;
    }
    Some(value as i64)
}
