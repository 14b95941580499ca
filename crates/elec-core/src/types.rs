/// Absolute tolerance used when checking that vote-share triples sum to one.
pub const SHARE_TOLERANCE: f64 = 1e-9;

/// Returns true when `total` equals one within [`SHARE_TOLERANCE`].
pub fn sums_to_one(total: f64) -> bool {
    (total - 1.0).abs() <= SHARE_TOLERANCE
}

/// Returns true when `value` is a finite probability in `[0, 1]`.
pub fn is_probability(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}
