//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Map a value from one range into another.
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where
    T: Float
{
    target_range.0
        + ((value - source_range.0)
        * (target_range.1 - target_range.0)
        / (source_range.1 - source_range.0))
}

/// Map a value in `[low, high]` onto `[0, 1]`, clamping values outside of the
/// range.
///
/// Returns `None` if the range is degenerate (zero or negative span) or not
/// finite, as no meaningful normalised value exists.
pub fn normalise<T>(range: (T, T), value: T) -> Option<T>
where
    T: Float
{
    let (low, high) = range;

    if !low.is_finite() || !high.is_finite() || high <= low {
        return None
    }

    let zero = T::zero();
    let one = T::one();

    Some(clamp(&lin_map(range, (zero, one), value), &zero, &one))
}

/// Limit a value to the inclusive range `[min, max]`.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T
where
    T: Float
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}
