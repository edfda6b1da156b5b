use std::collections::BTreeMap;

use github_lens_common::{GithubLensError, Result};

/// raw key → magnitude counts; ordered so every downstream step iterates deterministically
pub type CountMap<K> = BTreeMap<K, f64>;
/// key → percentage of the total, floor-rounded
pub type PercentMap<K> = BTreeMap<K, f64>;

/// anything that can be summed as a count
pub trait Magnitude: Copy {
    fn magnitude(self) -> f64;
}

impl Magnitude for u64 {
    fn magnitude(self) -> f64 { self as f64 }
}
impl Magnitude for u32 {
    fn magnitude(self) -> f64 { self as f64 }
}
impl Magnitude for i64 {
    fn magnitude(self) -> f64 { self as f64 }
}
impl Magnitude for f64 {
    fn magnitude(self) -> f64 { self }
}

/// build a CountMap from any integer or float counts
pub fn count_map<K, V, I>(counts: I) -> CountMap<K>
where
    K: Ord,
    V: Magnitude,
    I: IntoIterator<Item = (K, V)>,
{
    let mut map = CountMap::new();
    for (k, v) in counts {
        *map.entry(k).or_insert(0.0) += v.magnitude();
    }
    map
}

/// finest rounding an f64 percentage can still represent
pub const MAX_ROUNDING_DIGITS: u32 = 15;

/// validate a user-supplied rounding digit count
pub fn rounding_digits(digits: u32) -> Result<u32> {
    if digits > MAX_ROUNDING_DIGITS {
        return Err(GithubLensError::InvalidArgument(format!(
            "rounding digits must be <= {MAX_ROUNDING_DIGITS}, got {digits}"
        )));
    }
    Ok(digits)
}

/// floor `value` to `digits` decimal places; digits past `MAX_ROUNDING_DIGITS` are clamped
pub fn floor_to(value: f64, digits: u32) -> f64 {
    let exp = i32::try_from(digits.min(MAX_ROUNDING_DIGITS)).unwrap_or(0);
    let scale = 10f64.powi(exp);
    (value * scale).floor() / scale
}

/// Converts counts into percentages of their total.
///
/// Each entry becomes `floor(count * 100 / total * 10^digits) / 10^digits`.
/// Negative counts are treated as 0. A zero (or non-finite) total maps every
/// key to 0 instead of producing NaN.
pub fn to_percentages<K: Ord + Clone>(counts: &CountMap<K>, rounding_digits: u32) -> PercentMap<K> {
    let clamp = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    let total: f64 = counts.values().map(|&v| clamp(v)).sum();
    if total <= 0.0 || !total.is_finite() {
        return counts.keys().map(|k| (k.clone(), 0.0)).collect();
    }
    counts
        .iter()
        .map(|(k, &v)| (k.clone(), floor_to(clamp(v) * 100.0 / total, rounding_digits)))
        .collect()
}
