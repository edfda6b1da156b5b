use serde::{Deserialize, Serialize};
use std::fmt;

use github_lens_common::{GithubLensError, Result};

use super::percent::PercentMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry<K> {
    pub key: K,
    pub percentage: f64,
}

pub type RankedDistribution<K> = Vec<RankedEntry<K>>;

/// key of a bucketed entry: either a real key or the synthetic overflow bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BucketKey<K> {
    Key(K),
    Others,
}

impl<K: fmt::Display> fmt::Display for BucketKey<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Key(k) => k.fmt(f),
            BucketKey::Others => f.write_str("Others"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketEntry<K> {
    pub key: BucketKey<K>,
    pub percentage: f64,
}

impl<K> BucketEntry<K> {
    pub fn is_others(&self) -> bool {
        matches!(self.key, BucketKey::Others)
    }
}

/// top-N entries followed by at most one `Others` entry
pub type BucketedDistribution<K> = Vec<BucketEntry<K>>;

/// Sorts a PercentMap by percentage descending. Ties are broken by key
/// ascending, so the same map always ranks the same way.
pub fn rank<K: Ord + Clone>(percents: &PercentMap<K>) -> RankedDistribution<K> {
    let mut entries: Vec<RankedEntry<K>> = percents
        .iter()
        .map(|(k, &p)| RankedEntry { key: k.clone(), percentage: p })
        .collect();
    entries.sort_by(|a, b| b.percentage.total_cmp(&a.percentage).then_with(|| a.key.cmp(&b.key)));
    entries
}

/// Keeps the first `n` ranked entries and folds the rest into `Others`.
///
/// `Others` is the sum of the excluded entries' already-rounded percentages
/// and is only appended when it is greater than zero. A distribution with at
/// most `n` entries comes back unchanged.
pub fn bucket_top<K>(ranked: RankedDistribution<K>, n: usize) -> BucketedDistribution<K> {
    let others: f64 = ranked.iter().skip(n).map(|e| e.percentage).sum();
    let mut bucketed: BucketedDistribution<K> = ranked
        .into_iter()
        .take(n)
        .map(|e| BucketEntry { key: BucketKey::Key(e.key), percentage: e.percentage })
        .collect();
    if others > 0.0 {
        bucketed.push(BucketEntry { key: BucketKey::Others, percentage: others });
    }
    bucketed
}

/// validate a user-supplied bucket count
pub fn bucket_count(n: i64) -> Result<usize> {
    usize::try_from(n).map_err(|_| {
        GithubLensError::InvalidArgument(format!("bucket count must be >= 0, got {n}"))
    })
}
