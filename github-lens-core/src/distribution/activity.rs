use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use github_lens_common::{GithubLensError, Result};

use super::percent::{CountMap, PercentMap};
use super::rank::{BucketEntry, BucketKey, BucketedDistribution};

/// activity bucket: a year inside the window, or the catch-all for everything else
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActivityKey {
    Year(i32),
    BeforeWindow,
}

impl fmt::Display for ActivityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityKey::Year(y) => write!(f, "{y}"),
            ActivityKey::BeforeWindow => f.write_str("before-window"),
        }
    }
}

/// inclusive range of calendar years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearWindow {
    min_year: i32,
    max_year: i32,
}

impl YearWindow {
    pub fn new(min_year: i32, max_year: i32) -> Result<Self> {
        if min_year > max_year {
            return Err(GithubLensError::InvalidArgument(format!(
                "year window [{min_year}, {max_year}] is inverted"
            )));
        }
        Ok(Self { min_year, max_year })
    }

    /// `span` years ending at `end_year`, e.g. span 5 ending 2021 is [2017, 2021]
    pub fn trailing(end_year: i32, span: u32) -> Result<Self> {
        if span == 0 {
            return Err(GithubLensError::InvalidArgument("year window span must be >= 1".into()));
        }
        let span = i32::try_from(span)
            .map_err(|_| GithubLensError::InvalidArgument(format!("year window span {span} too large")))?;
        Self::new(end_year.saturating_sub(span - 1), end_year)
    }

    /// trailing window ending at the current UTC year
    pub fn current(span: u32) -> Result<Self> {
        Self::trailing(Utc::now().year(), span)
    }

    pub fn min_year(&self) -> i32 { self.min_year }
    pub fn max_year(&self) -> i32 { self.max_year }

    pub fn contains(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.min_year..=self.max_year
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub created_year: i32,
    pub updated_year: i32,
}

impl ActivityRecord {
    pub fn new(created_year: i32, updated_year: i32) -> Self {
        Self { created_year, updated_year }
    }

    pub fn from_dates(created: &impl Datelike, updated: &impl Datelike) -> Self {
        Self::new(created.year(), updated.year())
    }
}

/// Counts records per year of `window`, plus one `BeforeWindow` bucket.
///
/// A record lands in its created year when that is inside the window,
/// otherwise in its updated year when that is, otherwise in `BeforeWindow`.
/// Every record increments exactly one bucket, and every window year is
/// present in the result even when its count is 0.
pub fn classify_activity(records: &[ActivityRecord], window: YearWindow) -> CountMap<ActivityKey> {
    let mut counts: CountMap<ActivityKey> = window
        .years()
        .map(|y| (ActivityKey::Year(y), 0.0))
        .chain(std::iter::once((ActivityKey::BeforeWindow, 0.0)))
        .collect();
    for rec in records {
        let key = if window.contains(rec.created_year) {
            ActivityKey::Year(rec.created_year)
        } else if window.contains(rec.updated_year) {
            ActivityKey::Year(rec.updated_year)
        } else {
            ActivityKey::BeforeWindow
        };
        *counts.entry(key).or_insert(0.0) += 1.0;
    }
    counts
}

/// Orders activity percentages for display: years newest first, then the
/// `BeforeWindow` share as `Others` when it is non-zero.
pub fn bucket_activity(percents: &PercentMap<ActivityKey>) -> BucketedDistribution<i32> {
    // Year keys sort before BeforeWindow, so reverse iteration is newest year first
    let mut bucketed: BucketedDistribution<i32> = percents
        .iter()
        .rev()
        .filter_map(|(k, &p)| match k {
            ActivityKey::Year(y) => Some(BucketEntry { key: BucketKey::Key(*y), percentage: p }),
            ActivityKey::BeforeWindow => None,
        })
        .collect();
    let others = percents.get(&ActivityKey::BeforeWindow).copied().unwrap_or(0.0);
    if others > 0.0 {
        bucketed.push(BucketEntry { key: BucketKey::Others, percentage: others });
    }
    bucketed
}
