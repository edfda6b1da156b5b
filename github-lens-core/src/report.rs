use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use github_lens_common::{DistributionConfig, Result};

use crate::distribution::{
    activity_distribution, bucket_count, language_distribution, rounding_digits, ActivityRecord, YearWindow,
};
use crate::github::{merge_language_counts, total_forks, DataSource};

/// per-user summary; distribution fields hold one `key:value` line per bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserReport {
    pub login: String,
    pub public_repos: u64,
    pub followers: u64,
    #[serde(rename = "languages_distribution")]
    pub languages: String,
    #[serde(rename = "forks_count")]
    pub forks: u64,
    pub activity: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSettings {
    pub top_n: usize,
    pub language_digits: u32,
    pub activity_digits: u32,
    pub window: YearWindow,
}

impl ReportSettings {
    /// validated settings with a window ending at the current year
    pub fn from_config(cfg: &DistributionConfig) -> Result<Self> {
        Ok(Self {
            top_n: bucket_count(cfg.top_n)?,
            language_digits: rounding_digits(cfg.language_digits)?,
            activity_digits: rounding_digits(cfg.activity_digits)?,
            window: YearWindow::current(cfg.window_years)?,
        })
    }
}

pub fn build_report<S: DataSource + ?Sized>(source: &S, login: &str, settings: &ReportSettings) -> Result<UserReport> {
    let user = source.user(login)?;
    let repos = source.repos(login)?;
    log::debug!("{login}: {} repositories", repos.len());

    let per_repo = repos
        .iter()
        .map(|r| source.languages(login, &r.name))
        .collect::<Result<Vec<_>>>()?;
    let languages = merge_language_counts(per_repo);
    let records: Vec<ActivityRecord> = repos.iter().map(|r| r.activity()).collect();

    Ok(UserReport {
        login: user.login,
        public_repos: user.public_repos,
        followers: user.followers,
        languages: language_distribution(&languages, settings.top_n, settings.language_digits),
        forks: total_forks(&repos),
        activity: activity_distribution(&records, settings.window, settings.activity_digits),
    })
}

/// Builds reports for all logins in parallel, keeping input order. A login
/// that fails is logged and left out of the result.
pub fn build_reports<S: DataSource + ?Sized>(source: &S, logins: &[String], settings: &ReportSettings) -> Vec<UserReport> {
    let results: Vec<Result<UserReport>> = logins
        .par_iter()
        .map(|login| build_report(source, login, settings))
        .collect();
    let mut reports = Vec::with_capacity(results.len());
    for (login, r) in logins.iter().zip(results) {
        match r {
            Ok(report) => reports.push(report),
            Err(e) => log::error!("{login}: {e}"),
        }
    }
    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use github_lens_common::GithubLensError;

    #[test]
    fn settings_from_default_config() {
        let s = ReportSettings::from_config(&DistributionConfig::default()).unwrap();
        assert_eq!(s.top_n, 5);
        assert_eq!(s.language_digits, 2);
        assert_eq!(s.activity_digits, 3);
        assert_eq!(s.window.max_year() - s.window.min_year(), 4);
    }

    #[test]
    fn settings_reject_negative_top_n() {
        let cfg = DistributionConfig { top_n: -3, ..DistributionConfig::default() };
        assert!(ReportSettings::from_config(&cfg).is_err());
    }

    #[test]
    fn settings_reject_excess_digits() {
        let cfg = DistributionConfig { language_digits: 400, ..DistributionConfig::default() };
        assert!(matches!(ReportSettings::from_config(&cfg), Err(GithubLensError::InvalidArgument(_))));
        let cfg = DistributionConfig { activity_digits: 16, ..DistributionConfig::default() };
        assert!(ReportSettings::from_config(&cfg).is_err());
        let cfg = DistributionConfig { activity_digits: 15, ..DistributionConfig::default() };
        assert!(ReportSettings::from_config(&cfg).is_ok());
    }

    #[test]
    fn settings_reject_empty_window() {
        let cfg = DistributionConfig { window_years: 0, ..DistributionConfig::default() };
        assert!(ReportSettings::from_config(&cfg).is_err());
    }

    #[test]
    fn report_json_field_names() {
        let r = UserReport {
            login: "octocat".into(),
            public_repos: 2,
            followers: 10,
            languages: "Go:100.00".into(),
            forks: 1,
            activity: "2021:100.00%".into(),
        };
        let v = serde_json::to_value(&r).unwrap();
        for key in ["login", "public_repos", "followers", "languages_distribution", "forks_count", "activity"] {
            assert!(v.get(key).is_some(), "missing {key}");
        }
    }
}
