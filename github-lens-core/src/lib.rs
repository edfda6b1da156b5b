pub mod distribution;
pub mod export;
pub mod github;
pub mod input;
pub mod report;

pub use distribution::{
    activity_distribution, bucket_activity, bucket_count, bucket_top, classify_activity, count_map,
    format_distribution, language_distribution, rank, rounding_digits, to_percentages, ActivityKey, ActivityRecord,
    BucketEntry, BucketKey, BucketedDistribution, CountMap, FormatStyle, PercentMap, RankedDistribution,
    RankedEntry, YearWindow,
};
pub use export::{export_json, flatten_distribution, flatten_report};
pub use github::{merge_language_counts, total_forks, DataSource, GithubClient, GithubRepo, GithubUser, LanguageBytes};
pub use github_lens_common::{GithubLensError, Result};
pub use input::{read_logins, read_logins_from};
pub use report::{build_report, build_reports, ReportSettings, UserReport};
