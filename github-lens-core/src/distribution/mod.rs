pub mod activity;
pub mod format;
pub mod percent;
pub mod rank;

pub use activity::{bucket_activity, classify_activity, ActivityKey, ActivityRecord, YearWindow};
pub use format::{format_distribution, FormatStyle};
pub use percent::{
    count_map, floor_to, rounding_digits, to_percentages, CountMap, Magnitude, PercentMap, MAX_ROUNDING_DIGITS,
};
pub use rank::{
    bucket_count, bucket_top, rank, BucketEntry, BucketKey, BucketedDistribution, RankedDistribution,
    RankedEntry,
};

/// counts → percentages → top-N + Others → `key:value` lines
pub fn language_distribution<K>(counts: &CountMap<K>, top_n: usize, rounding_digits: u32) -> String
where
    K: Ord + Clone + std::fmt::Display,
{
    let ranked = rank(&to_percentages(counts, rounding_digits));
    format_distribution(&bucket_top(ranked, top_n), FormatStyle::Plain)
}

/// records → year buckets → percentages → newest year first → `year:value%` lines
pub fn activity_distribution(records: &[ActivityRecord], window: YearWindow, rounding_digits: u32) -> String {
    let percents = to_percentages(&classify_activity(records, window), rounding_digits);
    format_distribution(&bucket_activity(&percents), FormatStyle::PercentSign)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_scenario_two_languages() {
        let counts = count_map(vec![("Go".to_string(), 80u64), ("Python".to_string(), 20)]);
        assert_eq!(language_distribution(&counts, 5, 2), "Go:80.00\nPython:20.00");
    }

    #[test]
    fn language_scenario_seven_equal() {
        let counts = count_map(["a", "b", "c", "d", "e", "f", "g"].iter().map(|k| (k.to_string(), 1u64)));
        assert_eq!(
            language_distribution(&counts, 5, 2),
            "a:14.28\nb:14.28\nc:14.28\nd:14.28\ne:14.28\nOthers:28.56"
        );
    }

    #[test]
    fn language_scenario_empty() {
        assert_eq!(language_distribution(&CountMap::<String>::new(), 5, 2), "");
    }

    #[test]
    fn activity_scenario() {
        let window = YearWindow::new(2017, 2021).unwrap();
        let records = [
            ActivityRecord::new(2019, 2021),
            ActivityRecord::new(2015, 2015),
            ActivityRecord::new(2016, 2020),
        ];
        assert_eq!(
            activity_distribution(&records, window, 3),
            "2021:0.00%\n2020:33.33%\n2019:33.33%\n2018:0.00%\n2017:0.00%\nOthers:33.33%"
        );
    }

    #[test]
    fn activity_without_records() {
        let window = YearWindow::new(2017, 2021).unwrap();
        assert_eq!(
            activity_distribution(&[], window, 3),
            "2021:0.00%\n2020:0.00%\n2019:0.00%\n2018:0.00%\n2017:0.00%"
        );
    }
}
