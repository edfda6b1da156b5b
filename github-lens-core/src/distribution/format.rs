use std::fmt::{Display, Write};

use super::rank::BucketedDistribution;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatStyle {
    /// `Go:80.00`
    #[default]
    Plain,
    /// `2021:50.00%`
    PercentSign,
}

/// Renders one `key:value` line per entry, values to two decimals, joined by
/// newlines with no trailing separator. A zero-valued `Others` entry is left out.
pub fn format_distribution<K: Display>(bucketed: &BucketedDistribution<K>, style: FormatStyle) -> String {
    let suffix = match style {
        FormatStyle::Plain => "",
        FormatStyle::PercentSign => "%",
    };
    let mut out = String::new();
    for entry in bucketed.iter().filter(|e| !(e.is_others() && e.percentage == 0.0)) {
        if !out.is_empty() {
            out.push('\n');
        }
        // writing into a String cannot fail
        let _ = write!(out, "{}:{:.2}{suffix}", entry.key, entry.percentage);
    }
    out
}
