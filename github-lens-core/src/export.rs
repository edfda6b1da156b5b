use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

use github_lens_common::Result;

use crate::report::UserReport;

const FLAT_SEPARATOR: &str = " - ";

static RE_NEWLINE: OnceLock<Regex> = OnceLock::new();

fn re_newline() -> &'static Regex { RE_NEWLINE.get_or_init(|| Regex::new(r"\r?\n").unwrap()) }

/// single-line form of a distribution string: newlines become " - ", no trailing separator
pub fn flatten_distribution(s: &str) -> String {
    let flat = re_newline().replace_all(s, FLAT_SEPARATOR);
    flat.strip_suffix(FLAT_SEPARATOR).unwrap_or(&*flat).to_owned()
}

/// copy of `report` with its distribution strings flattened for export
pub fn flatten_report(report: &UserReport) -> UserReport {
    UserReport {
        languages: flatten_distribution(&report.languages),
        activity: flatten_distribution(&report.activity),
        ..report.clone()
    }
}

/// write all reports as one pretty-printed JSON array
pub fn export_json(output_path: &Path, reports: &[UserReport]) -> Result<()> {
    let flat: Vec<UserReport> = reports.iter().map(flatten_report).collect();
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = std::fs::File::create(output_path)?;
    serde_json::to_writer_pretty(&mut file, &flat)?;
    log::info!("wrote {} reports to {}", flat.len(), output_path.display());
    Ok(())
}
