use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub token: Option<String>, // falls back to $GITHUB_TOKEN when None
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_base() -> String {
    "https://api.github.com".into()
}
fn default_timeout() -> u64 {
    10
}
fn default_user_agent() -> String {
    concat!("github-lens/", env!("CARGO_PKG_VERSION")).into()
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_secs: default_timeout(),
            token: None,
            user_agent: default_user_agent(),
        }
    }
}

impl GithubConfig {
    pub fn resolved_token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionConfig {
    #[serde(default = "default_top_n")]
    pub top_n: i64, // signed so a negative value reaches validation instead of failing to parse
    #[serde(default = "default_language_digits")]
    pub language_digits: u32,
    #[serde(default = "default_activity_digits")]
    pub activity_digits: u32,
    #[serde(default = "default_window_years")]
    pub window_years: u32,
}

fn default_top_n() -> i64 {
    5
}
fn default_language_digits() -> u32 {
    2
}
fn default_activity_digits() -> u32 {
    3
}
fn default_window_years() -> u32 {
    5
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            language_digits: default_language_digits(),
            activity_digits: default_activity_digits(),
            window_years: default_window_years(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

fn default_output_path() -> String {
    "users.json".into()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub distribution: DistributionConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("github-lens")
            .join("config.toml")
    }

    pub fn load() -> crate::Result<Self> {
        let path = if let Ok(env_path) = std::env::var("GITHUB_LENS_CONFIG") {
            PathBuf::from(env_path) // $GITHUB_LENS_CONFIG overrides default config path
        } else {
            Self::config_path()
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| crate::GithubLensError::Config(format!("{}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.distribution.top_n, 5);
        assert_eq!(cfg.distribution.language_digits, 2);
        assert_eq!(cfg.distribution.activity_digits, 3);
        assert_eq!(cfg.distribution.window_years, 5);
        assert_eq!(cfg.github.api_base, "https://api.github.com");
        assert_eq!(cfg.github.timeout_secs, 10);
        assert_eq!(cfg.export.output_path, "users.json");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "[distribution]\ntop_n = 3\n\n[export]\noutput_path = \"out/report.json\"").unwrap();
        let cfg = Config::load_from(tmp.path()).unwrap();
        assert_eq!(cfg.distribution.top_n, 3);
        assert_eq!(cfg.distribution.activity_digits, 3);
        assert_eq!(cfg.export.output_path, "out/report.json");
        assert_eq!(cfg.github.timeout_secs, 10);
    }

    #[test]
    fn negative_top_n_parses() {
        let cfg: Config = toml::from_str("[distribution]\ntop_n = -1\n").unwrap();
        assert_eq!(cfg.distribution.top_n, -1);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "[distribution\ntop_n = ").unwrap();
        let err = Config::load_from(tmp.path()).unwrap_err();
        assert!(matches!(err, crate::GithubLensError::Config(_)));
    }
}
