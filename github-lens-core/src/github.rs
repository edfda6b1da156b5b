use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use github_lens_common::{GithubConfig, GithubLensError, Result};

use crate::distribution::{count_map, ActivityRecord, CountMap};

const PER_PAGE: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubUser {
    pub login: String,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubRepo {
    pub name: String,
    #[serde(default)]
    pub forks_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GithubRepo {
    pub fn activity(&self) -> ActivityRecord {
        ActivityRecord::from_dates(&self.created_at, &self.updated_at)
    }
}

/// language name → bytes of code, as reported for one repository
pub type LanguageBytes = BTreeMap<String, u64>;

/// where user, repository and language data comes from
pub trait DataSource: Sync {
    fn user(&self, login: &str) -> Result<GithubUser>;
    fn repos(&self, login: &str) -> Result<Vec<GithubRepo>>;
    fn languages(&self, login: &str, repo: &str) -> Result<LanguageBytes>;
}

/// blocking client for the GitHub REST API
pub struct GithubClient {
    client: Client,
    api_base: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(cfg: &GithubConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .user_agent(cfg.user_agent.clone())
            .build()
            .map_err(|e| GithubLensError::Other(format!("HTTP client init failed: {e}")))?;
        Ok(Self {
            client,
            api_base: cfg.api_base.trim_end_matches('/').to_owned(),
            token: cfg.resolved_token(),
        })
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{}", self.api_base, path);
        log::debug!("GET {url}");
        let mut req = self.client.get(&url).header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req
            .send()
            .map_err(|e| GithubLensError::Other(format!("request to {url} failed: {e}")))?;
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GithubLensError::Auth(format!("GitHub returned HTTP {status} for {url}")));
        }
        if !status.is_success() {
            return Err(GithubLensError::Http { status: status.as_u16(), url });
        }
        resp.json::<T>()
            .map_err(|e| GithubLensError::Other(format!("bad JSON from {url}: {e}")))
    }
}

impl DataSource for GithubClient {
    fn user(&self, login: &str) -> Result<GithubUser> {
        self.get_json(&format!("users/{login}"))
    }

    fn repos(&self, login: &str) -> Result<Vec<GithubRepo>> {
        let mut repos = Vec::new();
        for page in 1.. {
            let batch: Vec<GithubRepo> =
                self.get_json(&format!("users/{login}/repos?per_page={PER_PAGE}&page={page}"))?;
            let last = batch.len() < PER_PAGE;
            repos.extend(batch);
            if last {
                break;
            }
        }
        Ok(repos)
    }

    fn languages(&self, login: &str, repo: &str) -> Result<LanguageBytes> {
        self.get_json(&format!("repos/{login}/{repo}/languages"))
    }
}

/// sum per-repository language byte counts into one CountMap
pub fn merge_language_counts<I>(per_repo: I) -> CountMap<String>
where
    I: IntoIterator<Item = LanguageBytes>,
{
    count_map(per_repo.into_iter().flatten())
}

pub fn total_forks(repos: &[GithubRepo]) -> u64 {
    repos.iter().map(|r| r.forks_count).filter(|&f| f > 0).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, forks: u64) -> GithubRepo {
        GithubRepo {
            name: name.into(),
            forks_count: forks,
            created_at: "2019-01-01T00:00:00Z".parse().unwrap(),
            updated_at: "2021-06-01T00:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn parses_user_payload() {
        let body = r#"{"login":"octocat","id":1,"public_repos":8,"followers":3938,"type":"User"}"#;
        let user: GithubUser = serde_json::from_str(body).unwrap();
        assert_eq!(user, GithubUser { login: "octocat".into(), public_repos: 8, followers: 3938 });
    }

    #[test]
    fn parses_repo_payload() {
        let body = r#"[{"name":"hello","forks_count":2,"fork":false,
            "created_at":"2018-05-02T10:00:00Z","updated_at":"2021-01-03T11:22:33Z"}]"#;
        let repos: Vec<GithubRepo> = serde_json::from_str(body).unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].forks_count, 2);
        assert_eq!(repos[0].activity(), ActivityRecord::new(2018, 2021));
    }

    #[test]
    fn merges_languages_across_repos() {
        let a: LanguageBytes = [("Rust".to_string(), 100), ("Go".to_string(), 50)].into_iter().collect();
        let b: LanguageBytes = [("Rust".to_string(), 25), ("C".to_string(), 5)].into_iter().collect();
        let merged = merge_language_counts(vec![a, b]);
        assert_eq!(merged["Rust"], 125.0);
        assert_eq!(merged["Go"], 50.0);
        assert_eq!(merged["C"], 5.0);
        assert!(merge_language_counts(Vec::<LanguageBytes>::new()).is_empty());
    }

    #[test]
    fn sums_forks() {
        assert_eq!(total_forks(&[repo("a", 3), repo("b", 0), repo("c", 4)]), 7);
        assert_eq!(total_forks(&[]), 0);
    }

    #[test]
    fn client_trims_base_url() {
        let cfg = GithubConfig { api_base: "http://localhost:9/".into(), ..GithubConfig::default() };
        let client = GithubClient::new(&cfg).unwrap();
        assert_eq!(client.api_base, "http://localhost:9");
    }
}
