pub mod config;
pub use config::{Config, DistributionConfig, ExportConfig, GithubConfig};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GithubLensError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GithubLensError>;
