use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::errors::{NewsError, NewsResult};

pub const DEFAULT_NEWSAPI_URL: &str = "https://newsapi.org/v2/everything";
pub const DEFAULT_GUARDIAN_URL: &str = "https://content.guardianapis.com/search";
pub const DEFAULT_NYT_URL: &str = "https://api.nytimes.com/svc/search/v2/articlesearch.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub newsapi_key: String,
    pub guardian_key: String,
    pub nyt_key: String,
    pub newsapi_url: Url,
    pub guardian_url: Url,
    pub nyt_url: Url,
    pub timeout: Duration,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> NewsResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read a `.env` file without touching the process environment
    pub fn from_dotenv_file(path: &Path) -> NewsResult<Self> {
        let mut values = HashMap::new();
        let iter = dotenvy::from_path_iter(path)
            .map_err(|e| NewsError::Config(format!("{}: {}", path.display(), e)))?;

        for item in iter {
            let (key, value) = item.map_err(|e| NewsError::Config(e.to_string()))?;
            values.insert(key, value);
        }

        Self::from_lookup(|key| values.get(key).cloned())
    }

    /// Build a config from any key lookup.
    ///
    /// Credentials are not validated: a missing key becomes an empty string and
    /// the corresponding source simply returns no articles.
    pub fn from_lookup<F>(lookup: F) -> NewsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let newsapi_key = lookup("NEWSAPI_KEY").unwrap_or_default();
        let guardian_key = lookup("GUARDIAN_API_KEY").unwrap_or_default();
        let nyt_key = lookup("NYT_API_KEY").unwrap_or_default();

        let newsapi_url = parse_url(&lookup, "NEWSHUB_NEWSAPI_URL", DEFAULT_NEWSAPI_URL)?;
        let guardian_url = parse_url(&lookup, "NEWSHUB_GUARDIAN_URL", DEFAULT_GUARDIAN_URL)?;
        let nyt_url = parse_url(&lookup, "NEWSHUB_NYT_URL", DEFAULT_NYT_URL)?;

        let timeout_secs = match lookup("NEWSHUB_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| NewsError::InvalidEnvVar {
                    name: "NEWSHUB_TIMEOUT_SECS".to_string(),
                    reason: format!("expected a positive integer, got {:?}", raw),
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            newsapi_key,
            guardian_key,
            nyt_key,
            newsapi_url,
            guardian_url,
            nyt_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_url<F>(lookup: &F, name: &str, default: &str) -> NewsResult<Url>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name).unwrap_or_else(|| default.to_string());
    Url::parse(raw.trim()).map_err(|e| NewsError::InvalidEnvVar {
        name: name.to_string(),
        reason: format!("{} ({})", e, raw),
    })
}
