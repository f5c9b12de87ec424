// src/config.rs
// =============================================================================
// Crawl configuration.
//
// Values come from three places, later ones winning:
// 1. built-in defaults (the default_* functions below)
// 2. an optional JSON file (--config crawl.json)
// 3. command-line flags (see cli.rs)
//
// CrawlConfig is the raw, deserializable form. validate() checks it and
// produces CrawlSettings, the only form the rest of the program accepts.
// =============================================================================

use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::crawl::CrawlLimits;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CrawlConfig {
    #[serde(default)]
    pub seeds: Vec<String>,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default)]
    pub max_processed: Option<usize>,

    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_check_status")]
    pub check_status: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seeds: Vec::new(),
            max_depth: default_max_depth(),
            max_processed: None,
            concurrency: default_concurrency(),
            output: default_output(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            check_status: default_check_status(),
        }
    }
}

fn default_max_depth() -> usize {
    2
}

fn default_concurrency() -> usize {
    5
}

fn default_output() -> PathBuf {
    PathBuf::from("crawl_results.jsonl")
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("deepcrawl/{}", env!("CARGO_PKG_VERSION"))
}

fn default_check_status() -> bool {
    true
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no seed URLs given")]
    NoSeeds,

    #[error("invalid seed URL {seed:?}: {source}")]
    InvalidSeed {
        seed: String,
        #[source]
        source: url::ParseError,
    },

    #[error("seed URL {0} is not http or https")]
    UnsupportedSeedScheme(String),

    #[error("concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("timeout must be at least 1 second")]
    ZeroTimeout,
}

/// A checked configuration, ready to run
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub seeds: Vec<Url>,
    pub limits: CrawlLimits,
    pub output: PathBuf,
    pub timeout: Duration,
    pub user_agent: String,
    pub check_status: bool,
}

impl CrawlConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    // Seeds are parsed in the order given and are not de-duplicated
    pub fn validate(&self) -> Result<CrawlSettings, ConfigError> {
        if self.seeds.is_empty() {
            return Err(ConfigError::NoSeeds);
        }

        let seeds = self
            .seeds
            .iter()
            .map(|seed| parse_seed(seed))
            .collect::<Result<Vec<_>, _>>()?;

        let concurrency = NonZeroUsize::new(self.concurrency).ok_or(ConfigError::ZeroConcurrency)?;

        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(CrawlSettings {
            seeds,
            limits: CrawlLimits {
                max_depth: self.max_depth,
                max_processed: self.max_processed,
                concurrency,
            },
            output: self.output.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
            check_status: self.check_status,
        })
    }
}

fn parse_seed(seed: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(seed.trim()).map_err(|source| ConfigError::InvalidSeed {
        seed: seed.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedSeedScheme(url.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_seeds(seeds: &[&str]) -> CrawlConfig {
        CrawlConfig {
            seeds: seeds.iter().map(|s| s.to_string()).collect(),
            ..CrawlConfig::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = CrawlConfig::default();
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.max_processed, None);
        assert_eq!(config.output, PathBuf::from("crawl_results.jsonl"));
        assert!(config.check_status);
    }

    #[test]
    fn test_json_uses_camel_case_and_defaults() {
        let config: CrawlConfig = serde_json::from_str(
            r#"{"seeds": ["https://example.com"], "maxDepth": 3, "maxProcessed": 40}"#,
        )
        .unwrap();

        assert_eq!(config.seeds, vec!["https://example.com"]);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.max_processed, Some(40));
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_json_rejects_unknown_fields() {
        let result = serde_json::from_str::<CrawlConfig>(r#"{"depth": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_json_rejects_negative_depth() {
        let result = serde_json::from_str::<CrawlConfig>(r#"{"maxDepth": -1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crawl.json");
        std::fs::write(&path, r#"{"seeds": ["https://a.test"], "concurrency": 8}"#).unwrap();

        let config = CrawlConfig::from_json_file(&path).unwrap();
        assert_eq!(config.concurrency, 8);
    }

    #[test]
    fn test_from_missing_file() {
        let err = CrawlConfig::from_json_file(Path::new("/no/such/crawl.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_validate_keeps_seed_order_and_duplicates() {
        let settings = config_with_seeds(&["https://b.test", "https://a.test", "https://b.test"])
            .validate()
            .unwrap();

        let seeds: Vec<_> = settings.seeds.iter().map(Url::as_str).collect();
        assert_eq!(seeds, ["https://b.test/", "https://a.test/", "https://b.test/"]);
        assert_eq!(settings.limits.max_depth, 2);
        assert_eq!(settings.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_validate_requires_seeds() {
        let err = CrawlConfig::default().validate().unwrap_err();
        assert!(matches!(err, ConfigError::NoSeeds));
    }

    #[test]
    fn test_validate_rejects_bad_seed() {
        let err = config_with_seeds(&["not a url"]).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSeed { .. }));

        let err = config_with_seeds(&["ftp://files.test/"]).validate().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedSeedScheme(_)));
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let config = CrawlConfig {
            concurrency: 0,
            ..config_with_seeds(&["https://a.test"])
        };
        assert!(matches!(config.validate().unwrap_err(), ConfigError::ZeroConcurrency));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = CrawlConfig {
            timeout_secs: 0,
            ..config_with_seeds(&["https://a.test"])
        };
        assert!(matches!(config.validate().unwrap_err(), ConfigError::ZeroTimeout));
    }
}
