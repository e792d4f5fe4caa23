use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CaptionSearchError, Result};

/// Environment variable consulted when no API key flag is given
pub const API_KEY_ENV_VAR: &str = "YOUTUBE_API_KEY";

/// Configuration for the caption search tool
///
/// Every field has a default, so the tool runs without a config file.
/// CLI flags override config values, and the API key additionally falls
/// back to the `YOUTUBE_API_KEY` environment variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// YouTube Data API settings
    pub api: ApiConfig,

    /// Scan settings
    pub scan: ScanConfig,

    /// Output settings
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// YouTube Data API key
    pub key: Option<String>,

    /// Timeout for API requests (seconds)
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// How many of the most recent videos to search when -n is not given
    pub default_n_videos: usize,

    /// Caption language preference, most preferred first
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Highlight matches with terminal colors
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            scan: ScanConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: None,
            timeout_seconds: 30,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            default_n_videos: 5,
            languages: vec!["en".to_string()],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl Config {
    /// Load configuration from a TOML file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                toml::from_str(&content).map_err(|e| {
                    CaptionSearchError::Config(format!("{}: {}", path.display(), e))
                })
            }
            None => Ok(Self::default()),
        }
    }

    /// Resolve the API key: flag, then environment, then config file
    pub fn resolve_api_key(&self, flag: Option<String>) -> Result<String> {
        flag.filter(|key| !key.is_empty())
            .or_else(|| {
                std::env::var(API_KEY_ENV_VAR)
                    .ok()
                    .filter(|key| !key.is_empty())
            })
            .or_else(|| self.api.key.clone())
            .ok_or(CaptionSearchError::MissingApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // resolve_api_key reads the process environment; serialize those tests
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.scan.default_n_videos, 5);
        assert_eq!(config.scan.languages, vec!["en".to_string()]);
        assert_eq!(config.api.timeout_seconds, 30);
        assert!(config.output.color);
        assert!(config.api.key.is_none());
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nkey = \"file-key\"\n\n[scan]\ndefault_n_videos = 12\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.api.key.as_deref(), Some("file-key"));
        assert_eq!(config.scan.default_n_videos, 12);
        // untouched sections keep their defaults
        assert!(config.output.color);
    }

    #[test]
    fn test_load_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "not valid toml [[[").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, CaptionSearchError::Config(_)));
    }

    #[test]
    fn test_api_key_precedence() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var(API_KEY_ENV_VAR, "env-key");

        let mut config = Config::default();
        config.api.key = Some("file-key".to_string());

        // flag beats env beats file
        assert_eq!(
            config.resolve_api_key(Some("flag-key".to_string())).unwrap(),
            "flag-key"
        );
        assert_eq!(config.resolve_api_key(None).unwrap(), "env-key");

        std::env::remove_var(API_KEY_ENV_VAR);
        assert_eq!(config.resolve_api_key(None).unwrap(), "file-key");
    }

    #[test]
    fn test_missing_api_key() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var(API_KEY_ENV_VAR);

        let config = Config::default();
        let err = config.resolve_api_key(None).unwrap_err();
        assert!(matches!(err, CaptionSearchError::MissingApiKey));
    }
}
