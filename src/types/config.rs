//! Configuration for RepoLens.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::{RepoLensError, RepoLensResult};

/// Environment variable holding the completion-service credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Main configuration for RepoLens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Code forge settings.
    #[serde(default)]
    pub forge: ForgeConfig,

    /// Completion service settings.
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Pipeline settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// HTTP request timeout (in seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            timeout_secs: default_timeout(),
        }
    }
}

impl GeneralConfig {
    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_timeout() -> u64 {
    60
}

/// Code forge (GitHub) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgeConfig {
    /// REST API base URL.
    #[serde(default = "default_forge_api_base")]
    pub api_base: String,

    /// Web base URL, used to build repository links.
    #[serde(default = "default_forge_web_base")]
    pub web_base: String,

    /// User-Agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            api_base: default_forge_api_base(),
            web_base: default_forge_web_base(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_forge_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_forge_web_base() -> String {
    "https://github.com".to_string()
}

fn default_user_agent() -> String {
    format!("repolens/{}", env!("CARGO_PKG_VERSION"))
}

/// Completion service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// API base URL.
    #[serde(default = "default_completion_api_base")]
    pub api_base: String,

    /// API key. The `OPENAI_API_KEY` environment variable takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum number of generated tokens.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_base: default_completion_api_base(),
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_completion_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo-instruct".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.7
}

/// Evaluation cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum cache capacity (number of entries).
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,

    /// Entry time to live in seconds.
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_cache_capacity() -> usize {
    100
}

fn default_cache_ttl() -> u64 {
    3600 // 1 hour
}

/// Pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pause between content assembly and evaluation (in milliseconds).
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,

    /// File name suffixes included in prompts.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pause_ms: default_pause_ms(),
            extensions: default_extensions(),
        }
    }
}

impl PipelineConfig {
    /// Pause as a `Duration`.
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}

fn default_pause_ms() -> u64 {
    1000
}

fn default_extensions() -> Vec<String> {
    [".py", ".ipynb", ".r", ".cpp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> RepoLensResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> RepoLensResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            forge: ForgeConfig::default(),
            completion: CompletionConfig::default(),
            cache: CacheConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }

    /// Tries to load configuration from current directory or uses default.
    pub fn load_or_default() -> Self {
        Self::load("repolens.toml").unwrap_or_else(|_| Self::default_config())
    }

    /// Resolves the completion credential.
    ///
    /// The environment variable wins over the file; blank values count as absent.
    pub fn credential(&self) -> RepoLensResult<SecretString> {
        let from_env = std::env::var(API_KEY_ENV).ok();
        Self::pick_credential(from_env, self.completion.api_key.clone())
    }

    fn pick_credential(
        from_env: Option<String>,
        from_file: Option<String>,
    ) -> RepoLensResult<SecretString> {
        from_env
            .filter(|k| !k.trim().is_empty())
            .or_else(|| from_file.filter(|k| !k.trim().is_empty()))
            .map(SecretString::new)
            .ok_or(RepoLensError::MissingCredential)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
