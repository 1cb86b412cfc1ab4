//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `FACTCHECK_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::completion::CompletionConfig;
use crate::constants::{
    DEFAULT_COMPLETION_MODEL, DEFAULT_COMPLETION_TIMEOUT_SECS, DEFAULT_COMPLETION_URL,
    DEFAULT_DISTANCE_NORMALIZATION, DEFAULT_GATE_THRESHOLD, DEFAULT_TOP_K,
};
use crate::embedding::SentenceConfig;
use crate::pipeline::CheckOptions;
use crate::retrieval::ConfidenceCalibration;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `FACTCHECK_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Shared base path of the persisted index artifacts. Default: `./.data/fact_index`.
    pub index_path: PathBuf,

    /// Corpus file used when the index has to be rebuilt. Default: `./facts.txt`.
    pub corpus_path: PathBuf,

    /// Sentence-transformer directory. `None` runs the embedder in stub mode.
    pub model_path: Option<PathBuf>,

    /// Completion service endpoint. Default: `http://localhost:11434`.
    pub llm_url: String,

    /// Completion model identifier. Default: `mistral`.
    pub llm_model: String,

    /// Completion request timeout. Default: 60s.
    pub llm_timeout: Duration,

    /// Default number of facts retrieved per claim. Default: `3`.
    pub top_k: usize,

    /// Default confidence gate. Default: `0.3`.
    pub threshold: f32,

    /// Confidence normalization constant. Default: `10.0`.
    pub distance_scale: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            index_path: PathBuf::from("./.data/fact_index"),
            corpus_path: PathBuf::from("./facts.txt"),
            model_path: None,
            llm_url: DEFAULT_COMPLETION_URL.to_string(),
            llm_model: DEFAULT_COMPLETION_MODEL.to_string(),
            llm_timeout: Duration::from_secs(DEFAULT_COMPLETION_TIMEOUT_SECS),
            top_k: DEFAULT_TOP_K,
            threshold: DEFAULT_GATE_THRESHOLD,
            distance_scale: DEFAULT_DISTANCE_NORMALIZATION,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "FACTCHECK_PORT";
    const ENV_BIND_ADDR: &'static str = "FACTCHECK_BIND_ADDR";
    const ENV_INDEX_PATH: &'static str = "FACTCHECK_INDEX_PATH";
    const ENV_CORPUS_PATH: &'static str = "FACTCHECK_CORPUS_PATH";
    const ENV_MODEL_PATH: &'static str = "FACTCHECK_MODEL_PATH";
    const ENV_LLM_URL: &'static str = "FACTCHECK_LLM_URL";
    const ENV_LLM_MODEL: &'static str = "FACTCHECK_LLM_MODEL";
    const ENV_LLM_TIMEOUT_SECS: &'static str = "FACTCHECK_LLM_TIMEOUT_SECS";
    const ENV_TOP_K: &'static str = "FACTCHECK_TOP_K";
    const ENV_THRESHOLD: &'static str = "FACTCHECK_THRESHOLD";
    const ENV_DISTANCE_SCALE: &'static str = "FACTCHECK_DISTANCE_SCALE";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let index_path = Self::parse_path_from_env(Self::ENV_INDEX_PATH, defaults.index_path);
        let corpus_path = Self::parse_path_from_env(Self::ENV_CORPUS_PATH, defaults.corpus_path);
        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let llm_url = Self::parse_string_from_env(Self::ENV_LLM_URL, defaults.llm_url);
        let llm_model = Self::parse_string_from_env(Self::ENV_LLM_MODEL, defaults.llm_model);
        let llm_timeout = Self::parse_from_env(
            Self::ENV_LLM_TIMEOUT_SECS,
            defaults.llm_timeout.as_secs(),
        )
        .map(Duration::from_secs)?;
        let top_k = Self::parse_from_env(Self::ENV_TOP_K, defaults.top_k)?;
        let threshold = Self::parse_from_env(Self::ENV_THRESHOLD, defaults.threshold)?;
        let distance_scale =
            Self::parse_from_env(Self::ENV_DISTANCE_SCALE, defaults.distance_scale)?;

        let config = Self {
            port,
            bind_addr,
            index_path,
            corpus_path,
            model_path,
            llm_url,
            llm_model,
            llm_timeout,
            top_k,
            threshold,
            distance_scale,
        };
        config.validate_ranges()?;
        Ok(config)
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_ranges()?;

        if let Some(parent) = self.index_path.parent()
            && parent.exists()
            && !parent.is_dir()
        {
            return Err(ConfigError::NotADirectory {
                path: parent.to_path_buf(),
            });
        }

        if self.corpus_path.exists() && !self.corpus_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.corpus_path.clone(),
            });
        }

        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    fn validate_ranges(&self) -> Result<(), ConfigError> {
        if self.top_k == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_TOP_K,
                value: self.top_k.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_THRESHOLD,
                value: self.threshold.to_string(),
                reason: "must be between 0.0 and 1.0".to_string(),
            });
        }

        if !(self.distance_scale.is_finite() && self.distance_scale > 0.0) {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_DISTANCE_SCALE,
                value: self.distance_scale.to_string(),
                reason: "must be a positive number".to_string(),
            });
        }

        if self.llm_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_LLM_TIMEOUT_SECS,
                value: "0".to_string(),
                reason: "must be at least 1 second".to_string(),
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Default per-call options derived from this config.
    pub fn check_options(&self) -> CheckOptions {
        CheckOptions {
            top_k: self.top_k,
            threshold: self.threshold,
        }
    }

    /// Confidence calibration derived from this config.
    pub fn calibration(&self) -> ConfidenceCalibration {
        ConfidenceCalibration::new(self.distance_scale)
    }

    /// Completion client settings derived from this config.
    pub fn completion_config(&self) -> CompletionConfig {
        CompletionConfig {
            endpoint: self.llm_url.clone(),
            model: self.llm_model.clone(),
            timeout: self.llm_timeout,
        }
    }

    /// Embedder settings derived from this config (stub mode when no model path is set).
    pub fn embedder_config(&self) -> SentenceConfig {
        match &self.model_path {
            Some(path) => SentenceConfig::new(path.clone()),
            None => SentenceConfig::stub(),
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    fn parse_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidValue {
                    name: var_name,
                    value: value.clone(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(default),
        }
    }
}
