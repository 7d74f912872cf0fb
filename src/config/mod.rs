//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `SNAPCHECK_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL_SECS, DEFAULT_IMAGE_PREFIX_LEN, DEFAULT_MODEL_ID,
    DEFAULT_PROMPT_TEMPLATE,
};

/// Files a CLIP model directory must contain.
pub const REQUIRED_MODEL_FILES: [&str; 2] = ["model.safetensors", "tokenizer.json"];

/// Verifier configuration loaded from environment variables.
///
/// Use [`VerifierConfig::from_env`] to read `SNAPCHECK_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Directory holding `model.safetensors` and `tokenizer.json`. `None` leaves the
    /// classifier unacquirable, so every verification fails closed.
    pub model_path: Option<PathBuf>,

    /// Model identifier passed along with acquisition requests. Default: CLIP ViT-B/32.
    pub model_id: String,

    /// Prompt wrapped around each candidate label. Default: `"a photo of {}"`.
    pub prompt_template: String,

    /// How long a verification result stays cached. Default: 5 minutes.
    pub cache_ttl: Duration,

    /// Max entries in the result cache. Default: `1_000`.
    pub cache_capacity: u64,

    /// Bytes of the encoded image used for the cache fingerprint. Default: `4096`.
    pub image_prefix_len: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            model_id: DEFAULT_MODEL_ID.to_string(),
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            image_prefix_len: DEFAULT_IMAGE_PREFIX_LEN,
        }
    }
}

impl VerifierConfig {
    const ENV_MODEL_PATH: &'static str = "SNAPCHECK_MODEL_PATH";
    const ENV_MODEL_ID: &'static str = "SNAPCHECK_MODEL_ID";
    const ENV_PROMPT_TEMPLATE: &'static str = "SNAPCHECK_PROMPT_TEMPLATE";
    const ENV_CACHE_TTL_SECS: &'static str = "SNAPCHECK_CACHE_TTL_SECS";
    const ENV_CACHE_CAPACITY: &'static str = "SNAPCHECK_CACHE_CAPACITY";
    const ENV_IMAGE_PREFIX_LEN: &'static str = "SNAPCHECK_IMAGE_PREFIX_LEN";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let model_id = Self::parse_string_from_env(Self::ENV_MODEL_ID, defaults.model_id);
        let prompt_template =
            Self::parse_string_from_env(Self::ENV_PROMPT_TEMPLATE, defaults.prompt_template);
        let cache_ttl = Self::parse_strict_u64_from_env(Self::ENV_CACHE_TTL_SECS)?
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache_ttl);
        let cache_capacity =
            Self::parse_u64_from_env(Self::ENV_CACHE_CAPACITY, defaults.cache_capacity);
        let image_prefix_len = Self::parse_strict_u64_from_env(Self::ENV_IMAGE_PREFIX_LEN)?
            .map(|v| v as usize)
            .unwrap_or(defaults.image_prefix_len);

        Ok(Self {
            model_path,
            model_id,
            prompt_template,
            cache_ttl,
            cache_capacity,
            image_prefix_len,
        })
    }

    /// Validates paths and basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_ttl.is_zero() {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_CACHE_TTL_SECS,
            });
        }

        if self.cache_capacity == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_CACHE_CAPACITY,
            });
        }

        if self.image_prefix_len == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_IMAGE_PREFIX_LEN,
            });
        }

        if !self.prompt_template.contains("{}") {
            return Err(ConfigError::InvalidPromptTemplate {
                template: self.prompt_template.clone(),
            });
        }

        if let Some(ref dir) = self.model_path {
            if !dir.exists() {
                return Err(ConfigError::PathNotFound { path: dir.clone() });
            }
            if !dir.is_dir() {
                return Err(ConfigError::NotADirectory { path: dir.clone() });
            }
            for file in REQUIRED_MODEL_FILES {
                if !dir.join(file).is_file() {
                    return Err(ConfigError::MissingModelFile {
                        dir: dir.clone(),
                        file,
                    });
                }
            }
        }

        Ok(())
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
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_strict_u64_from_env(name: &'static str) -> Result<Option<u64>, ConfigError> {
        match env::var(name) {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|e| ConfigError::NumberParseError {
                    name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(None),
        }
    }
}
