use crate::config::DEFAULT_BACKING_FILE;
use crate::core::{ConfigProvider, MalformedLinePolicy};
use crate::utils::error::{Result, StockError};
use crate::utils::validation::{validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_backing_file")]
    pub backing_file_path: String,
    pub on_malformed_line: Option<MalformedLinePolicy>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backing_file_path: default_backing_file(),
            on_malformed_line: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub color: Option<bool>,
}

fn default_backing_file() -> String {
    DEFAULT_BACKING_FILE.to_string()
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StockError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StockError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StockError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn backing_file_path(&self) -> &str {
        &self.store.backing_file_path
    }

    fn malformed_line_policy(&self) -> MalformedLinePolicy {
        self.store.on_malformed_line.unwrap_or_default()
    }

    fn color_enabled(&self) -> bool {
        self.display.color.unwrap_or(true)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("store.backing_file_path", &self.store.backing_file_path)
    }
}
