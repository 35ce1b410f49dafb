//! Configuration management for BudgetBuddy
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.budgetbuddy/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::{DEFAULT_API_URL, DEFAULT_TIMEOUT};
use crate::errors::{AllocatorError, Result};
use crate::types::campaign::{constraint_in_range, default_constraints};
use crate::types::{CampaignInput, Platform, PlatformConstraints, PrimaryGoal};

/// Complete configuration for BudgetBuddy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub campaign: CampaignConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Allocation service connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Campaign values used when a flag is not given
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignConfig {
    pub company_name: String,
    pub monthly_budget: f64,
    pub primary_goal: PrimaryGoal,
    pub constraints: ConstraintsConfig,
}

/// Default minimum share per platform, in percent
///
/// Platforms left out of `[campaign.constraints]` keep their built-in minimum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintsConfig {
    pub google: f64,
    pub meta: f64,
    pub tiktok: f64,
    pub linkedin: f64,
}

/// Terminal output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color_output: bool,
    pub show_benchmarks: bool,
}

/// Log level override; verbosity flags decide when unset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<log::LevelFilter>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Default for CampaignConfig {
    fn default() -> Self {
        let input = CampaignInput::default();
        Self {
            company_name: input.company_name,
            monthly_budget: input.monthly_budget,
            primary_goal: input.primary_goal,
            constraints: ConstraintsConfig::default(),
        }
    }
}

impl Default for ConstraintsConfig {
    fn default() -> Self {
        default_constraints().into()
    }
}

impl From<PlatformConstraints> for ConstraintsConfig {
    fn from(constraints: PlatformConstraints) -> Self {
        Self {
            google: constraints.google,
            meta: constraints.meta,
            tiktok: constraints.tiktok,
            linkedin: constraints.linkedin,
        }
    }
}

impl From<ConstraintsConfig> for PlatformConstraints {
    fn from(config: ConstraintsConfig) -> Self {
        PlatformConstraints {
            google: config.google,
            meta: config.meta,
            tiktok: config.tiktok,
            linkedin: config.linkedin,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color_output: true,
            show_benchmarks: true,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AllocatorError::ConfigError(format!("Failed to read config: {}", e)))?;

        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| AllocatorError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from the standard location, or built-in defaults when absent
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".budgetbuddy").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let base_url = reqwest::Url::parse(&self.api.base_url).map_err(|e| {
            AllocatorError::ConfigError(format!("Invalid api.base_url '{}': {}", self.api.base_url, e))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(AllocatorError::ConfigError(format!(
                "api.base_url must use http or https, got '{}'",
                base_url.scheme()
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(AllocatorError::ConfigError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if !(self.campaign.monthly_budget > 0.0) {
            return Err(AllocatorError::ConfigError(
                "monthly_budget must be greater than 0".to_string(),
            ));
        }

        let constraints = PlatformConstraints::from(self.campaign.constraints);
        for platform in Platform::ALL {
            let percent = *constraints.get(platform);
            if !constraint_in_range(percent) {
                return Err(AllocatorError::ConfigError(format!(
                    "constraints.{} must be between 5 and 50, got {}",
                    platform, percent
                )));
            }
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| AllocatorError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AllocatorError::ConfigError(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| AllocatorError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Campaign input built from the configured defaults
    pub fn campaign_input(&self) -> CampaignInput {
        CampaignInput {
            company_name: self.campaign.company_name.clone(),
            monthly_budget: self.campaign.monthly_budget,
            primary_goal: self.campaign.primary_goal.clone(),
            constraints: self.campaign.constraints.into(),
        }
    }
}
