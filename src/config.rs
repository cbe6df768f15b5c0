//! Configuration management for ticketscout
//!
//! This module handles loading, parsing, and validation of
//! configuration files.

use crate::constants::{MAX_PAGE_REQUESTS, PANEL_MIN_WIDTH, SEARCH_PER_PAGE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub search: SearchConfig,
    pub platform: PlatformConfig,
    pub logging: LoggingConfig,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Enable mouse support
    pub mouse_enabled: bool,
    /// Minimum panel width in columns
    pub panel_min_width: u16,
    /// Locale used for UI text
    pub locale: String,
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Results requested per page
    pub per_page: u32,
    /// Upper bound on pages followed when fetching brands/assignees
    pub max_page_requests: u32,
    /// Offer related-ticket keyword suggestions from the context
    /// ticket subject
    pub related_tickets: bool,
    /// Comma/space separated custom field ids whose values become
    /// keyword suggestions, e.g. "10023 10045"
    pub custom_fields: String,
    /// Optional ticket id giving the panel a context ticket, the way
    /// the original sidebar is anchored to the ticket being viewed
    pub context_ticket_id: Option<u64>,
}

/// Platform connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Account subdomain, e.g. "acme" for acme.zendesk.com
    pub subdomain: String,
    /// Agent email used for API token auth
    pub email: String,
    /// Environment variable holding the API token
    pub api_token_env: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable file logging
    pub enabled: bool,
    /// Log level: error, warn, info, debug, trace
    pub level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            mouse_enabled: true,
            panel_min_width: PANEL_MIN_WIDTH,
            locale: "en".to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            per_page: SEARCH_PER_PAGE,
            max_page_requests: MAX_PAGE_REQUESTS,
            related_tickets: true,
            custom_fields: String::new(),
            context_ticket_id: None,
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            subdomain: String::new(),
            email: String::new(),
            api_token_env: "ZENDESK_API_TOKEN".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("ticketscout.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("ticketscout").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Write a default config to the XDG config directory if none
    /// exists yet. Returns the path when a file was generated.
    pub fn generate_default() -> Result<Option<PathBuf>> {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(None);
        };
        let dir = config_dir.join("ticketscout");
        let path = dir.join("config.toml");
        if path.exists() {
            return Ok(None);
        }
        std::fs::create_dir_all(&dir)?;
        std::fs::write(&path, toml::to_string_pretty(&Config::default())?)?;
        Ok(Some(path))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.ui.panel_min_width < 20 {
            anyhow::bail!(
                "panel_min_width must be at least 20 columns, got {}",
                self.ui.panel_min_width
            );
        }

        if self.search.per_page == 0 || self.search.per_page > 100 {
            anyhow::bail!(
                "per_page must be between 1 and 100, got {}",
                self.search.per_page
            );
        }

        if self.search.max_page_requests == 0 {
            anyhow::bail!("max_page_requests must be at least 1");
        }

        if !self.logging.level.is_empty() {
            let valid = ["error", "warn", "info", "debug", "trace"];
            if !valid.contains(&self.logging.level.as_str()) {
                anyhow::bail!("Invalid log level '{}'", self.logging.level);
            }
        }

        Ok(())
    }
}
