use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::{FilterBuilder, LayoutError, MarkerLayout, DEFAULT_FACET_FIELD, DEFAULT_GRID_SPACING};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub filters: FilterSettings,
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct FilterSettings {
    #[serde(default = "default_facet_field")]
    pub facet_field: String,
    #[serde(default)]
    pub dedupe_facets: bool,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            facet_field: default_facet_field(),
            dedupe_facets: false,
        }
    }
}

impl FilterSettings {
    pub fn builder(&self) -> FilterBuilder {
        FilterBuilder::new(self.facet_field.clone()).with_dedupe(self.dedupe_facets)
    }
}

fn default_facet_field() -> String { DEFAULT_FACET_FIELD.to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LayoutSettings {
    #[serde(default = "default_grid_spacing")]
    pub grid_spacing: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            grid_spacing: default_grid_spacing(),
        }
    }
}

impl LayoutSettings {
    pub fn marker_layout(&self) -> Result<MarkerLayout, LayoutError> {
        MarkerLayout::new(self.grid_spacing)
    }
}

fn default_grid_spacing() -> f64 { DEFAULT_GRID_SPACING }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with FINDER__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., FINDER__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("FINDER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("FINDER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
