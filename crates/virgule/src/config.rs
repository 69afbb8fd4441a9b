// File: src/config.rs
// Purpose: Configuration parsing from virgule.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory the routes tree is scanned from (default: "app/routes")
    #[serde(default = "default_routes_dir")]
    pub routes_dir: String,

    /// Optional separate directory mirroring the routes tree with
    /// controllers; when unset, only colocated controllers are looked up
    #[serde(default)]
    pub controllers_dir: Option<String>,

    /// File extension that marks a leaf as a controller (default: "rs")
    #[serde(default = "default_controller_ext")]
    pub controller_ext: String,

    /// Views for the built-in error pages
    #[serde(default, alias = "errorPages")]
    pub error_pages: ErrorPagesConfig,

    /// Sanitize server-fault messages in JSON error bodies
    #[serde(default)]
    pub production: bool,
}

/// Error-page views, as paths relative to the routes directory
///
/// Slots left empty fall back to views found in the routes tree (`/404`,
/// `/500`, `/422`), then to built-in plain-text bodies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorPagesConfig {
    #[serde(default, rename = "404")]
    pub not_found: Option<String>,

    #[serde(default, rename = "500")]
    pub server_error: Option<String>,

    #[serde(default, rename = "bad_csrf", alias = "badCsrf")]
    pub bad_csrf: Option<String>,
}

// Default values
fn default_routes_dir() -> String {
    "app/routes".to_string()
}

fn default_controller_ext() -> String {
    "rs".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            routes_dir: default_routes_dir(),
            controllers_dir: None,
            controller_ext: default_controller_ext(),
            error_pages: ErrorPagesConfig::default(),
            production: false,
        }
    }
}

impl Config {
    /// Load configuration from virgule.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        // If file is empty, return default config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        // Parse TOML
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./virgule.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("virgule.toml")
    }

    /// The routes root, resolved against the application root
    pub fn routes_root(&self, app_root: &Path) -> PathBuf {
        app_root.join(&self.routes_dir)
    }

    /// The mirrored controllers root, when one is configured
    pub fn controllers_root(&self, app_root: &Path) -> Option<PathBuf> {
        self.controllers_dir.as_ref().map(|dir| app_root.join(dir))
    }
}
