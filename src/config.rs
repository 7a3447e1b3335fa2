//! Site configuration module.
//!
//! Handles loading and validating `site.toml`. Values are layered, highest
//! priority first:
//!
//! ```text
//! environment variables   PUBLIC_BASE_URL, PUBLIC_SITE_URL, PUBLIC_ASSETS_PREFIX, SITE_ENV
//! site.toml               in the project root (optional)
//! stock defaults          shown below
//! ```
//!
//! ## Config File Location
//!
//! ```text
//! project/
//! ├── site.toml                # Site config (optional)
//! ├── public/                  # Static assets, served from `base`
//! │   └── img/
//! └── src/
//!     ├── components/          # Scanned by the image audit
//!     └── content/             # Content collections
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base = "/"                        # Path the site is served under
//! site = "https://example.com"      # Canonical site URL
//! # assets_prefix = "https://cdn.example.com"
//! output = "static"                 # Only static output is supported
//! environment = "production"        # development | staging | production
//! default_language = "en"
//!
//! content_dir = "src/content"
//! src_dir = "src"
//! public_dir = "public"
//! output_dir = "dist"
//!
//! [audit]
//! extensions = ["astro", "js", "ts"]
//! ```
//!
//! Run `site-content gen-config` for the documented template.

use crate::schema::{Environment, UnknownEnvironment};
use confique::Config;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Confique(#[from] confique::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

impl From<UnknownEnvironment> for ConfigError {
    fn from(err: UnknownEnvironment) -> Self {
        ConfigError::Validation(format!("environment: {err}"))
    }
}

/// Site configuration loaded from `site.toml` and the environment.
#[derive(Config, Debug, Clone)]
pub struct SiteConfig {
    /// Path the site is served under. Local image references are prefixed
    /// with it.
    #[config(env = "PUBLIC_BASE_URL", default = "/")]
    pub base: String,

    /// Canonical URL of the deployed site.
    #[config(env = "PUBLIC_SITE_URL", default = "https://example.com")]
    pub site: String,

    /// Prefix for stylesheet and script URLs, e.g. a CDN origin.
    #[config(env = "PUBLIC_ASSETS_PREFIX")]
    pub assets_prefix: Option<String>,

    /// Output mode. Only "static" is supported.
    #[config(default = "static")]
    pub output: String,

    /// Deployment environment content is resolved for:
    /// "development", "staging", or "production".
    #[config(env = "SITE_ENV", default = "production")]
    pub environment: String,

    /// Language rendered at the site root; others get a `/<code>/` prefix.
    #[config(default = "en")]
    pub default_language: String,

    /// Content collections directory, relative to the project root.
    #[config(default = "src/content")]
    pub content_dir: String,

    /// Component sources scanned by the image audit.
    #[config(default = "src")]
    pub src_dir: String,

    /// Static assets directory; image references resolve against it.
    #[config(default = "public")]
    pub public_dir: String,

    /// Where `build` writes the preview site.
    #[config(default = "dist")]
    pub output_dir: String,

    #[config(nested)]
    pub audit: AuditConfig,
}

/// Image audit settings.
#[derive(Config, Debug, Clone)]
pub struct AuditConfig {
    /// File extensions (without the dot) scanned for image references.
    #[config(default = ["astro", "js", "ts"])]
    pub extensions: Vec<String>,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output != "static" {
            return Err(ConfigError::Validation(format!(
                "output must be \"static\", got \"{}\"",
                self.output
            )));
        }
        if !self.base.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "base must start with '/', got \"{}\"",
                self.base
            )));
        }
        if self.default_language.is_empty() {
            return Err(ConfigError::Validation(
                "default_language must not be empty".into(),
            ));
        }
        if self.audit.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "audit.extensions must not be empty".into(),
            ));
        }
        self.environment()?;
        Ok(())
    }

    /// The configured environment, parsed.
    pub fn environment(&self) -> Result<Environment, ConfigError> {
        Ok(self.environment.parse()?)
    }

    pub fn content_path(&self, root: &Path) -> PathBuf {
        root.join(&self.content_dir)
    }

    pub fn src_path(&self, root: &Path) -> PathBuf {
        root.join(&self.src_dir)
    }

    pub fn public_path(&self, root: &Path) -> PathBuf {
        root.join(&self.public_dir)
    }

    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output_dir)
    }
}

/// Load config for a project root: environment variables over
/// `site.toml` over stock defaults, then validate.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config = SiteConfig::builder()
        .env()
        .file(root.join(CONFIG_FILE))
        .load()?;
    config.validate()?;
    Ok(config)
}

/// Like [`load_config`], ignoring environment variables.
pub fn load_file_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config = SiteConfig::builder().file(root.join(CONFIG_FILE)).load()?;
    config.validate()?;
    Ok(config)
}

/// A fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> String {
    confique::toml::template::<SiteConfig>(confique::toml::FormatOptions::default())
}
