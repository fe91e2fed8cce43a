//! Helper configuration.
//!
//! Loads `config.toml` from the site directory. Stock defaults are serialized
//! to a TOML table, the user file is merged over it key by key, and the result
//! is deserialized and validated. Unknown keys are rejected to catch typos.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! web_root = "wwwroot"          # Directory asset URLs map into
//!
//! [assets]
//! # version = "2024.1"          # Cache-busting token (default: build version)
//!
//! [site]
//! # base_url = "https://example.com"  # Makes canonical URLs absolute
//!
//! [images]
//! mode = "crop"                 # crop, pad, boxpad, max, min, stretch
//! anchor = "middlecenter"       # topleft ... bottomright
//! # fallback_url = "/img/no-image.png"
//!
//! [lazyload]
//! placeholder = "data:image/gif;base64,..."
//! ```
//!
//! ## Partial Configuration
//!
//! ```toml
//! [images]
//! fallback_url = "/img/placeholder.jpg"
//! ```

use crate::assets::VersionToken;
use crate::lazyload::BLANK_GIF;
use crate::transform::{Anchor, ResizeMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings shared by all helpers of a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HelperConfig {
    /// Directory (relative to the site directory) that asset URLs map into.
    pub web_root: String,
    pub assets: AssetsConfig,
    pub site: SiteConfig,
    pub images: ImagesConfig,
    pub lazyload: LazyLoadConfig,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            web_root: "wwwroot".to_string(),
            assets: AssetsConfig::default(),
            site: SiteConfig::default(),
            images: ImagesConfig::default(),
            lazyload: LazyLoadConfig::default(),
        }
    }
}

impl HelperConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.web_root.trim().is_empty() {
            return Err(ConfigError::Validation(
                "web_root must not be empty".into(),
            ));
        }
        if let Some(version) = &self.assets.version {
            if version.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "assets.version must not be blank".into(),
                ));
            }
            if version.chars().any(|c| c.is_whitespace() || matches!(c, '&' | '#' | '?')) {
                return Err(ConfigError::Validation(
                    "assets.version must not contain whitespace, '&', '#' or '?'".into(),
                ));
            }
        }
        if let Some(base) = &self.site.base_url {
            if !(base.starts_with("http://") || base.starts_with("https://")) {
                return Err(ConfigError::Validation(
                    "site.base_url must start with http:// or https://".into(),
                ));
            }
        }
        if self.lazyload.placeholder.trim().is_empty() {
            return Err(ConfigError::Validation(
                "lazyload.placeholder must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Configured version override, else the build version.
    pub fn version_token(&self) -> VersionToken {
        match &self.assets.version {
            Some(v) => VersionToken::new(v.clone()),
            None => VersionToken::build(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Cache-busting token. When absent the build version is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Public origin of the site, used to absolutize canonical URLs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Defaults for the media image helper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    pub mode: ResizeMode,
    pub anchor: Anchor,
    /// Image shown when a media reference does not resolve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LazyLoadConfig {
    /// `src` of lazy images before the script swaps in the real URL.
    pub placeholder: String,
}

impl Default for LazyLoadConfig {
    fn default() -> Self {
        Self {
            placeholder: BLANK_GIF.to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(HelperConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<HelperConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: HelperConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, over stock defaults.
pub fn load_config(dir: &Path) -> Result<HelperConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// A fully-commented stock `config.toml` with all keys and explanations.
pub fn stock_config_toml() -> &'static str {
    r##"# View helper configuration
# ==========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Directory, relative to the site directory, that asset URLs such as
# /css/site.css are looked up in before a cache-busted tag is emitted.
web_root = "wwwroot"

# ---------------------------------------------------------------------------
# Static assets
# ---------------------------------------------------------------------------
[assets]
# Cache-busting token appended as ?v=... to stylesheet, script and image URLs.
# Omit to use the build version.
# version = "2024.1"

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Public origin. When set, canonical link tags use absolute URLs.
# base_url = "https://example.com"

# ---------------------------------------------------------------------------
# Media images
# ---------------------------------------------------------------------------
[images]
# Resize mode when a width or height is requested:
# crop, pad, boxpad, max, min, stretch
mode = "crop"

# Crop anchor: topleft, topcenter, topright, middleleft, middlecenter,
# middleright, bottomleft, bottomcenter, bottomright
anchor = "middlecenter"

# Image shown when a media reference does not resolve.
# fallback_url = "/img/no-image.png"

# ---------------------------------------------------------------------------
# Lazy loading
# ---------------------------------------------------------------------------
[lazyload]
# src of lazy images until the script loads the real crop.
placeholder = "data:image/gif;base64,R0lGODlhAQABAAAAACH5BAEKAAEALAAAAAABAAEAAAICTAEAOw=="
"##
}
