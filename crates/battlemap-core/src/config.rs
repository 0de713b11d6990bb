//! Configuration types for battlemap.
//!
//! [`Config::load`] reads `~/.config/battlemap/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist, then applies `BATTLEMAP__*`
//! environment overrides. [`Config::defaults`] returns the same defaults
//! without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[data]
path = "test.json"

[map]
default_center_lat = 20.0
default_center_lon = -100.0
default_zoom       = 4
show_labels        = false

[ui]
sidebar_width_pct = 30
theme = "default"
"#;

const ENV_PREFIX: &str = "BATTLEMAP";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/battlemap/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[data]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Dataset file, relative to the working directory unless absolute.
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

fn default_data_path() -> PathBuf { PathBuf::from("test.json") }

impl Default for DataConfig {
    fn default() -> Self {
        Self { path: default_data_path() }
    }
}

/// `[map]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_center_lat")]
    pub default_center_lat: f64,
    #[serde(default = "default_center_lon")]
    pub default_center_lon: f64,
    #[serde(default = "default_zoom")]
    pub default_zoom: u8,
    /// Draw each marker's timestamp tooltip next to it on the canvas.
    #[serde(default)]
    pub show_labels: bool,
}

fn default_center_lat() -> f64 { 20.0 }
fn default_center_lon() -> f64 { -100.0 }
fn default_zoom() -> u8 { 4 }

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center_lat: default_center_lat(),
            default_center_lon: default_center_lon(),
            default_zoom: default_zoom(),
            show_labels: false,
        }
    }
}

impl MapConfig {
    /// The viewport shown when a selection has nothing to draw.
    pub fn default_viewport(&self) -> crate::render::Viewport {
        crate::render::Viewport::Default {
            center: [self.default_center_lat, self.default_center_lon],
            zoom: self.default_zoom,
        }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_sidebar_width_pct")]
    pub sidebar_width_pct: u16,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_sidebar_width_pct() -> u16 { 30 }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            sidebar_width_pct: default_sidebar_width_pct(),
            theme: default_theme(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/battlemap/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load defaults, then `path` if it exists, then environment overrides.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("battlemap")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
