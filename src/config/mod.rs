//! User configuration loaded from `config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{LevelFilter, info, warn};
use serde::{Deserialize, Serialize};

use pagemark_core::{DEFAULT_DEBOUNCE, MarkerStyle};


/// Why a config file could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Whether the file simply isn't there.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a scan runs.
    pub debounce_ms: u64,
    pub marker_tag: String,
    pub base_class: String,
    pub current_class: String,
    pub exempt_tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// One of "off", "error", "warn", "info", "debug", "trace".
    pub level: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let style = MarkerStyle::default();
        Self {
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            marker_tag: style.tag,
            base_class: style.base_class,
            current_class: style.current_class,
            exempt_tags: style.exempt_tags,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Build the marker style, falling back to defaults for blank names.
    pub fn marker_style(&self) -> MarkerStyle {
        let defaults = MarkerStyle::default();
        let or_default = |value: &str, fallback: String| {
            if value.trim().is_empty() {
                fallback
            } else {
                value.trim().to_owned()
            }
        };
        MarkerStyle {
            tag: or_default(&self.marker_tag, defaults.tag).to_ascii_lowercase(),
            base_class: or_default(&self.base_class, defaults.base_class),
            current_class: or_default(&self.current_class, defaults.current_class),
            exempt_tags: self
                .exempt_tags
                .iter()
                .map(|t| t.trim().to_ascii_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
        }
    }
}

impl LogConfig {
    /// Parse `level`, or `Warn` when it isn't a known level name.
    pub fn level_filter(&self) -> LevelFilter {
        self.level.trim().parse().unwrap_or(LevelFilter::Warn)
    }
}

/// Return the platform-specific configuration directory for pagemark.
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join("pagemark");
        }
        PathBuf::from(".").join("pagemark")
    }
    #[cfg(not(target_os = "windows"))]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("pagemark");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".config").join("pagemark");
        }
        PathBuf::from(".").join("pagemark")
    }
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

impl Config {
    /// Load config from the default path. Returns defaults if the file
    /// doesn't exist or can't be parsed.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Like `load`, for an explicit path.
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(cfg) => {
                info!("config: loaded from {}", path.display());
                cfg
            }
            Err(e) if e.is_not_found() => Self::default(),
            Err(e) => {
                warn!("config: {e}");
                Self::default()
            }
        }
    }

    /// Try to load config from `path`, keeping "missing" and "malformed"
    /// apart so callers can decide what to do with each.
    pub fn try_load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }
}
