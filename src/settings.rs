use crate::config::ConfigSource;
use crate::sources::geo::Coordinates;
use crate::theme::Theme;
use anyhow::Result;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Return the per-user directory holding `settings.json`, the site document
/// and the `cache` sub-directory.
///
/// The directory and the `cache` sub-directory are created on first use so
/// subsequent operations can assume they exist.
pub fn config_dir() -> PathBuf {
    static DIR: Lazy<PathBuf> = Lazy::new(|| {
        let base = dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("homedash");
        let _ = fs::create_dir_all(&base);
        let _ = fs::create_dir_all(base.join("cache"));
        base
    });
    DIR.clone()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Remote URL serving the site document. Takes precedence over
    /// `config_path` when both are set.
    #[serde(default)]
    pub config_url: Option<String>,
    /// Local path of the site document. Defaults to `site.json` inside the
    /// config directory when missing.
    #[serde(default)]
    pub config_path: Option<String>,
    /// Last selected theme, restored on the next run.
    #[serde(default)]
    pub theme: Theme,
    /// Fixed coordinates for the weather widget. When either is absent the
    /// location is resolved from the public IP instead.
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
}

impl Settings {
    /// Load settings from disk. A missing or empty file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }

    /// Where the site document is loaded from.
    pub fn config_source(&self, dir: &Path) -> ConfigSource {
        if let Some(url) = &self.config_url {
            return ConfigSource::Url(url.clone());
        }
        let path = self
            .config_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| dir.join("site.json"));
        ConfigSource::Path(path)
    }
}
