use crate::dashboard::widgets::WidgetRegistry;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;
use url::Url;

fn default_title() -> String {
    "Start Page".to_string()
}

/// Where the site document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Path(PathBuf),
    Url(String),
}

/// Column hint for a widget: the grid is two tracks wide, `Half` takes one,
/// `Full` both.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GridWidth {
    Full,
    Half,
}

impl Default for GridWidth {
    fn default() -> Self {
        Self::Full
    }
}

/// Declarative widget entry. Everything beyond `name` and `gridWidth` is
/// passed through verbatim as the widget's settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WidgetSpec {
    pub name: String,
    #[serde(rename = "gridWidth", default)]
    pub grid_width: GridWidth,
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

impl WidgetSpec {
    pub fn full(name: &str) -> Self {
        Self {
            name: name.to_string(),
            grid_width: GridWidth::Full,
            settings: Map::new(),
        }
    }

    pub fn half(name: &str) -> Self {
        Self {
            name: name.to_string(),
            grid_width: GridWidth::Half,
            settings: Map::new(),
        }
    }

    pub fn settings_value(&self) -> Value {
        Value::Object(self.settings.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bookmark {
    #[serde(default)]
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookmarkCategory {
    pub category: String,
    #[serde(default)]
    pub items: Vec<Bookmark>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BackgroundImages {
    #[serde(default)]
    pub light: Option<String>,
    #[serde(default)]
    pub dark: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteMeta {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub background: Option<BackgroundImages>,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: default_title(),
            icon: None,
            background: None,
        }
    }
}

/// The site document: page metadata, the ordered widget list and the
/// bookmark categories. Loaded once at startup and treated as immutable
/// for the lifetime of a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteMeta,
    #[serde(default)]
    pub widgets: Vec<WidgetSpec>,
    #[serde(default)]
    pub bookmarks: Vec<BookmarkCategory>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteMeta::default(),
            widgets: vec![
                WidgetSpec::half("time"),
                WidgetSpec::half("weather"),
                WidgetSpec::full("github-trending"),
                WidgetSpec::full("seasonal-anime"),
            ],
            bookmarks: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Load the site document. Never fails: any read, HTTP or parse error
    /// is logged and the built-in default document is returned so the page
    /// always renders.
    pub fn load(source: &ConfigSource) -> Self {
        match Self::try_load(source) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!(%err, ?source, "failed to load site config; using built-in default");
                Self::default()
            }
        }
    }

    fn try_load(source: &ConfigSource) -> Result<Self> {
        let content = match source {
            ConfigSource::Path(path) => fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?,
            ConfigSource::Url(url) => fetch_document(url)?,
        };
        let cfg = serde_json::from_str(&content)?;
        Ok(cfg)
    }

    /// Drop widget entries whose name the registry doesn't know, returning
    /// one warning per dropped entry.
    pub fn sanitize(&mut self, registry: &WidgetRegistry) -> Vec<String> {
        let mut warnings = Vec::new();
        self.widgets.retain(|spec| {
            if spec.name.is_empty() || !registry.contains(&spec.name) {
                let msg = format!("unknown widget '{}' dropped", spec.name);
                tracing::warn!(widget = %spec.name, "unknown widget dropped");
                warnings.push(msg);
                return false;
            }
            true
        });
        warnings
    }
}

fn fetch_document(url: &str) -> Result<String> {
    let client = crate::sources::http_client()?;
    let url = cache_busted(url, chrono::Utc::now().timestamp())?;
    let resp = client.get(url.as_str()).send()?;
    let status = resp.status();
    if !status.is_success() {
        anyhow::bail!("GET {url} returned {status}");
    }
    Ok(resp.text()?)
}

/// Append a `t=<epoch-seconds>` parameter so intermediaries never serve a
/// stale document.
pub fn cache_busted(url: &str, epoch_seconds: i64) -> Result<Url> {
    let mut url = Url::parse(url).context("invalid config URL")?;
    url.query_pairs_mut()
        .append_pair("t", &epoch_seconds.to_string());
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_document_lists_the_stock_widgets() {
        let cfg = SiteConfig::default();
        let names: Vec<&str> = cfg.widgets.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(
            names,
            ["time", "weather", "github-trending", "seasonal-anime"]
        );
        assert_eq!(cfg.widgets[0].grid_width, GridWidth::Half);
        assert_eq!(cfg.widgets[1].grid_width, GridWidth::Half);
        assert_eq!(cfg.widgets[2].grid_width, GridWidth::Full);
        assert!(cfg.bookmarks.is_empty());
    }

    #[test]
    fn grid_width_defaults_to_full() {
        let spec: WidgetSpec = serde_json::from_value(json!({"name": "time"})).unwrap();
        assert_eq!(spec.grid_width, GridWidth::Full);
    }

    #[test]
    fn extra_fields_pass_through_to_settings() {
        let spec: WidgetSpec = serde_json::from_value(json!({
            "name": "steam-wishlist",
            "gridWidth": "half",
            "ids": ["612", "128"]
        }))
        .unwrap();
        assert_eq!(spec.grid_width, GridWidth::Half);
        assert_eq!(spec.settings_value()["ids"], json!(["612", "128"]));
    }

    #[test]
    fn cache_buster_is_appended() {
        let url = cache_busted("https://example.com/site.json", 1700000000).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/site.json?t=1700000000"
        );
        // Existing query parameters survive.
        let url = cache_busted("https://example.com/site.json?v=2", 5).unwrap();
        assert_eq!(url.as_str(), "https://example.com/site.json?v=2&t=5");
    }

    #[test]
    fn unreadable_path_falls_back_to_default() {
        let cfg = SiteConfig::load(&ConfigSource::Path(PathBuf::from(
            "/nonexistent/site.json",
        )));
        assert_eq!(cfg, SiteConfig::default());
    }
}
