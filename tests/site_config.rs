use homedash::config::{ConfigSource, GridWidth, SiteConfig};
use homedash::dashboard::widgets::WidgetRegistry;
use std::fs;
use tempfile::tempdir;

const DOCUMENT: &str = r#"{
    "site": {
        "title": "My Portal",
        "icon": "https://example.com/icon.png",
        "background": {
            "light": "https://example.com/day.jpg",
            "dark": "https://example.com/night.jpg"
        }
    },
    "widgets": [
        {"name": "time", "gridWidth": "half"},
        {"name": "weather", "gridWidth": "half"},
        {"name": "github-trending"},
        {"name": "steam-wishlist", "ids": ["612", "128"]}
    ],
    "bookmarks": [
        {
            "category": "Dev",
            "items": [
                {"name": "GitHub", "url": "https://github.com", "description": "code"},
                {"name": "Docs", "url": "https://docs.rs"}
            ]
        },
        {"category": "Empty", "items": []}
    ]
}"#;

#[test]
fn full_document_parses() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("site.json");
    fs::write(&path, DOCUMENT).unwrap();

    let cfg = SiteConfig::load(&ConfigSource::Path(path));
    assert_eq!(cfg.site.title, "My Portal");
    assert_eq!(
        cfg.site.background.as_ref().unwrap().dark.as_deref(),
        Some("https://example.com/night.jpg")
    );

    assert_eq!(cfg.widgets.len(), 4);
    assert_eq!(cfg.widgets[0].grid_width, GridWidth::Half);
    assert_eq!(cfg.widgets[2].grid_width, GridWidth::Full);
    assert_eq!(
        cfg.widgets[3].settings_value()["ids"],
        serde_json::json!(["612", "128"])
    );

    assert_eq!(cfg.bookmarks.len(), 2);
    assert_eq!(cfg.bookmarks[0].items.len(), 2);
    assert_eq!(cfg.bookmarks[0].items[0].name, "GitHub");
    assert!(cfg.bookmarks[0].items[1].description.is_none());
    assert!(cfg.bookmarks[1].items.is_empty());
}

#[test]
fn missing_file_yields_the_default_document() {
    let dir = tempdir().unwrap();
    let cfg = SiteConfig::load(&ConfigSource::Path(dir.path().join("absent.json")));
    let names: Vec<&str> = cfg.widgets.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(
        names,
        ["time", "weather", "github-trending", "seasonal-anime"]
    );
    assert_eq!(cfg.widgets[0].grid_width, GridWidth::Half);
    assert_eq!(cfg.widgets[1].grid_width, GridWidth::Half);
    assert!(cfg.bookmarks.is_empty());
}

#[test]
fn unparsable_file_yields_the_default_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("site.json");
    fs::write(&path, "site: not json").unwrap();
    let cfg = SiteConfig::load(&ConfigSource::Path(path));
    assert_eq!(cfg, SiteConfig::default());
}

#[test]
fn sanitize_drops_unknown_widgets_and_keeps_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("site.json");
    fs::write(
        &path,
        r#"{"widgets": [
            {"name": "weather"},
            {"name": "does-not-exist"},
            {"name": "time"}
        ]}"#,
    )
    .unwrap();

    let mut cfg = SiteConfig::load(&ConfigSource::Path(path));
    let registry = WidgetRegistry::with_defaults();
    let warnings = cfg.sanitize(&registry);

    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("does-not-exist"));
    let names: Vec<&str> = cfg.widgets.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, ["weather", "time"]);
}
