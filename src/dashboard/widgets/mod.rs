use crate::cache::CacheStore;
use crate::sources::geo::Coordinates;
use eframe::egui;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

mod github_trending;
mod seasonal_anime;
mod steam_wishlist;
mod time;
mod weather;

pub use github_trending::GithubTrendingWidget;
pub use seasonal_anime::SeasonalAnimeWidget;
pub use steam_wishlist::SteamWishlistWidget;
pub use time::TimeWidget;
pub use weather::WeatherWidget;

/// Context shared with widgets at render time.
pub struct WidgetContext<'a> {
    /// Persisted cache the data widgets read through.
    pub store: &'a Arc<dyn CacheStore>,
    /// Fixed coordinates from settings, if configured.
    pub coordinates: Option<Coordinates>,
}

/// Widget trait implemented by all dashboard widgets.
///
/// A widget draws its own card, including any heading; a widget whose data
/// fetch failed draws nothing at all.
pub trait Widget: Send {
    fn render(&mut self, ui: &mut egui::Ui, ctx: &WidgetContext<'_>);
}

/// Descriptor for building widgets from the pass-through settings of a
/// widget entry in the site document.
#[derive(Clone)]
pub struct WidgetDescriptor {
    ctor: Arc<dyn Fn(&Value) -> Box<dyn Widget> + Send + Sync>,
}

impl WidgetDescriptor {
    pub fn new<T: Widget + 'static, C: DeserializeOwned + Default + 'static>(
        build: fn(C) -> T,
    ) -> Self {
        Self {
            ctor: Arc::new(move |value| {
                let cfg = serde_json::from_value::<C>(value.clone()).unwrap_or_default();
                Box::new(build(cfg))
            }),
        }
    }

    pub fn create(&self, settings: &Value) -> Box<dyn Widget> {
        (self.ctor)(settings)
    }
}

#[derive(Clone, Default)]
pub struct WidgetRegistry {
    map: HashMap<String, WidgetDescriptor>,
}

impl WidgetRegistry {
    pub fn with_defaults() -> Self {
        let mut reg = Self::default();
        reg.register("time", WidgetDescriptor::new(TimeWidget::new));
        reg.register("weather", WidgetDescriptor::new(WeatherWidget::new));
        reg.register(
            "github-trending",
            WidgetDescriptor::new(GithubTrendingWidget::new),
        );
        reg.register(
            "seasonal-anime",
            WidgetDescriptor::new(SeasonalAnimeWidget::new),
        );
        reg.register(
            "steam-wishlist",
            WidgetDescriptor::new(SteamWishlistWidget::new),
        );
        reg
    }

    pub fn register(&mut self, name: &str, descriptor: WidgetDescriptor) {
        self.map.insert(name.to_string(), descriptor);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Build the named widget, or `None` when the name is unregistered.
    pub fn create(&self, name: &str, settings: &Value) -> Option<Box<dyn Widget>> {
        self.map.get(name).map(|d| d.create(settings))
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.map.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Rounded card frame shared by the widgets and the bookmark panels.
pub(crate) fn card<R>(ui: &mut egui::Ui, add: impl FnOnce(&mut egui::Ui) -> R) -> R {
    egui::Frame::group(ui.style())
        .rounding(12.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add(ui)
        })
        .inner
}
