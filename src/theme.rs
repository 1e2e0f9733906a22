use crate::config::BackgroundImages;
use eframe::egui;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Self::Light
    }
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => egui::Visuals::dark(),
        }
    }

    /// Label of the toggle button: shows what you switch *to*.
    pub fn toggle_glyph(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀",
        }
    }

    /// Pick the configured background image matching the theme.
    pub fn background_url(self, images: Option<&BackgroundImages>) -> Option<&str> {
        let images = images?;
        match self {
            Theme::Light => images.light.as_deref(),
            Theme::Dark => images.dark.as_deref(),
        }
    }
}
