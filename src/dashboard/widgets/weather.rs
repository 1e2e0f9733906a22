use super::{card, Widget, WidgetContext};
use crate::cache::{self, DEFAULT_TTL};
use crate::fetch::{FetchSlot, FetchState};
use crate::sources::geo::{self, Coordinates};
use crate::sources::weather::{self, WeatherReport};
use eframe::egui::{self, RichText};
use serde::Deserialize;
use std::sync::Arc;

pub const CACHE_KEY: &str = "weather_data";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherConfig {
    /// Optional fixed coordinates; when absent the app-level coordinates or
    /// an IP lookup are used instead.
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Current conditions for the resolved location.
pub struct WeatherWidget {
    cfg: WeatherConfig,
    report: FetchSlot<WeatherReport>,
}

impl WeatherWidget {
    pub fn new(cfg: WeatherConfig) -> Self {
        Self {
            cfg,
            report: FetchSlot::default(),
        }
    }

    fn fixed_coordinates(&self, ctx: &WidgetContext<'_>) -> Option<Coordinates> {
        match (self.cfg.latitude, self.cfg.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => ctx.coordinates,
        }
    }
}

impl Widget for WeatherWidget {
    fn render(&mut self, ui: &mut egui::Ui, ctx: &WidgetContext<'_>) {
        if !self.report.started() {
            let store = Arc::clone(ctx.store);
            let fixed = self.fixed_coordinates(ctx);
            self.report.ensure_started(ui.ctx(), move || {
                // The cache is checked before any location work so a fresh
                // entry never triggers a lookup.
                cache::get_or_fetch(store.as_ref(), CACHE_KEY, DEFAULT_TTL, || {
                    let client = crate::sources::http_client()?;
                    let coords = match fixed {
                        Some(coords) => coords,
                        None => geo::lookup(&client)?,
                    };
                    weather::fetch(&client, coords)
                })
            });
        }

        self.report.with(|state| match state {
            FetchState::Loading => {
                card(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.weak("Loading weather…");
                    });
                });
            }
            FetchState::Error(_) => {}
            FetchState::Ready(report) => report_ui(ui, report),
        });
    }
}

fn report_ui(ui: &mut egui::Ui, report: &WeatherReport) {
    let current = &report.data.current;
    let units = &report.data.current_units;
    card(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new(weather::glyph(current.weather_code)).size(36.0));
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("{:.0}", current.temperature_2m.round()))
                            .strong()
                            .size(30.0),
                    );
                    ui.label(RichText::new(&units.temperature_2m).size(18.0));
                });
                ui.weak(weather::describe(current.weather_code));
            });
            ui.separator();
            ui.vertical(|ui| {
                ui.weak(format!(
                    "Feels like {:.0}{}",
                    current.apparent_temperature.round(),
                    units.temperature_2m
                ));
                ui.weak(format!(
                    "Wind {} {} {}",
                    current.wind_speed_10m,
                    units.wind_speed_10m,
                    weather::wind_direction(current.wind_direction_10m)
                ));
                ui.weak(format!("Cloud cover {:.0}%", current.cloud_cover));
            });
        });
    });
}
