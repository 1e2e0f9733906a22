use super::{card, Widget, WidgetContext};
use eframe::egui::{self, RichText};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeConfig {}

/// Wall-clock card. Purely local, no fetch.
pub struct TimeWidget;

impl TimeWidget {
    pub fn new(_cfg: TimeConfig) -> Self {
        Self
    }
}

impl Widget for TimeWidget {
    fn render(&mut self, ui: &mut egui::Ui, _ctx: &WidgetContext<'_>) {
        let now = chrono::Local::now();
        card(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("🕐").size(32.0));
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(now.format("%H:%M:%S").to_string())
                            .monospace()
                            .strong()
                            .size(30.0),
                    );
                    ui.label(RichText::new(now.format("%A, %B %-d, %Y").to_string()).weak());
                });
            });
        });
        // Keep the seconds ticking even without input events.
        ui.ctx().request_repaint_after(Duration::from_secs(1));
    }
}
