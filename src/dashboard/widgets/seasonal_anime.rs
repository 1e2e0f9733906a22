use super::{card, Widget, WidgetContext};
use crate::cache::{self, DEFAULT_TTL};
use crate::fetch::{FetchSlot, FetchState};
use crate::sources::anime::{self, SeasonResponse};
use eframe::egui::{self, RichText};
use serde::Deserialize;
use std::sync::Arc;

pub const CACHE_KEY: &str = "seasonal_anime";

fn default_limit() -> usize {
    25
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonalAnimeConfig {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for SeasonalAnimeConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

/// The season currently airing, covers included.
pub struct SeasonalAnimeWidget {
    cfg: SeasonalAnimeConfig,
    season: FetchSlot<SeasonResponse>,
}

impl SeasonalAnimeWidget {
    pub fn new(cfg: SeasonalAnimeConfig) -> Self {
        Self {
            cfg,
            season: FetchSlot::default(),
        }
    }
}

impl Widget for SeasonalAnimeWidget {
    fn render(&mut self, ui: &mut egui::Ui, ctx: &WidgetContext<'_>) {
        if !self.season.started() {
            let store = Arc::clone(ctx.store);
            self.season.ensure_started(ui.ctx(), move || {
                cache::get_or_fetch(store.as_ref(), CACHE_KEY, DEFAULT_TTL, || {
                    anime::fetch_season(&crate::sources::http_client()?)
                })
            });
        }

        let limit = self.cfg.limit;
        self.season.with(|state| match state {
            FetchState::Loading => {
                card(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.weak("Loading seasonal anime…");
                    });
                });
            }
            FetchState::Error(_) => {}
            FetchState::Ready(resp) if resp.data.is_empty() => {}
            FetchState::Ready(resp) => {
                card(ui, |ui| {
                    ui.heading("Seasonal Anime");
                    ui.add_space(4.0);
                    egui::ScrollArea::vertical()
                        .id_source("seasonal-anime")
                        .max_height(320.0)
                        .show(ui, |ui| {
                            for entry in resp.data.iter().take(limit) {
                                ui.horizontal_top(|ui| {
                                    if let Some(cover) = entry.cover_url() {
                                        ui.add(
                                            egui::Image::from_uri(cover)
                                                .fit_to_exact_size(egui::vec2(60.0, 85.0))
                                                .rounding(6.0),
                                        );
                                    }
                                    ui.vertical(|ui| {
                                        if let Some(title) = entry.display_title() {
                                            ui.hyperlink_to(
                                                RichText::new(title).strong(),
                                                &entry.url,
                                            );
                                        }
                                        if let (Some(en), Some(ja)) =
                                            (&entry.title_english, &entry.title_japanese)
                                        {
                                            if en != ja {
                                                ui.weak(en);
                                            }
                                        }
                                        if let Some(rating) = &entry.rating {
                                            ui.weak(rating);
                                        }
                                        if let Some(score) = entry.score {
                                            ui.weak(format!("★ {score}"));
                                        }
                                    });
                                });
                                ui.add_space(6.0);
                            }
                        });
                });
            }
        });
    }
}
