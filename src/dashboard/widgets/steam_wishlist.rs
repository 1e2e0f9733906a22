use super::{card, Widget, WidgetContext};
use crate::cache::{self, DEFAULT_TTL};
use crate::fetch::{FetchSlot, FetchState};
use crate::sources::steam::{self, GameListings};
use eframe::egui::{self, Color32, RichText};
use serde::Deserialize;
use std::sync::Arc;

pub const CACHE_KEY: &str = "steam_wishlist";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WishlistConfig {
    /// CheapShark game ids, in display order.
    #[serde(default)]
    pub ids: Vec<String>,
}

/// Price watch for a configured list of games.
pub struct SteamWishlistWidget {
    cfg: WishlistConfig,
    games: FetchSlot<GameListings>,
}

impl SteamWishlistWidget {
    pub fn new(cfg: WishlistConfig) -> Self {
        Self {
            cfg,
            games: FetchSlot::default(),
        }
    }
}

impl Widget for SteamWishlistWidget {
    fn render(&mut self, ui: &mut egui::Ui, ctx: &WidgetContext<'_>) {
        if !self.games.started() {
            if self.cfg.ids.is_empty() {
                // Nothing configured, nothing to fetch or show.
                self.games.resolve(FetchState::Ready(GameListings::default()));
            } else {
                let store = Arc::clone(ctx.store);
                let ids = self.cfg.ids.clone();
                self.games.ensure_started(ui.ctx(), move || {
                    cache::get_or_fetch(store.as_ref(), CACHE_KEY, DEFAULT_TTL, || {
                        steam::fetch_games(&crate::sources::http_client()?, &ids)
                    })
                });
            }
        }

        let ids = self.cfg.ids.clone();
        self.games.with(|state| match state {
            FetchState::Loading => {
                card(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.weak("Loading wishlist prices…");
                    });
                });
            }
            FetchState::Error(_) => {}
            FetchState::Ready(listings) if listings.is_empty() => {}
            FetchState::Ready(listings) => {
                card(ui, |ui| {
                    ui.heading("Steam Wishlist");
                    ui.add_space(4.0);
                    for id in &ids {
                        // Ids absent from the response are skipped.
                        let Some(listing) = listings.get(id) else {
                            continue;
                        };
                        listing_ui(ui, listing);
                        ui.add_space(6.0);
                    }
                });
            }
        });
    }
}

fn listing_ui(ui: &mut egui::Ui, listing: &steam::GameListing) {
    ui.horizontal_top(|ui| {
        if let Some(thumb) = &listing.info.thumb {
            ui.add(
                egui::Image::from_uri(thumb)
                    .fit_to_exact_size(egui::vec2(120.0, 45.0))
                    .rounding(4.0),
            );
        }
        ui.vertical(|ui| {
            match listing.store_url() {
                Some(url) => {
                    ui.hyperlink_to(RichText::new(&listing.info.title).strong(), url);
                }
                None => {
                    ui.label(RichText::new(&listing.info.title).strong());
                }
            }
            ui.horizontal(|ui| {
                if let Some(app_id) = &listing.info.steam_app_id {
                    ui.weak(format!("App {app_id}"));
                }
                ui.weak(format!("Low ${}", listing.cheapest_price_ever.price));
                if let Some(deal) = listing.steam_deal() {
                    if let Some(price) = deal.price_value() {
                        match deal.savings_percent() {
                            Some(percent) => {
                                ui.label(
                                    RichText::new(format!("${price} (-{percent}%)"))
                                        .color(Color32::from_rgb(0x22, 0xc5, 0x5e)),
                                );
                            }
                            None => {
                                ui.weak(format!("${price}"));
                            }
                        }
                    }
                }
            });
        });
    });
}
