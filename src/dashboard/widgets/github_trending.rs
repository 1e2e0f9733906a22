use super::{card, Widget, WidgetContext};
use crate::cache::{self, DEFAULT_TTL};
use crate::fetch::{FetchSlot, FetchState};
use crate::sources::github::{self, RepoSearchResponse};
use eframe::egui::{self, Color32, RichText};
use serde::Deserialize;
use std::sync::Arc;

pub const CACHE_KEY: &str = "github_trending";

/// GitHub's language dot colors for the most common languages; gray for the
/// rest.
fn language_color(language: &str) -> Color32 {
    match language {
        "JavaScript" => Color32::from_rgb(0xf1, 0xe0, 0x5a),
        "TypeScript" => Color32::from_rgb(0x31, 0x78, 0xc6),
        "Python" => Color32::from_rgb(0x35, 0x72, 0xa5),
        "Java" => Color32::from_rgb(0xb0, 0x72, 0x19),
        "Go" => Color32::from_rgb(0x00, 0xad, 0xd8),
        "Rust" => Color32::from_rgb(0xde, 0xa5, 0x84),
        "C" => Color32::from_rgb(0x55, 0x55, 0x55),
        "C++" => Color32::from_rgb(0xf3, 0x4b, 0x7d),
        "C#" => Color32::from_rgb(0x17, 0x86, 0x00),
        "Ruby" => Color32::from_rgb(0x70, 0x15, 0x16),
        "PHP" => Color32::from_rgb(0x4f, 0x5d, 0x95),
        "Swift" => Color32::from_rgb(0xf0, 0x51, 0x38),
        "Kotlin" => Color32::from_rgb(0xa9, 0x7b, 0xff),
        "Vue" => Color32::from_rgb(0x41, 0xb8, 0x83),
        "HTML" => Color32::from_rgb(0xe3, 0x4c, 0x26),
        "CSS" => Color32::from_rgb(0x56, 0x3d, 0x7c),
        "Shell" => Color32::from_rgb(0x89, 0xe0, 0x51),
        "Dockerfile" => Color32::from_rgb(0x38, 0x4d, 0x54),
        _ => Color32::from_rgb(0x8b, 0x8b, 0x8b),
    }
}

fn default_limit() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendingConfig {
    /// How many repositories to show.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

/// Most-starred repositories created in the last 30 days.
pub struct GithubTrendingWidget {
    cfg: TrendingConfig,
    repos: FetchSlot<RepoSearchResponse>,
}

impl GithubTrendingWidget {
    pub fn new(cfg: TrendingConfig) -> Self {
        Self {
            cfg,
            repos: FetchSlot::default(),
        }
    }
}

impl Widget for GithubTrendingWidget {
    fn render(&mut self, ui: &mut egui::Ui, ctx: &WidgetContext<'_>) {
        if !self.repos.started() {
            let store = Arc::clone(ctx.store);
            self.repos.ensure_started(ui.ctx(), move || {
                cache::get_or_fetch(store.as_ref(), CACHE_KEY, DEFAULT_TTL, || {
                    github::fetch_trending(&crate::sources::http_client()?)
                })
            });
        }

        let limit = self.cfg.limit;
        self.repos.with(|state| match state {
            FetchState::Loading => {
                card(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.weak("Loading trending repositories…");
                    });
                });
            }
            FetchState::Error(_) => {}
            FetchState::Ready(resp) if resp.items.is_empty() => {}
            FetchState::Ready(resp) => {
                card(ui, |ui| {
                    ui.heading("GitHub Trending");
                    ui.add_space(4.0);
                    egui::ScrollArea::vertical()
                        .id_source("github-trending")
                        .max_height(250.0)
                        .show(ui, |ui| {
                            for repo in resp.items.iter().take(limit) {
                                ui.horizontal(|ui| {
                                    ui.hyperlink_to(
                                        RichText::new(&repo.name).strong(),
                                        &repo.html_url,
                                    );
                                    if let Some(lang) = &repo.language {
                                        ui.label(RichText::new("●").color(language_color(lang)))
                                            .on_hover_text(lang);
                                    }
                                });
                                if let Some(desc) = &repo.description {
                                    ui.weak(desc);
                                }
                                ui.horizontal(|ui| {
                                    ui.weak(format!("★ {}", repo.stargazers_count));
                                    ui.weak(&repo.full_name);
                                });
                                ui.add_space(6.0);
                            }
                        });
                });
            }
        });
    }
}
