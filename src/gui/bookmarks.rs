use crate::config::{Bookmark, BookmarkCategory};
use crate::dashboard::widgets::card;
use eframe::egui::{self, Color32, RichText, Sense};

const CARD_MIN_WIDTH: f32 = 240.0;
const MAX_COLUMNS: usize = 4;

/// Placeholder initial shown when a bookmark has no icon.
pub fn initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default()
}

/// One panel per category; empty categories render nothing.
pub fn category_ui(ui: &mut egui::Ui, category: &BookmarkCategory) {
    if category.items.is_empty() {
        return;
    }
    card(ui, |ui| {
        ui.heading(&category.category);
        ui.add_space(6.0);
        let spacing = ui.spacing().item_spacing.x;
        let available = ui.available_width();
        let columns = ((available / CARD_MIN_WIDTH).floor() as usize).clamp(1, MAX_COLUMNS);
        let width = (available - spacing * (columns - 1) as f32) / columns as f32;
        for row in category.items.chunks(columns) {
            ui.horizontal_top(|ui| {
                for bookmark in row {
                    bookmark_card(ui, bookmark, width);
                }
            });
        }
    });
    ui.add_space(12.0);
}

fn bookmark_card(ui: &mut egui::Ui, bookmark: &Bookmark, width: f32) {
    let response = ui
        .allocate_ui(egui::vec2(width, 0.0), |ui| {
            egui::Frame::group(ui.style())
                .rounding(10.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.set_width(width - 18.0);
                    ui.horizontal(|ui| {
                        match &bookmark.icon {
                            Some(icon) => {
                                ui.add(
                                    egui::Image::from_uri(icon)
                                        .fit_to_exact_size(egui::vec2(32.0, 32.0))
                                        .rounding(6.0),
                                );
                            }
                            None => initial_badge(ui, &initial(&bookmark.name)),
                        }
                        ui.vertical(|ui| {
                            ui.label(RichText::new(&bookmark.name).strong());
                            if let Some(desc) = &bookmark.description {
                                ui.weak(desc);
                            }
                        });
                    });
                });
        })
        .response;

    let response = response
        .interact(Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
        .on_hover_text(&bookmark.url);
    if response.clicked() {
        if let Err(err) = open::that(&bookmark.url) {
            tracing::error!(%err, url = %bookmark.url, "failed to open bookmark");
        }
    }
}

fn initial_badge(ui: &mut egui::Ui, initial: &str) {
    egui::Frame::none()
        .fill(Color32::from_rgb(0x3b, 0x82, 0xf6))
        .rounding(6.0)
        .inner_margin(egui::Margin::symmetric(11.0, 6.0))
        .show(ui, |ui| {
            ui.label(RichText::new(initial).color(Color32::WHITE).strong());
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_is_the_uppercased_first_character() {
        assert_eq!(initial("github"), "G");
        assert_eq!(initial("Docs"), "D");
    }

    #[test]
    fn empty_name_yields_empty_initial() {
        assert_eq!(initial(""), "");
    }

    #[test]
    fn non_cased_scripts_pass_through() {
        assert_eq!(initial("网易云音乐"), "网");
    }
}
