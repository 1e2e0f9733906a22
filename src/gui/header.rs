use crate::config::SiteMeta;
use crate::theme::Theme;
use eframe::egui::{self, Align2, RichText};

/// Scrolling down past this offset hides the header.
const HIDE_AFTER: f32 = 50.0;

/// Scroll-aware visibility: hidden while scrolling down past the threshold,
/// shown again on any upward scroll.
pub struct HeaderState {
    last_offset: f32,
    visible: bool,
}

impl Default for HeaderState {
    fn default() -> Self {
        Self {
            last_offset: 0.0,
            visible: true,
        }
    }
}

impl HeaderState {
    pub fn on_scroll(&mut self, offset: f32) {
        self.visible = !(offset > self.last_offset && offset > HIDE_AFTER);
        self.last_offset = offset;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }
}

pub enum HeaderAction {
    ToggleTheme,
}

/// Floating title bar: site icon, title and the theme toggle.
pub fn show(ctx: &egui::Context, site: &SiteMeta, theme: Theme) -> Option<HeaderAction> {
    let mut action = None;
    egui::Area::new(egui::Id::new("header"))
        .anchor(Align2::CENTER_TOP, egui::vec2(0.0, 8.0))
        .show(ctx, |ui| {
            egui::Frame::group(ui.style())
                .rounding(14.0)
                .inner_margin(egui::Margin::symmetric(16.0, 8.0))
                .fill(ui.visuals().panel_fill)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        if let Some(icon) = &site.icon {
                            ui.add(
                                egui::Image::from_uri(icon)
                                    .fit_to_exact_size(egui::vec2(24.0, 24.0))
                                    .rounding(4.0),
                            );
                        }
                        ui.label(RichText::new(&site.title).heading().strong());
                        ui.add_space(24.0);
                        if ui
                            .button(theme.toggle_glyph())
                            .on_hover_text("Toggle theme")
                            .clicked()
                        {
                            action = Some(HeaderAction::ToggleTheme);
                        }
                    });
                });
        });
    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hides_when_scrolling_down_past_threshold() {
        let mut state = HeaderState::default();
        state.on_scroll(20.0);
        assert!(state.visible());
        state.on_scroll(120.0);
        assert!(!state.visible());
    }

    #[test]
    fn reappears_on_upward_scroll() {
        let mut state = HeaderState::default();
        state.on_scroll(200.0);
        assert!(!state.visible());
        state.on_scroll(150.0);
        assert!(state.visible());
    }

    #[test]
    fn stays_visible_near_the_top() {
        let mut state = HeaderState::default();
        state.on_scroll(10.0);
        state.on_scroll(40.0);
        assert!(state.visible());
    }
}
