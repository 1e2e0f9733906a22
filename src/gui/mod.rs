mod bookmarks;
mod header;

use crate::cache::{CacheStore, DiskCacheStore};
use crate::config::{GridWidth, SiteConfig};
use crate::dashboard::layout;
use crate::dashboard::widgets::{Widget, WidgetContext, WidgetRegistry};
use crate::settings::{self, Settings};
use crate::theme::Theme;
use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;

pub use header::HeaderState;

const CONTENT_MAX_WIDTH: f32 = 1180.0;
const BACK_TO_TOP_AFTER: f32 = 300.0;

struct SlotRuntime {
    width: GridWidth,
    widget: Box<dyn Widget>,
}

pub struct HomedashApp {
    settings: Settings,
    settings_path: PathBuf,
    config: SiteConfig,
    store: Arc<dyn CacheStore>,
    slots: Vec<SlotRuntime>,
    theme: Theme,
    header: HeaderState,
    scroll_offset: f32,
    scroll_to_top: bool,
}

impl HomedashApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        settings_path: PathBuf,
        mut config: SiteConfig,
    ) -> Self {
        // Remote bookmark icons, covers and the background image all load
        // through the shared image loaders.
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let registry = WidgetRegistry::with_defaults();
        for warning in config.sanitize(&registry) {
            tracing::warn!("{warning}");
        }
        let slots: Vec<SlotRuntime> = config
            .widgets
            .iter()
            .filter_map(|spec| {
                registry
                    .create(&spec.name, &spec.settings_value())
                    .map(|widget| SlotRuntime {
                        width: spec.grid_width,
                        widget,
                    })
            })
            .collect();

        let theme = settings.theme;
        cc.egui_ctx.set_visuals(theme.visuals());

        let store: Arc<dyn CacheStore> =
            Arc::new(DiskCacheStore::new(settings::config_dir().join("cache")));

        Self {
            settings,
            settings_path,
            config,
            store,
            slots,
            theme,
            header: HeaderState::default(),
            scroll_offset: 0.0,
            scroll_to_top: false,
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.theme = self.theme.toggled();
        ctx.set_visuals(self.theme.visuals());
        self.settings.theme = self.theme;
        if let Err(err) = self.settings.save(&self.settings_path) {
            tracing::warn!(%err, "failed to persist settings");
        }
    }

    fn widgets_ui(&mut self, ui: &mut egui::Ui) {
        let viewport_width = ui.ctx().screen_rect().width();
        let widths: Vec<GridWidth> = self
            .slots
            .iter()
            .map(|slot| layout::effective_width(slot.width, viewport_width))
            .collect();
        let rows = layout::pack_rows(&widths);

        let store = Arc::clone(&self.store);
        let wctx = WidgetContext {
            store: &store,
            coordinates: self.settings.coordinates(),
        };
        let slots = &mut self.slots;

        let spacing = ui.spacing().item_spacing.x;
        for row in rows {
            ui.horizontal_top(|ui| {
                let full = ui.available_width();
                let half = (full - spacing) / 2.0;
                for index in row {
                    let width = match widths[index] {
                        GridWidth::Full => full,
                        GridWidth::Half => half,
                    };
                    ui.allocate_ui(egui::vec2(width, 0.0), |ui| {
                        ui.set_width(width);
                        slots[index].widget.render(ui, &wctx);
                    });
                }
            });
            ui.add_space(spacing);
        }
    }

    fn bookmarks_ui(&self, ui: &mut egui::Ui) {
        for category in &self.config.bookmarks {
            bookmarks::category_ui(ui, category);
        }
    }

    fn back_to_top_ui(&mut self, ctx: &egui::Context) {
        if self.scroll_offset <= BACK_TO_TOP_AFTER {
            return;
        }
        egui::Area::new(egui::Id::new("back-to-top"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-24.0, -24.0))
            .show(ctx, |ui| {
                if ui
                    .button(egui::RichText::new("⬆").size(20.0))
                    .on_hover_text("Back to top")
                    .clicked()
                {
                    self.scroll_to_top = true;
                }
            });
    }
}

impl eframe::App for HomedashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let background = self
            .theme
            .background_url(self.config.site.background.as_ref())
            .map(str::to_owned);

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(url) = &background {
                egui::Image::from_uri(url).paint_at(ui, ctx.screen_rect());
            }

            let mut scroll = egui::ScrollArea::vertical().auto_shrink([false; 2]);
            if self.scroll_to_top {
                scroll = scroll.vertical_scroll_offset(0.0);
                self.scroll_to_top = false;
            }
            let output = scroll.show(ui, |ui| {
                // Room for the floating header.
                ui.add_space(64.0);

                let available = ui.available_width();
                let width = available.min(CONTENT_MAX_WIDTH);
                let margin = ((available - width) / 2.0).max(0.0);
                ui.horizontal_top(|ui| {
                    ui.add_space(margin);
                    ui.vertical(|ui| {
                        ui.set_width(width);
                        self.widgets_ui(ui);
                        ui.add_space(12.0);
                        self.bookmarks_ui(ui);
                    });
                });
                ui.add_space(48.0);
            });

            self.scroll_offset = output.state.offset.y;
            self.header.on_scroll(self.scroll_offset);
        });

        if self.header.visible() {
            if let Some(header::HeaderAction::ToggleTheme) =
                header::show(ctx, &self.config.site, self.theme)
            {
                self.toggle_theme(ctx);
            }
        }
        self.back_to_top_ui(ctx);
    }
}
