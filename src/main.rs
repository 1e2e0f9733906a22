use eframe::egui;
use homedash::config::SiteConfig;
use homedash::gui::HomedashApp;
use homedash::logging;
use homedash::settings::{self, Settings};

fn main() -> anyhow::Result<()> {
    let dir = settings::config_dir();
    let settings_path = dir.join("settings.json");
    let settings = Settings::load(&settings_path)?;
    logging::init(settings.debug_logging);

    let source = settings.config_source(&dir);
    let config = SiteConfig::load(&source);
    tracing::info!(
        title = %config.site.title,
        widgets = config.widgets.len(),
        bookmarks = config.bookmarks.len(),
        "loaded site config"
    );

    let title = config.site.title.clone();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| Box::new(HomedashApp::new(cc, settings, settings_path, config))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run UI: {err}"))?;
    Ok(())
}
