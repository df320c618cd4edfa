use eframe::egui;
use tracing::info;

use chromalab_app::converter::ColorConverterApp;
use chromalab_app::logging;
use chromalab_app::settings::ConverterSettings;

fn main() -> eframe::Result {
    logging::init();

    info!("Starting ColorConverter");

    let settings = ConverterSettings::default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(settings.window_title)
            .with_inner_size(settings.window_size),
        ..Default::default()
    };

    eframe::run_native(
        "ColorConverter",
        options,
        Box::new(move |_cc| Ok(Box::new(ColorConverterApp::new(settings)))),
    )
}
