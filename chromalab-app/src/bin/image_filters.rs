use eframe::egui;
use tracing::info;

use chromalab_app::app_dir::default_image_directory;
use chromalab_app::logging;
use chromalab_app::settings::ViewerSettings;
use chromalab_app::viewer::ImageFiltersApp;

fn main() -> eframe::Result {
    logging::init();

    info!("Starting ImageFilters");

    let settings = ViewerSettings::default();
    let start_dir = default_image_directory();
    info!("Dialogs start in {}", start_dir.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(settings.window_title)
            .with_inner_size(settings.window_size),
        ..Default::default()
    };

    eframe::run_native(
        "ImageFilters",
        options,
        Box::new(move |cc| {
            egui_material_icons::initialize(&cc.egui_ctx);
            Ok(Box::new(ImageFiltersApp::new(settings, start_dir)))
        }),
    )
}
