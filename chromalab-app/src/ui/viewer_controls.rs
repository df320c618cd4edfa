use eframe::egui;
use tracing::info;

use chromalab_imaging::OrderStatistic;

use crate::file_picker::pick_with_fallback;
use crate::viewer::ImageFiltersApp;

const BUTTON_HEIGHT: f32 = 26.0;

impl ImageFiltersApp {
    pub(crate) fn show_controls(&mut self, ctx: &egui::Context) {
        use egui_material_icons::icons::*;

        let settings = self.state.settings().clone();
        let labelled = |icon: &str, text: &str| egui::RichText::new(format!("{icon}  {text}"));
        let full_width = egui::vec2(settings.control_width - 16.0, BUTTON_HEIGHT);

        egui::SidePanel::left("controls")
            .exact_width(settings.control_width)
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                if ui
                    .add_sized(full_width, egui::Button::new(labelled(ICON_FOLDER_OPEN, "Open")))
                    .clicked()
                {
                    self.open_dialog();
                }

                ui.separator();
                ui.label("Size");
                let mut size = self.state.window_size();
                let slider = egui::Slider::new(&mut size, settings.window_sizes.clone())
                    .step_by(settings.window_step as f64);
                if ui.add(slider).changed() {
                    self.state.set_window_size(size);
                }
                for kind in OrderStatistic::ALL {
                    if ui
                        .add_sized(full_width, egui::Button::new(kind.label()))
                        .clicked()
                    {
                        self.state.apply_filter(kind);
                    }
                }

                ui.separator();
                ui.label("Threshold");
                let mut threshold = self.state.threshold();
                if ui.add(egui::Slider::new(&mut threshold, 0..=255)).changed() {
                    self.state.set_threshold(threshold);
                }
                if ui
                    .add_sized(full_width, egui::Button::new(labelled(ICON_AUTO_AWESOME, "Otsu")))
                    .on_hover_text("Pick the threshold automatically")
                    .clicked()
                {
                    self.state.apply_otsu();
                }
                if ui
                    .add_sized(full_width, egui::Button::new(labelled(ICON_RESTART_ALT, "Reset")))
                    .clicked()
                {
                    self.state.reset();
                }

                ui.separator();
                let can_save = self.state.pair().is_some();
                if ui
                    .add_enabled_ui(can_save, |ui| {
                        ui.add_sized(full_width, egui::Button::new(labelled(ICON_SAVE, "Save")))
                    })
                    .inner
                    .clicked()
                {
                    self.save_dialog();
                }

                if let Some(pair) = self.state.pair() {
                    ui.add_space(12.0);
                    let (w, h) = pair.dimensions();
                    ui.weak(format!("{w} x {h}"));
                    ui.weak(pair.operation().label());
                }
            });
    }

    fn open_dialog(&mut self) {
        let picked = pick_with_fallback(
            &self.native_picker,
            &self.dialog_picker,
            self.state.last_dir(),
            "Open image",
        );
        if let Some(path) = picked {
            self.state.open_path(&path);
        }
    }

    fn save_dialog(&mut self) {
        let path = rfd::FileDialog::new()
            .set_title("Save processed image")
            .set_directory(self.state.last_dir())
            .set_file_name("processed.png")
            .add_filter("PNG", &["png"])
            .add_filter("JPEG", &["jpg", "jpeg"])
            .save_file();
        if let Some(path) = path {
            if let Some(written) = self.state.save_to(&path) {
                info!("Processed image written to {}", written.display());
            }
        }
    }
}
