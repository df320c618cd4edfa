use eframe::egui;

use crate::canvas::fitted_size;
use crate::viewer::ImageFiltersApp;

const CANVAS_GAP: f32 = 8.0;

impl ImageFiltersApp {
    /// Original on the left, processed on the right, each fitted and centered
    /// in its own half of the central panel.
    pub(crate) fn show_canvases(&mut self, ctx: &egui::Context) {
        let [r, g, b] = self.state.settings().canvas_background;
        let background = egui::Color32::from_rgb(r, g, b);

        egui::CentralPanel::default().show(ctx, |ui| {
            let full = ui.available_rect_before_wrap();
            let half = (full.width() - CANVAS_GAP) * 0.5;
            let left = egui::Rect::from_min_size(full.min, egui::vec2(half, full.height()));
            let right = egui::Rect::from_min_size(
                egui::pos2(left.max.x + CANVAS_GAP, full.min.y),
                egui::vec2(half, full.height()),
            );

            let painter = ui.painter();
            for (rect, texture) in [
                (left, self.original_texture.as_ref()),
                (right, self.processed_texture.as_ref()),
            ] {
                painter.rect_filled(rect, 0.0, background);
                let Some((texture, _)) = texture else {
                    continue;
                };
                let [w, h] = texture.size();
                let drawn = fitted_size([w as f32, h as f32], [rect.width(), rect.height()]);
                let target = egui::Rect::from_center_size(rect.center(), egui::vec2(drawn[0], drawn[1]));
                painter.image(
                    texture.id(),
                    target,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }

            if self.original_texture.is_none() {
                painter.text(
                    left.center(),
                    egui::Align2::CENTER_CENTER,
                    "Open an image to begin",
                    egui::FontId::proportional(16.0),
                    egui::Color32::from_gray(140),
                );
            }
            ui.allocate_rect(full, egui::Sense::hover());
        });
    }
}
