use eframe::egui::{self, Color32, Sense, Stroke, StrokeKind};

use chromalab_core::Palette;

/// Draw the palette as a grid of clickable swatches and return the hex of
/// the swatch clicked this frame, if any.
pub(crate) fn palette_grid(
    ui: &mut egui::Ui,
    palette: &Palette,
    columns: usize,
    swatch_size: f32,
) -> Option<String> {
    let mut picked = None;
    egui::Grid::new("palette_grid")
        .spacing([3.0, 3.0])
        .show(ui, |ui| {
            for (i, (hex, rgb)) in palette.swatches().enumerate() {
                let (rect, response) =
                    ui.allocate_exact_size(egui::vec2(swatch_size, swatch_size), Sense::click());
                let stroke = if response.hovered() {
                    Stroke::new(1.5, Color32::WHITE)
                } else {
                    Stroke::new(1.0, Color32::from_gray(70))
                };
                let painter = ui.painter();
                painter.rect_filled(rect, 2.0, Color32::from_rgb(rgb.r, rgb.g, rgb.b));
                painter.rect_stroke(rect, 2.0, stroke, StrokeKind::Inside);

                if response.on_hover_text(hex).clicked() {
                    picked = Some(hex.to_string());
                }
                if (i + 1) % columns.max(1) == 0 {
                    ui.end_row();
                }
            }
        });
    picked
}
