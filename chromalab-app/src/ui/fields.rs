use eframe::egui;

use crate::converter::Field;

/// A titled group of slider + entry rows. Returns `true` when the user moved
/// a slider or committed a changed entry this frame.
pub(crate) fn field_group(ui: &mut egui::Ui, title: &str, fields: &mut [Field]) -> bool {
    let mut changed = false;
    ui.group(|ui| {
        ui.label(egui::RichText::new(title).strong());
        for field in fields.iter_mut() {
            ui.horizontal(|ui| {
                ui.add_sized([14.0, 18.0], egui::Label::new(field.label));

                let mut slider =
                    egui::Slider::new(&mut field.value, field.range.clone()).show_value(false);
                if field.decimals == 0 {
                    slider = slider.step_by(1.0);
                }
                if ui.add(slider).changed() {
                    field.slider_moved();
                    changed = true;
                }

                // Entries commit when they lose focus (Enter or Tab).
                let entry =
                    ui.add(egui::TextEdit::singleline(&mut field.text).desired_width(64.0));
                if entry.lost_focus() && field.commit_text() {
                    changed = true;
                }
            });
        }
    });
    changed
}
