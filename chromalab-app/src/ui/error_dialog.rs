use eframe::egui;

/// A modal-style error window. At most one message is pending; raising a
/// new one replaces it.
#[derive(Debug, Default)]
pub(crate) struct ErrorDialog {
    pending: Option<(String, String)>,
}

impl ErrorDialog {
    pub(crate) fn raise(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.pending = Some((title.into(), message.into()));
    }

    pub(crate) fn message(&self) -> Option<&str> {
        self.pending.as_ref().map(|(_, message)| message.as_str())
    }

    pub(crate) fn dismiss(&mut self) {
        self.pending = None;
    }

    pub(crate) fn show(&mut self, ctx: &egui::Context) {
        let Some((title, message)) = &self.pending else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new(title.as_str())
            .id(egui::Id::new("error_dialog"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message.as_str());
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });
        if dismissed || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.dismiss();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_error_wins() {
        let mut dialog = ErrorDialog::default();
        assert_eq!(dialog.message(), None);
        dialog.raise("Open failed", "first");
        dialog.raise("Save failed", "second");
        assert_eq!(dialog.message(), Some("second"));
        dialog.dismiss();
        assert_eq!(dialog.message(), None);
    }
}
