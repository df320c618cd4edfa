//! The color converter: three synchronized groups of slider + entry fields
//! over one canonical color, plus the swatch palette.

use std::ops::RangeInclusive;

use eframe::egui;
use tracing::{debug, warn};

use chromalab_core::{AddOutcome, ColorEditor, ColorObserver, ColorViews, Edit, Palette, Rgb};

use crate::settings::ConverterSettings;
use crate::ui::error_dialog::ErrorDialog;
use crate::ui::{fields, palette_grid};

// ---------------------------------------------------------------------------
// Field buffers
// ---------------------------------------------------------------------------

/// One numeric field: the slider value and the text shown in its entry.
#[derive(Debug, Clone)]
pub struct Field {
    pub label: &'static str,
    pub value: f64,
    pub text: String,
    pub range: RangeInclusive<f64>,
    /// Decimals shown in the entry; 0 means an integer field.
    pub decimals: usize,
}

impl Field {
    fn new(label: &'static str, max: f64, decimals: usize) -> Self {
        Self {
            label,
            value: 0.0,
            text: format_value(0.0, decimals),
            range: 0.0..=max,
            decimals,
        }
    }

    /// Overwrite both the value and its text.
    pub fn set(&mut self, value: f64) {
        self.value = value;
        self.text = format_value(value, self.decimals);
    }

    /// Sync the text after the slider moved.
    pub fn slider_moved(&mut self) {
        self.text = format_value(self.value, self.decimals);
    }

    /// Take the typed text as the new value. Returns `false` (leaving the
    /// value alone) when the text is not a number or did not change it.
    pub fn commit_text(&mut self) -> bool {
        match parse_number(&self.text) {
            Some(v) if v != self.value => {
                self.value = v;
                true
            }
            Some(_) => false,
            None => {
                debug!("Ignoring non-numeric {} entry {:?}", self.label, self.text);
                false
            }
        }
    }
}

/// Fixed decimals with trailing zeros (and a bare dot) trimmed.
pub fn format_value(value: f64, decimals: usize) -> String {
    let s = format!("{value:.decimals$}");
    if decimals == 0 {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// A finite number, or `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Everything the converter window displays for the current color.
#[derive(Debug, Clone)]
pub struct ColorFields {
    pub cmyk: [Field; 4],
    pub rgb: [Field; 3],
    pub hsv: [Field; 3],
    pub hex: String,
    pub swatch: Rgb,
}

impl Default for ColorFields {
    fn default() -> Self {
        Self {
            cmyk: [
                Field::new("C", 100.0, 4),
                Field::new("M", 100.0, 4),
                Field::new("Y", 100.0, 4),
                Field::new("K", 100.0, 4),
            ],
            rgb: [
                Field::new("R", 255.0, 0),
                Field::new("G", 255.0, 0),
                Field::new("B", 255.0, 0),
            ],
            hsv: [
                Field::new("H", 360.0, 4),
                Field::new("S", 100.0, 4),
                Field::new("V", 100.0, 4),
            ],
            hex: String::new(),
            swatch: Rgb::BLACK,
        }
    }
}

impl ColorFields {
    pub fn rgb_edit(&self) -> Edit {
        let [r, g, b] = &self.rgb;
        let channel = |f: &Field| f.value.round_ties_even() as i32;
        Edit::Rgb([channel(r), channel(g), channel(b)])
    }

    pub fn cmyk_edit(&self) -> Edit {
        let [c, m, y, k] = &self.cmyk;
        Edit::Cmyk([c.value, m.value, y.value, k.value])
    }

    pub fn hsv_edit(&self) -> Edit {
        let [h, s, v] = &self.hsv;
        Edit::Hsv([h.value, s.value, v.value])
    }
}

impl ColorObserver for ColorFields {
    fn color_changed(&mut self, views: &ColorViews) -> Option<Edit> {
        let rgb = views.rgb;
        for (field, v) in self.rgb.iter_mut().zip([rgb.r, rgb.g, rgb.b]) {
            field.set(v as f64);
        }
        let cmyk = views.cmyk;
        for (field, v) in self.cmyk.iter_mut().zip([cmyk.c, cmyk.m, cmyk.y, cmyk.k]) {
            field.set(v);
        }
        let hsv = views.hsv;
        for (field, v) in self.hsv.iter_mut().zip([hsv.h, hsv.s, hsv.v]) {
            field.set(v);
        }
        self.hex = views.hex.clone();
        self.swatch = rgb;
        // egui reports widget changes itself; refreshing buffers fires nothing.
        None
    }
}

// ---------------------------------------------------------------------------
// Converter state
// ---------------------------------------------------------------------------

/// Toolkit-independent converter state: the editor, palette and the
/// palette entry buffer.
pub struct ConverterState {
    editor: ColorEditor<ColorFields>,
    palette: Palette,
    new_hex: String,
    error: ErrorDialog,
}

impl Default for ConverterState {
    fn default() -> Self {
        Self {
            editor: ColorEditor::new(ColorFields::default()),
            palette: Palette::default(),
            new_hex: String::new(),
            error: ErrorDialog::default(),
        }
    }
}

impl ConverterState {
    pub fn fields(&self) -> &ColorFields {
        self.editor.observer()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn rgb(&self) -> Rgb {
        self.editor.rgb()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.message()
    }

    pub fn set_new_hex(&mut self, text: &str) {
        self.new_hex = text.to_string();
    }

    pub fn new_hex(&self) -> &str {
        &self.new_hex
    }

    pub fn apply(&mut self, edit: Edit) {
        self.editor.apply(edit);
    }

    /// Select a swatch. Bad hex is ignored without a message.
    pub fn pick(&mut self, hex: &str) {
        if self.editor.select_hex(hex).is_none() {
            debug!("Ignoring unparseable swatch {hex:?}");
        }
    }

    /// Add the typed hex to the palette, raising an error dialog if invalid.
    pub fn add_palette_color(&mut self) {
        match self.palette.add_color(&self.new_hex) {
            Ok(AddOutcome::Inserted) => self.new_hex.clear(),
            Ok(AddOutcome::Duplicate | AddOutcome::Empty) => {}
            Err(e) => {
                warn!("Rejected palette entry: {e}");
                self.error
                    .raise("Bad hex", "Please enter a valid hex color like #1A2B3C");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// eframe app
// ---------------------------------------------------------------------------

pub struct ColorConverterApp {
    state: ConverterState,
    settings: ConverterSettings,
}

impl ColorConverterApp {
    pub fn new(settings: ConverterSettings) -> Self {
        Self {
            state: ConverterState::default(),
            settings,
        }
    }
}

impl eframe::App for ColorConverterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let settings = &self.settings;
        let state = &mut self.state;

        egui::TopBottomPanel::top("palette").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label(egui::RichText::new("Palette").strong());
            if let Some(hex) = palette_grid::palette_grid(
                ui,
                &state.palette,
                settings.palette_columns,
                settings.swatch_size,
            ) {
                state.pick(&hex);
            }
            ui.horizontal(|ui| {
                ui.label("Add hex:");
                let entry = ui.add(
                    egui::TextEdit::singleline(&mut state.new_hex).desired_width(90.0),
                );
                let submitted =
                    entry.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Add to palette").clicked() || submitted {
                    state.add_palette_color();
                }
            });
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("preview").show(ctx, |ui| {
            ui.add_space(6.0);
            let fields = state.fields();
            let swatch = fields.swatch;
            ui.horizontal(|ui| {
                let width = (ui.available_width() - 120.0).max(40.0);
                let (rect, _) = ui.allocate_exact_size(
                    egui::vec2(width, settings.preview_height),
                    egui::Sense::hover(),
                );
                ui.painter().rect_filled(
                    rect,
                    4.0,
                    egui::Color32::from_rgb(swatch.r, swatch.g, swatch.b),
                );
                ui.label(egui::RichText::new(&fields.hex).size(16.0).strong());
            });
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut edit = None;
            let buffers = state.editor.observer_mut();
            ui.columns(3, |cols| {
                if fields::field_group(&mut cols[0], "CMYK (%)", &mut buffers.cmyk) {
                    edit = Some(buffers.cmyk_edit());
                }
                if fields::field_group(&mut cols[1], "RGB (0..255)", &mut buffers.rgb) {
                    edit = Some(buffers.rgb_edit());
                }
                if fields::field_group(&mut cols[2], "HSV (H\u{b0}/S%/V%)", &mut buffers.hsv) {
                    edit = Some(buffers.hsv_edit());
                }
            });
            if let Some(edit) = edit {
                state.apply(edit);
            }
        });

        state.error.show(ctx);
    }
}
