//! The image filter tool: an original/processed pair and the controls that
//! derive one from the other.

use std::path::{Path, PathBuf};

use eframe::egui;
use tracing::{error, info, warn};

use chromalab_imaging::{load_image, save_image, ImagePair, OrderStatistic, WindowSize};

use crate::app_dir::parent_directory;
use crate::file_picker::{DialogPicker, NativePicker};
use crate::settings::ViewerSettings;
use crate::ui::error_dialog::ErrorDialog;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// Everything the filter tool knows, independent of egui.
pub struct ViewerState {
    pair: Option<ImagePair>,
    threshold: u8,
    window_size: u32,
    last_dir: PathBuf,
    /// Bumped whenever a new original is loaded.
    image_revision: u64,
    /// Bumped whenever the processed image changes.
    processed_revision: u64,
    error: ErrorDialog,
    settings: ViewerSettings,
}

impl ViewerState {
    pub fn new(settings: ViewerSettings, last_dir: PathBuf) -> Self {
        Self {
            pair: None,
            threshold: settings.default_threshold,
            window_size: settings.default_window_size,
            last_dir,
            image_revision: 0,
            processed_revision: 0,
            error: ErrorDialog::default(),
            settings,
        }
    }

    pub fn pair(&self) -> Option<&ImagePair> {
        self.pair.as_ref()
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn window_size(&self) -> u32 {
        self.window_size
    }

    pub fn set_window_size(&mut self, size: u32) {
        self.window_size = size;
    }

    pub fn last_dir(&self) -> &Path {
        &self.last_dir
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    pub fn revisions(&self) -> (u64, u64) {
        (self.image_revision, self.processed_revision)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.message()
    }

    /// Load `path` as the new original. On failure the current pair is kept
    /// and an error dialog is raised.
    pub fn open_path(&mut self, path: &Path) -> bool {
        match load_image(path) {
            Ok(image) => {
                self.pair = Some(ImagePair::new(image));
                self.threshold = self.settings.default_threshold;
                if let Some(dir) = parent_directory(path) {
                    self.last_dir = dir;
                }
                self.image_revision += 1;
                self.processed_revision += 1;
                true
            }
            Err(e) => {
                error!("Failed to open {}: {e}", path.display());
                self.error
                    .raise("Open failed", format!("Could not open image:\n{e}"));
                false
            }
        }
    }

    pub fn apply_filter(&mut self, kind: OrderStatistic) {
        let Some(pair) = self.pair.as_mut() else {
            return;
        };
        match WindowSize::new(self.window_size) {
            Ok(size) => {
                pair.apply_filter(kind, size);
                self.processed_revision += 1;
            }
            Err(e) => {
                warn!("{e}");
                self.error.raise("Invalid size", "Odd size >=3 required");
            }
        }
    }

    /// Move the threshold slider. With an image loaded the processed image is
    /// re-binarized immediately.
    pub fn set_threshold(&mut self, threshold: u8) {
        self.threshold = threshold;
        if let Some(pair) = self.pair.as_mut() {
            pair.apply_threshold(threshold);
            self.processed_revision += 1;
        }
    }

    /// Binarize at Otsu's threshold and move the slider there.
    pub fn apply_otsu(&mut self) -> Option<u8> {
        let pair = self.pair.as_mut()?;
        let threshold = pair.apply_otsu();
        info!("Otsu threshold: {threshold}");
        self.threshold = threshold;
        self.processed_revision += 1;
        Some(threshold)
    }

    pub fn reset(&mut self) {
        let Some(pair) = self.pair.as_mut() else {
            return;
        };
        pair.reset();
        self.threshold = self.settings.default_threshold;
        self.processed_revision += 1;
    }

    /// Write the processed image. Returns the path actually written.
    pub fn save_to(&mut self, path: &Path) -> Option<PathBuf> {
        let pair = self.pair.as_ref()?;
        match save_image(pair.processed(), path) {
            Ok(written) => {
                if let Some(dir) = parent_directory(&written) {
                    self.last_dir = dir;
                }
                Some(written)
            }
            Err(e) => {
                error!("Failed to save {}: {e}", path.display());
                self.error
                    .raise("Save failed", format!("Could not save image:\n{e}"));
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// eframe app
// ---------------------------------------------------------------------------

pub struct ImageFiltersApp {
    pub(crate) state: ViewerState,
    pub(crate) native_picker: NativePicker,
    pub(crate) dialog_picker: DialogPicker,
    /// Cached textures tagged with the revision they were built from.
    pub(crate) original_texture: Option<(egui::TextureHandle, u64)>,
    pub(crate) processed_texture: Option<(egui::TextureHandle, u64)>,
}

impl ImageFiltersApp {
    pub fn new(settings: ViewerSettings, start_dir: PathBuf) -> Self {
        let native_picker = NativePicker::for_host(settings.picker_timeout);
        info!("Native pickers: {:?}", native_picker.programs());
        Self {
            state: ViewerState::new(settings, start_dir),
            native_picker,
            dialog_picker: DialogPicker,
            original_texture: None,
            processed_texture: None,
        }
    }

    /// Rebuild whichever textures are older than the state they show.
    pub(crate) fn refresh_textures(&mut self, ctx: &egui::Context) {
        let Some(pair) = self.state.pair() else {
            self.original_texture = None;
            self.processed_texture = None;
            return;
        };
        let (image_rev, processed_rev) = self.state.revisions();

        if self.original_texture.as_ref().map(|(_, rev)| *rev) != Some(image_rev) {
            let texture = ctx.load_texture(
                "original",
                to_color_image(pair.original()),
                egui::TextureOptions::LINEAR,
            );
            self.original_texture = Some((texture, image_rev));
        }
        if self.processed_texture.as_ref().map(|(_, rev)| *rev) != Some(processed_rev) {
            let texture = ctx.load_texture(
                "processed",
                to_color_image(pair.processed()),
                egui::TextureOptions::LINEAR,
            );
            self.processed_texture = Some((texture, processed_rev));
        }
    }
}

fn to_color_image(image: &image::RgbImage) -> egui::ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    egui::ColorImage::from_rgb(size, image.as_raw())
}

impl eframe::App for ImageFiltersApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show_controls(ctx);
        self.refresh_textures(ctx);
        self.show_canvases(ctx);
        self.state.error.show(ctx);
    }
}
