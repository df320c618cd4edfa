//! Compiled defaults for both tools. Nothing here is persisted.

use std::ops::RangeInclusive;
use std::time::Duration;

/// Color converter window and layout defaults.
#[derive(Debug, Clone)]
pub struct ConverterSettings {
    pub window_title: &'static str,
    pub window_size: [f32; 2],
    /// Swatches per palette row.
    pub palette_columns: usize,
    pub swatch_size: f32,
    pub preview_height: f32,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            window_title: "CMYK <-> RGB <-> HSV",
            window_size: [760.0, 520.0],
            palette_columns: 12,
            swatch_size: 22.0,
            preview_height: 80.0,
        }
    }
}

/// Image filter window and control defaults.
#[derive(Debug, Clone)]
pub struct ViewerSettings {
    pub window_title: &'static str,
    pub window_size: [f32; 2],
    pub default_threshold: u8,
    pub default_window_size: u32,
    /// Filter window sizes offered by the size slider.
    pub window_sizes: RangeInclusive<u32>,
    pub window_step: u32,
    /// Upper bound on a native file-picker subprocess.
    pub picker_timeout: Duration,
    pub control_width: f32,
    pub canvas_background: [u8; 3],
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            window_title: "Image Filters",
            window_size: [1400.0, 900.0],
            default_threshold: 128,
            default_window_size: 3,
            window_sizes: 3..=21,
            window_step: 2,
            picker_timeout: Duration::from_secs(60),
            control_width: 160.0,
            canvas_background: [0x11, 0x11, 0x11],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromalab_imaging::WindowSize;

    #[test]
    fn every_offered_window_size_is_valid() {
        let s = ViewerSettings::default();
        let sizes: Vec<u32> = s
            .window_sizes
            .clone()
            .step_by(s.window_step as usize)
            .collect();
        assert_eq!(sizes.first(), Some(&3));
        assert_eq!(sizes.last(), Some(&21));
        for size in sizes {
            assert!(WindowSize::new(size).is_ok(), "{size}");
        }
        assert!(WindowSize::new(s.default_window_size).is_ok());
    }
}
