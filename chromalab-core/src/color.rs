use serde::{Deserialize, Serialize};

/// An 8-bit sRGB color. This is the canonical representation; every other
/// view is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from signed channel values, clamping each into `0..=255`.
    pub fn from_clamped(r: i32, g: i32, b: i32) -> Self {
        let c = |v: i32| v.clamp(0, 255) as u8;
        Self::new(c(r), c(g), c(b))
    }

    /// Channels scaled to `[0, 1]`.
    #[inline]
    pub(crate) fn unit(self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }
}

/// Process color as four percentages in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cmyk {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
}

impl Cmyk {
    #[inline]
    pub const fn new(c: f64, m: f64, y: f64, k: f64) -> Self {
        Self { c, m, y, k }
    }

    /// Copy with every component clamped into `[0, 100]`.
    pub fn clamped(self) -> Self {
        Self {
            c: clamp_percent(self.c),
            m: clamp_percent(self.m),
            y: clamp_percent(self.y),
            k: clamp_percent(self.k),
        }
    }
}

/// Hue in degrees `[0, 360)`, saturation and value in percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    #[inline]
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Copy with the hue wrapped into `[0, 360)` and S/V clamped to `[0, 100]`.
    pub fn clamped(self) -> Self {
        Self {
            h: wrap_degrees(self.h),
            s: clamp_percent(self.s),
            v: clamp_percent(self.v),
        }
    }
}

/// All three representations of one color plus its hex label, as pushed to
/// observers after every edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorViews {
    pub rgb: Rgb,
    pub cmyk: Cmyk,
    pub hsv: Hsv,
    pub hex: String,
}

impl ColorViews {
    /// Derive every view from the canonical RGB value.
    pub fn from_rgb(rgb: Rgb) -> Self {
        Self {
            rgb,
            cmyk: crate::convert::rgb_to_cmyk(rgb),
            hsv: crate::convert::rgb_to_hsv(rgb),
            hex: crate::hex::to_hex(rgb),
        }
    }
}

/// Clamp into `[0, 100]`. Non-finite input maps to 0.
#[inline]
pub(crate) fn clamp_percent(x: f64) -> f64 {
    if x.is_finite() {
        x.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Wrap an angle into `[0, 360)`. Non-finite input maps to 0.
#[inline]
pub(crate) fn wrap_degrees(h: f64) -> f64 {
    if !h.is_finite() {
        return 0.0;
    }
    let w = h.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs.
    if w >= 360.0 {
        0.0
    } else {
        w
    }
}
