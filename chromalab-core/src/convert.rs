//! Closed-form conversions between RGB, CMYK and HSV.
//!
//! RGB is always the integer side. The floating-point views are rounded to
//! four decimal places so repeated conversions display stable values.

use crate::color::{clamp_percent, wrap_degrees, Cmyk, Hsv, Rgb};

/// Round to four decimal places, halves to even on the exact binary value.
/// Adding `0.0` turns `-0.0` into `0.0`.
fn round4(x: f64) -> f64 {
    format!("{x:.4}").parse::<f64>().unwrap_or(x) + 0.0
}

/// Scale a `[0, 1]` fraction to a channel. Halves round to even.
#[inline]
fn to_channel(x: f64) -> u8 {
    (x * 255.0).round_ties_even().clamp(0.0, 255.0) as u8
}

/// RGB → CMYK with black generation `k = 1 - max(r, g, b)`.
///
/// Pure black short-circuits to `(0, 0, 0, 100)`, which also avoids the
/// `1 - k == 0` division.
pub fn rgb_to_cmyk(rgb: Rgb) -> Cmyk {
    if rgb == Rgb::BLACK {
        return Cmyk::new(0.0, 0.0, 0.0, 100.0);
    }
    let (r, g, b) = rgb.unit();
    let k = 1.0 - r.max(g).max(b);
    let ink = |x: f64| clamp_percent(round4((1.0 - x - k) / (1.0 - k) * 100.0));
    Cmyk::new(ink(r), ink(g), ink(b), clamp_percent(round4(k * 100.0)))
}

/// CMYK → RGB. Inputs are clamped into `[0, 100]` before use.
pub fn cmyk_to_rgb(cmyk: Cmyk) -> Rgb {
    let Cmyk { c, m, y, k } = cmyk.clamped();
    let k = 1.0 - k / 100.0;
    let channel = |x: f64| to_channel((1.0 - x / 100.0) * k);
    Rgb::new(channel(c), channel(m), channel(y))
}

/// RGB → HSV (hexcone model). Hue in degrees, S and V in percent.
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let (r, g, b) = rgb.unit();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let v = max;
    if max == min {
        return Hsv::new(0.0, 0.0, round4(v * 100.0));
    }
    let delta = max - min;
    let s = delta / max;

    let rc = (max - r) / delta;
    let gc = (max - g) / delta;
    let bc = (max - b) / delta;
    let sector = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    let h = (sector / 6.0).rem_euclid(1.0);

    Hsv::new(
        wrap_degrees(round4(h * 360.0)),
        clamp_percent(round4(s * 100.0)),
        clamp_percent(round4(v * 100.0)),
    )
}

/// HSV → RGB. Hue is taken modulo 360, S and V are clamped to `[0, 100]`.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let Hsv { h, s, v } = hsv.clamped();
    let (h, s, v) = (h / 360.0, s / 100.0, v / 100.0);
    if s == 0.0 {
        let c = to_channel(v);
        return Rgb::new(c, c, c);
    }

    let scaled = h * 6.0;
    let sector = scaled.floor();
    let f = scaled - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match (sector as u32) % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb::new(to_channel(r), to_channel(g), to_channel(b))
}
