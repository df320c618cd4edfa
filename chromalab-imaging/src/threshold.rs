//! Grayscale conversion, intensity histograms, Otsu's method, binarization.

use image::{GrayImage, Luma, RgbImage};

/// Number of intensity levels in an 8-bit image.
pub const LEVELS: usize = 256;

/// Convert to 8-bit luma with ITU-R 601 weights in 16.16 fixed point.
pub fn to_grayscale(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let l = (19_595 * r as u32 + 38_470 * g as u32 + 7_471 * b as u32 + 0x8000) >> 16;
        Luma([l as u8])
    })
}

/// Pixel counts per intensity level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: [u64; LEVELS],
}

impl Default for Histogram {
    fn default() -> Self {
        Self { bins: [0; LEVELS] }
    }
}

impl Histogram {
    pub fn from_gray(image: &GrayImage) -> Self {
        let mut bins = [0u64; LEVELS];
        for &p in image.as_raw() {
            bins[p as usize] += 1;
        }
        Self { bins }
    }

    /// Build from raw counts, e.g. a synthetic distribution.
    pub fn from_bins(bins: [u64; LEVELS]) -> Self {
        Self { bins }
    }

    #[inline]
    pub fn count(&self, level: u8) -> u64 {
        self.bins[level as usize]
    }

    pub fn total(&self) -> u64 {
        self.bins.iter().sum()
    }
}

/// Otsu's threshold: the level maximizing between-class variance.
///
/// Levels with no background pixels are skipped and the scan stops once the
/// foreground is empty. The best score only moves on a strictly greater
/// variance, so ties keep the lowest level. A histogram with fewer than two
/// populated levels never beats the initial 0.0 and yields 0.
pub fn otsu_threshold(histogram: &Histogram) -> u8 {
    let total = histogram.total() as f64;
    let sum_total: f64 = histogram
        .bins
        .iter()
        .enumerate()
        .map(|(level, &count)| level as f64 * count as f64)
        .sum();

    let mut weight_bg = 0.0;
    let mut sum_bg = 0.0;
    let mut best_variance = 0.0;
    let mut threshold = 0u8;

    for (level, &count) in histogram.bins.iter().enumerate() {
        weight_bg += count as f64;
        if weight_bg == 0.0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg == 0.0 {
            break;
        }

        sum_bg += level as f64 * count as f64;
        let mean_bg = sum_bg / weight_bg;
        let mean_fg = (sum_total - sum_bg) / weight_fg;

        let variance = weight_bg * weight_fg * (mean_bg - mean_fg).powi(2);
        if variance > best_variance {
            best_variance = variance;
            threshold = level as u8;
        }
    }

    threshold
}

/// Otsu's threshold computed directly from a grayscale image.
pub fn otsu_threshold_image(image: &GrayImage) -> u8 {
    otsu_threshold(&Histogram::from_gray(image))
}

/// White (255) where `intensity > threshold`, black (0) elsewhere.
pub fn binarize(image: &GrayImage, threshold: u8) -> GrayImage {
    let mut out = image.clone();
    for p in out.pixels_mut() {
        p.0[0] = if p.0[0] > threshold { 255 } else { 0 };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn grayscale_uses_601_weights() {
        let img = RgbImage::from_vec(
            4,
            1,
            vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255],
        )
        .unwrap();
        let gray = to_grayscale(&img);
        assert_eq!(gray.as_raw(), &vec![76, 150, 29, 255]);
    }

    #[test]
    fn histogram_counts_pixels() {
        let img = GrayImage::from_vec(3, 2, vec![0, 0, 7, 255, 7, 7]).unwrap();
        let hist = Histogram::from_gray(&img);
        assert_eq!(hist.count(0), 2);
        assert_eq!(hist.count(7), 3);
        assert_eq!(hist.count(255), 1);
        assert_eq!(hist.total(), 6);
    }

    #[test]
    fn bimodal_threshold_separates_modes() {
        let mut bins = [0u64; LEVELS];
        bins[50] = 1000;
        bins[200] = 1000;
        let t = otsu_threshold(&Histogram::from_bins(bins));
        // Every cut in 50..200 scores the same; the lowest one wins.
        assert_eq!(t, 50);
        assert!(50 <= t && t < 200);
    }

    #[test]
    fn spread_bimodal_threshold_sits_between_clusters() {
        let mut bins = [0u64; LEVELS];
        for level in 30..=70 {
            bins[level] = 100;
        }
        for level in 180..=220 {
            bins[level] = 100;
        }
        let t = otsu_threshold(&Histogram::from_bins(bins));
        assert!((70..180).contains(&t), "threshold {t}");
    }

    #[test]
    fn overlapping_modes_threshold_near_midpoint() {
        // Two triangular clusters whose tails meet around 125.
        let mut bins = [0u64; LEVELS];
        for level in 0..LEVELS {
            let d1 = (level as i64 - 50).unsigned_abs();
            let d2 = (level as i64 - 200).unsigned_abs();
            bins[level] = 80u64.saturating_sub(d1) + 80u64.saturating_sub(d2);
        }
        let t = otsu_threshold(&Histogram::from_bins(bins));
        assert!((110..=140).contains(&t), "threshold {t}");
    }

    #[test]
    fn constant_image_yields_zero() {
        let img = GrayImage::from_pixel(16, 16, Luma([100]));
        assert_eq!(otsu_threshold_image(&img), 0);
    }

    #[test]
    fn empty_histogram_yields_zero() {
        assert_eq!(otsu_threshold(&Histogram::default()), 0);
    }

    #[test]
    fn binarize_all_thresholds() {
        let ramp = GrayImage::from_fn(256, 1, |x, _| Luma([x as u8]));
        for t in 0..=255u8 {
            let out = binarize(&ramp, t);
            for (x, _, p) in out.enumerate_pixels() {
                let expected = if x as u8 > t { 255 } else { 0 };
                assert_eq!(p.0[0], expected, "t={t} x={x}");
            }
        }
    }

    #[test]
    fn binarize_preserves_dimensions() {
        let img = to_grayscale(&RgbImage::from_pixel(5, 3, Rgb([10, 20, 30])));
        let out = binarize(&img, 128);
        assert_eq!(out.dimensions(), (5, 3));
        assert!(out.pixels().all(|p| p.0[0] == 0));
    }
}
