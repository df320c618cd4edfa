use image::{DynamicImage, RgbImage};
use tracing::debug;

use crate::filter::{apply_order_statistic_filter, OrderStatistic, WindowSize};
use crate::threshold::{binarize, otsu_threshold_image, to_grayscale};

/// How the processed image was derived from the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Straight copy of the original.
    Identity,
    Filter { kind: OrderStatistic, size: WindowSize },
    /// Binarized at a user-chosen threshold.
    Threshold { value: u8 },
    /// Binarized at the Otsu threshold.
    Otsu { value: u8 },
}

impl Operation {
    pub fn label(&self) -> String {
        match self {
            Self::Identity => "Original".to_string(),
            Self::Filter { kind, size } => format!("{} {}x{}", kind.label(), size.get(), size.get()),
            Self::Threshold { value } => format!("Threshold {value}"),
            Self::Otsu { value } => format!("Otsu threshold {value}"),
        }
    }
}

/// An immutable original and the single processed result derived from it.
///
/// Every operation starts again from the original; results never chain.
#[derive(Debug, Clone)]
pub struct ImagePair {
    original: RgbImage,
    processed: RgbImage,
    operation: Operation,
}

impl ImagePair {
    pub fn new(original: RgbImage) -> Self {
        let processed = original.clone();
        Self {
            original,
            processed,
            operation: Operation::Identity,
        }
    }

    pub fn original(&self) -> &RgbImage {
        &self.original
    }

    pub fn processed(&self) -> &RgbImage {
        &self.processed
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.original.dimensions()
    }

    /// Processed becomes a fresh copy of the original.
    pub fn reset(&mut self) {
        self.replace(self.original.clone(), Operation::Identity);
    }

    pub fn apply_filter(&mut self, kind: OrderStatistic, size: WindowSize) {
        let out = apply_order_statistic_filter(&self.original, kind, size);
        self.replace(out, Operation::Filter { kind, size });
    }

    /// Binarize the original's luma at `threshold`.
    pub fn apply_threshold(&mut self, threshold: u8) {
        let out = self.binarized(threshold);
        self.replace(out, Operation::Threshold { value: threshold });
    }

    /// Binarize at Otsu's threshold and return the threshold used.
    pub fn apply_otsu(&mut self) -> u8 {
        let threshold = otsu_threshold_image(&to_grayscale(&self.original));
        let out = self.binarized(threshold);
        self.replace(out, Operation::Otsu { value: threshold });
        threshold
    }

    fn binarized(&self, threshold: u8) -> RgbImage {
        let binary = binarize(&to_grayscale(&self.original), threshold);
        DynamicImage::ImageLuma8(binary).to_rgb8()
    }

    fn replace(&mut self, processed: RgbImage, operation: Operation) {
        debug!("Processed image replaced: {}", operation.label());
        self.processed = processed;
        self.operation = operation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    /// Left half dark, right half bright.
    fn split_image() -> RgbImage {
        RgbImage::from_fn(8, 4, |x, _| {
            if x < 4 {
                Rgb([40, 40, 40])
            } else {
                Rgb([220, 220, 220])
            }
        })
    }

    #[test]
    fn starts_as_identity_copy() {
        let pair = ImagePair::new(split_image());
        assert_eq!(pair.processed(), pair.original());
        assert_eq!(pair.operation(), Operation::Identity);
        assert_eq!(pair.dimensions(), (8, 4));
    }

    #[test]
    fn threshold_binarizes_from_original() {
        let mut pair = ImagePair::new(split_image());
        pair.apply_threshold(128);
        assert_eq!(pair.operation(), Operation::Threshold { value: 128 });
        assert_eq!(pair.processed().get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(pair.processed().get_pixel(7, 3).0, [255, 255, 255]);
        assert_eq!(pair.original(), &split_image());
    }

    #[test]
    fn otsu_reports_threshold() {
        let mut pair = ImagePair::new(split_image());
        let t = pair.apply_otsu();
        assert_eq!(t, 40);
        assert_eq!(pair.operation(), Operation::Otsu { value: 40 });
        assert_eq!(pair.processed().get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(pair.processed().get_pixel(5, 0).0, [255, 255, 255]);
    }

    #[test]
    fn operations_do_not_chain() {
        let mut pair = ImagePair::new(split_image());
        pair.apply_threshold(250);
        // Everything is black now; a max filter over that would stay black.
        let size = WindowSize::new(3).unwrap();
        pair.apply_filter(OrderStatistic::Max, size);
        assert_eq!(
            pair.operation(),
            Operation::Filter {
                kind: OrderStatistic::Max,
                size
            }
        );
        assert_eq!(pair.processed().get_pixel(3, 0).0, [220, 220, 220]);
    }

    #[test]
    fn reset_restores_original() {
        let mut pair = ImagePair::new(split_image());
        pair.apply_otsu();
        pair.reset();
        assert_eq!(pair.processed(), pair.original());
        assert_eq!(pair.operation(), Operation::Identity);
    }

    #[test]
    fn operation_labels() {
        assert_eq!(Operation::Identity.label(), "Original");
        assert_eq!(
            Operation::Filter {
                kind: OrderStatistic::Median,
                size: WindowSize::new(5).unwrap()
            }
            .label(),
            "Median 5x5"
        );
        assert_eq!(Operation::Otsu { value: 90 }.label(), "Otsu threshold 90");
    }
}
