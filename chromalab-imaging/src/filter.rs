//! Windowed order-statistic filters (min / median / max).
//!
//! The heavy lifting is done by `imageproc`. Windows are square and every
//! channel is filtered independently.

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::morphology::{grayscale_dilate, grayscale_erode, Mask};
use tracing::debug;

use crate::error::ImagingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatistic {
    Min,
    Median,
    Max,
}

impl OrderStatistic {
    pub const ALL: [Self; 3] = [Self::Min, Self::Median, Self::Max];

    pub fn label(self) -> &'static str {
        match self {
            Self::Min => "Min",
            Self::Median => "Median",
            Self::Max => "Max",
        }
    }
}

/// Side length of a square filter window: odd, at least 3.
///
/// Capped at 255 so the radius fits the morphology mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowSize(u32);

impl WindowSize {
    pub const MIN: u32 = 3;
    pub const MAX: u32 = 255;

    pub fn new(size: u32) -> crate::Result<Self> {
        if size < Self::MIN || size > Self::MAX || size % 2 == 0 {
            return Err(ImagingError::InvalidWindowSize(size));
        }
        Ok(Self(size))
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Pixels on each side of the centre.
    #[inline]
    pub fn radius(self) -> u32 {
        self.0 / 2
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u32> for WindowSize {
    type Error = ImagingError;

    fn try_from(size: u32) -> crate::Result<Self> {
        Self::new(size)
    }
}

/// Replace each pixel by the min, median or max of its window.
pub fn apply_order_statistic_filter(
    image: &RgbImage,
    kind: OrderStatistic,
    size: WindowSize,
) -> RgbImage {
    debug!(
        "{} filter {}x{} on {}x{} image",
        kind.label(),
        size.get(),
        size.get(),
        image.width(),
        image.height()
    );
    let radius = size.radius();
    match kind {
        OrderStatistic::Median => imageproc::filter::median_filter(image, radius, radius),
        OrderStatistic::Min => per_channel(image, |plane| {
            grayscale_erode(plane, &Mask::square(radius as u8))
        }),
        OrderStatistic::Max => per_channel(image, |plane| {
            grayscale_dilate(plane, &Mask::square(radius as u8))
        }),
    }
}

/// Split into R/G/B planes, run `op` on each, and recombine.
fn per_channel(image: &RgbImage, op: impl Fn(&GrayImage) -> GrayImage) -> RgbImage {
    let (w, h) = image.dimensions();
    let planes: Vec<GrayImage> = (0..3)
        .map(|c| {
            let plane = GrayImage::from_fn(w, h, |x, y| Luma([image.get_pixel(x, y).0[c]]));
            op(&plane)
        })
        .collect();
    RgbImage::from_fn(w, h, |x, y| {
        Rgb([
            planes[0].get_pixel(x, y).0[0],
            planes[1].get_pixel(x, y).0[0],
            planes[2].get_pixel(x, y).0[0],
        ])
    })
}
