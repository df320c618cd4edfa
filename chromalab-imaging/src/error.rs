use thiserror::Error;

/// Errors originating from the imaging pipeline.
#[derive(Debug, Error)]
pub enum ImagingError {
    #[error("invalid filter window size: {0} (must be odd and >= 3)")]
    InvalidWindowSize(u32),

    #[error("image has no pixels")]
    EmptyImage,

    #[error(transparent)]
    Image(#[from] image::ImageError),
}
