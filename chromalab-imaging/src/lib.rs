pub mod codec;
pub mod error;
pub mod filter;
pub mod pair;
pub mod threshold;

pub use codec::{load_image, save_image, SUPPORTED_EXTENSIONS};
pub use error::ImagingError;
pub use filter::{apply_order_statistic_filter, OrderStatistic, WindowSize};
pub use pair::{ImagePair, Operation};
pub use threshold::{binarize, otsu_threshold, otsu_threshold_image, to_grayscale, Histogram};

/// Convenience result type for the imaging crate.
pub type Result<T> = std::result::Result<T, ImagingError>;
