pub mod color;
pub mod convert;
pub mod editor;
pub mod error;
pub mod hex;
pub mod palette;

// Re-export primary types for convenience.
pub use color::{Cmyk, ColorViews, Hsv, Rgb};
pub use convert::{cmyk_to_rgb, hsv_to_rgb, rgb_to_cmyk, rgb_to_hsv};
pub use editor::{ColorEditor, ColorObserver, Edit, EditOutcome};
pub use error::ColorError;
pub use hex::{parse_hex, to_hex};
pub use palette::{AddOutcome, Palette, DEFAULT_PALETTE, MAX_PALETTE_LEN};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, ColorError>;
