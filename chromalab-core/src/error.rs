use thiserror::Error;

/// Errors originating from the colorspace engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid hex color: {input:?} (expected #RGB or #RRGGBB)")]
    InvalidFormat { input: String },
}
