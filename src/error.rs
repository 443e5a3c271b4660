use thiserror::Error;

/// Failures surfaced to whoever drives a particle field.
///
/// Out-of-order lifecycle calls are not errors; they are ignored.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Dimensions or pixel buffer can't describe an RGBA image
    #[error("invalid image {width}x{height}: {reason}")]
    InvalidImage {
        width: u32,
        height: u32,
        reason: String,
    },

    /// Decode or fetch of the image resource failed
    #[error("failed to load image: {0}")]
    LoadFailure(String),

    #[error("invalid field configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl FieldError {
    pub fn invalid_image(width: u32, height: u32, reason: impl Into<String>) -> Self {
        FieldError::InvalidImage {
            width,
            height,
            reason: reason.into(),
        }
    }
}
