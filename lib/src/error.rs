//! Error types for session actions

use thiserror::Error;

/// Why a conversation action was rejected or could not complete
#[derive(Error, Debug)]
pub enum SessionError {
    /// A transform or text input arrived before any image was submitted
    #[error("no image available: send a photo first")]
    NoImageAvailable,

    /// The image source could not produce bytes for the stored reference
    #[error("failed to fetch image '{image_ref}': {message}")]
    Fetch { image_ref: String, message: String },

    /// The fetched bytes are not a decodable image
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// The transformed image could not be encoded for delivery
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    /// Pixelation would leave nothing to send
    #[error("image {width}x{height} is smaller than one {block_size}px block")]
    ImageTooSmall {
        width: u32,
        height: u32,
        block_size: u32,
    },
}

impl SessionError {
    /// Creates a Fetch error
    pub fn fetch(image_ref: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            image_ref: image_ref.into(),
            message: message.into(),
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
