use std::io;
use thiserror::Error;

use crate::provider::MaskId;

/// Error types for mask decoding and loading
#[derive(Error, Debug)]
pub enum MaskError {
    /// I/O error while reading an image file or spawning a loader
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The image bytes could not be decoded
    #[error("Image decode error: {0}")]
    Decode(#[from] ::image::ImageError),

    /// The image has no texels to sample
    #[error("Mask image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// Texel buffer length does not match the declared dimensions
    #[error("Texel buffer holds {actual} values, {width}x{height} expected")]
    SizeMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },

    /// A background loader went away without delivering its image
    #[error("Background loader for the {0} mask disconnected before delivering an image")]
    LoaderDisconnected(MaskId),
}

/// Result type using MaskError
pub type Result<T> = std::result::Result<T, MaskError>;
