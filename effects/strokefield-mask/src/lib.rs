//! Mask images for the strokefield particle effect.
//!
//! The effect shows a particle wherever one of two binary masks is "on"
//! and cross-dissolves between the masks. This crate owns the mask side:
//!
//! - [`MaskImage`]: a decoded single-channel image with texture-style
//!   bilinear, clamp-to-edge sampling
//! - [`MaskSet`]: the start/end pair, each slot either pending or ready
//! - [`MaskLoader`]: one-shot background decoding of an image file
//!
//! # Example
//!
//! ```rust,no_run
//! use glam::Vec2;
//! use strokefield_mask::{MaskId, MaskLoader, MaskProvider, MaskSet};
//!
//! let mut masks = MaskSet::new();
//! masks.attach(MaskLoader::spawn(MaskId::Start, "img/1.png")?);
//! masks.attach(MaskLoader::spawn(MaskId::End, "img/2.png")?);
//!
//! // Every frame: upload finished images, then sample
//! masks.poll();
//! let value = masks.sample(MaskId::Start, Vec2::new(0.5, 0.5));
//! # Ok::<(), strokefield_mask::MaskError>(())
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod loader;
pub mod mask;
pub mod provider;

pub use error::{MaskError, Result};
pub use loader::{LoadPoll, MaskLoader};
pub use mask::{MASK_THRESHOLD, MaskImage, binarize};
pub use provider::{MaskId, MaskProvider, MaskSet, MaskSlot, MaskSnapshot, UNLOADED_SAMPLE};
