//! Mask provider: the two masks the effect cross-dissolves between

use std::fmt;
use std::sync::Arc;

use glam::Vec2;
use log::{debug, warn};

use crate::error::MaskError;
use crate::loader::{LoadPoll, MaskLoader};
use crate::mask::MaskImage;

/// Sample value reported for a mask that has not finished loading
pub const UNLOADED_SAMPLE: f32 = 0.0;

/// Which of the two masks to address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskId {
    /// Mask shown when the transition weight is 0
    Start,
    /// Mask shown when the transition weight is 1
    End,
}

impl MaskId {
    /// Both masks, start first
    pub const ALL: [Self; 2] = [Self::Start, Self::End];
}

impl fmt::Display for MaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::End => write!(f, "end"),
        }
    }
}

/// Source of mask intensities at normalized coordinates
pub trait MaskProvider {
    /// Sample a mask, or `None` while its image is not available yet
    fn try_sample(&self, id: MaskId, coord: Vec2) -> Option<f32>;

    /// Sample a mask, resolving a missing image to [`UNLOADED_SAMPLE`]
    fn sample(&self, id: MaskId, coord: Vec2) -> f32 {
        self.try_sample(id, coord).unwrap_or(UNLOADED_SAMPLE)
    }
}

/// Load state of a single mask
#[derive(Debug, Clone, Default)]
pub enum MaskSlot {
    /// Image not uploaded yet; samples resolve to the default
    #[default]
    Pending,
    /// Image uploaded and immutable from now on
    Ready(Arc<MaskImage>),
}

impl MaskSlot {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn image(&self) -> Option<&MaskImage> {
        match self {
            Self::Pending => None,
            Self::Ready(image) => Some(image),
        }
    }
}

/// The start and end masks plus any loaders still decoding them
#[derive(Debug, Default)]
pub struct MaskSet {
    start: MaskSlot,
    end: MaskSlot,
    loaders: Vec<MaskLoader>,
}

impl MaskSet {
    /// Create a set with both masks pending
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set with both masks already available
    pub fn with_images(start: MaskImage, end: MaskImage) -> Self {
        Self {
            start: MaskSlot::Ready(Arc::new(start)),
            end: MaskSlot::Ready(Arc::new(end)),
            loaders: Vec::new(),
        }
    }

    pub fn slot(&self, id: MaskId) -> &MaskSlot {
        match id {
            MaskId::Start => &self.start,
            MaskId::End => &self.end,
        }
    }

    /// Whether both masks have been uploaded
    pub fn is_ready(&self) -> bool {
        self.start.is_ready() && self.end.is_ready()
    }

    /// Cheap read-only copy of both slots for sampling from worker threads
    pub fn snapshot(&self) -> MaskSnapshot {
        MaskSnapshot {
            start: self.start.clone(),
            end: self.end.clone(),
        }
    }

    /// Number of background loads still in flight
    pub fn pending_loads(&self) -> usize {
        self.loaders.len()
    }

    /// Upload a decoded image into a slot, replacing whatever was there
    pub fn upload(&mut self, id: MaskId, image: MaskImage) {
        debug!(
            "Uploading {} mask ({}x{}, coverage {:.3})",
            id,
            image.width(),
            image.height(),
            image.coverage()
        );
        let slot = match id {
            MaskId::Start => &mut self.start,
            MaskId::End => &mut self.end,
        };
        *slot = MaskSlot::Ready(Arc::new(image));
    }

    /// Register a background loader whose result is uploaded by [`MaskSet::poll`]
    pub fn attach(&mut self, loader: MaskLoader) {
        self.loaders.push(loader);
    }

    /// Upload every image whose loader has finished
    ///
    /// Each loader delivers at most once. Failed loads leave their slot
    /// pending and are returned to the caller.
    pub fn poll(&mut self) -> Vec<MaskError> {
        let mut errors = Vec::new();
        let mut still_loading = Vec::with_capacity(self.loaders.len());

        for loader in std::mem::take(&mut self.loaders) {
            let id = loader.id();
            match loader.poll() {
                LoadPoll::Pending => still_loading.push(loader),
                LoadPoll::Ready(Ok(image)) => self.upload(id, image),
                LoadPoll::Ready(Err(e)) => {
                    warn!("Failed to load {} mask: {}", id, e);
                    errors.push(e);
                }
            }
        }

        self.loaders = still_loading;
        errors
    }
}

impl MaskProvider for MaskSet {
    fn try_sample(&self, id: MaskId, coord: Vec2) -> Option<f32> {
        self.slot(id).image().map(|image| image.sample(coord))
    }
}

/// Frozen view of a [`MaskSet`]'s slots
///
/// Slots share their images with the set, so taking a snapshot per
/// frame costs two reference-count increments. Unlike the set itself it
/// is `Sync` and can be sampled from many threads at once.
#[derive(Debug, Clone, Default)]
pub struct MaskSnapshot {
    start: MaskSlot,
    end: MaskSlot,
}

impl MaskSnapshot {
    pub fn is_ready(&self) -> bool {
        self.start.is_ready() && self.end.is_ready()
    }
}

impl MaskProvider for MaskSnapshot {
    fn try_sample(&self, id: MaskId, coord: Vec2) -> Option<f32> {
        let slot = match id {
            MaskId::Start => &self.start,
            MaskId::End => &self.end,
        };
        slot.image().map(|image| image.sample(coord))
    }
}
