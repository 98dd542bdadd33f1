//! Background mask decoding
//!
//! A [`MaskLoader`] decodes one image file on its own thread and hands the
//! result over exactly once. The render loop never blocks on it: it polls
//! at the start of a frame and keeps sampling the default until the image
//! arrives.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use log::{debug, trace};

use crate::error::{MaskError, Result};
use crate::mask::MaskImage;
use crate::provider::MaskId;

/// Outcome of polling a loader
#[derive(Debug)]
pub enum LoadPoll {
    /// Still decoding
    Pending,
    /// Finished, successfully or not
    Ready(Result<MaskImage>),
}

/// One-shot background decode of a mask image file
#[derive(Debug)]
pub struct MaskLoader {
    id: MaskId,
    source: PathBuf,
    receiver: Receiver<Result<MaskImage>>,
}

impl MaskLoader {
    /// Start decoding `path` on a background thread
    pub fn spawn<P: AsRef<Path>>(id: MaskId, path: P) -> Result<Self> {
        let source = path.as_ref().to_path_buf();
        let (sender, receiver) = mpsc::channel();

        let thread_source = source.clone();
        thread::Builder::new()
            .name(format!("mask-loader-{id}"))
            .spawn(move || {
                let result = MaskImage::load(&thread_source);
                // The receiver may already be gone if the set was dropped
                let _ = sender.send(result);
            })?;

        debug!("Loading {} mask from {}", id, source.display());
        Ok(Self {
            id,
            source,
            receiver,
        })
    }

    pub fn id(&self) -> MaskId {
        self.id
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Check for a finished decode without blocking
    pub fn poll(&self) -> LoadPoll {
        match self.receiver.try_recv() {
            Ok(result) => LoadPoll::Ready(result),
            Err(TryRecvError::Empty) => {
                trace!("{} mask still loading", self.id);
                LoadPoll::Pending
            }
            Err(TryRecvError::Disconnected) => {
                LoadPoll::Ready(Err(MaskError::LoaderDisconnected(self.id)))
            }
        }
    }

    /// Block until the decode finishes
    pub fn wait(self) -> Result<MaskImage> {
        self.receiver
            .recv()
            .map_err(|_| MaskError::LoaderDisconnected(self.id))?
    }
}
