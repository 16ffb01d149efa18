//! Where raw image bytes come from

use crate::error::{SessionError, SessionResult};
use crate::session::ImageRef;
use dashmap::DashMap;

/// Resolves an [`ImageRef`] to the raw bytes of the submitted image
pub trait ImageSource: Send + Sync {
    fn fetch(&self, image_ref: &ImageRef) -> SessionResult<Vec<u8>>;
}

/// Images held in process memory, keyed by reference
#[derive(Debug, Default)]
pub struct MemoryImageSource {
    images: DashMap<ImageRef, Vec<u8>>,
}

impl MemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store bytes under `image_ref`, replacing any previous upload
    pub fn insert(&self, image_ref: ImageRef, bytes: Vec<u8>) {
        self.images.insert(image_ref, bytes);
    }
}

impl ImageSource for MemoryImageSource {
    fn fetch(&self, image_ref: &ImageRef) -> SessionResult<Vec<u8>> {
        self.images
            .get(image_ref)
            .map(|bytes| bytes.value().clone())
            .ok_or_else(|| SessionError::fetch(image_ref.as_str(), "unknown image reference"))
    }
}

impl<T: ImageSource + ?Sized> ImageSource for std::sync::Arc<T> {
    fn fetch(&self, image_ref: &ImageRef) -> SessionResult<Vec<u8>> {
        (**self).fetch(image_ref)
    }
}
