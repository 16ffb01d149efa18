use pixmorph::{ImageRef, ImageSource, SessionError, SessionResult};
use std::path::PathBuf;

/// Image source where every reference is a filesystem path
///
/// Relative references resolve against `base_dir`.
#[derive(Debug, Clone)]
pub struct FileImageSource {
    base_dir: PathBuf,
}

impl FileImageSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn resolve(&self, image_ref: &ImageRef) -> PathBuf {
        self.base_dir.join(image_ref.as_str())
    }
}

impl ImageSource for FileImageSource {
    fn fetch(&self, image_ref: &ImageRef) -> SessionResult<Vec<u8>> {
        let path = self.resolve(image_ref);
        std::fs::read(&path).map_err(|e| SessionError::fetch(path.display().to_string(), e.to_string()))
    }
}
