use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageReader, RgbImage};

use crate::error::AnalysisError;

/// An opaque image source the loader can turn into a raster.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A filesystem path to an encoded image file.
    Path(PathBuf),
    /// An in-memory encoded image buffer.
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// Build a source from a string reference. Remote and inline URIs are
    /// ingestion plumbing, not the engine, and are rejected as unsupported.
    pub fn from_path_str(s: &str) -> Result<Self, AnalysisError> {
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://")
            || lower.starts_with("https://")
            || lower.starts_with("data:")
        {
            return Err(AnalysisError::UnsupportedSource(s.to_string()));
        }
        Ok(ImageSource::Path(PathBuf::from(s)))
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        ImageSource::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        ImageSource::Bytes(bytes)
    }
}

/// Decode a source into an RGB raster of known dimensions.
pub fn load_raster(source: &ImageSource) -> Result<RgbImage, AnalysisError> {
    let decoded = match source {
        ImageSource::Path(path) => ImageReader::open(path)
            .map_err(|e| AnalysisError::ImageDecode(format!("{}: {}", path.display(), e)))?
            .decode()
            .map_err(|e| AnalysisError::ImageDecode(format!("{}: {}", path.display(), e)))?,
        ImageSource::Bytes(bytes) => ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| AnalysisError::ImageDecode(e.to_string()))?
            .decode()
            .map_err(|e| AnalysisError::ImageDecode(e.to_string()))?,
    };
    Ok(decoded.to_rgb8())
}
