/// Error types for the map explorer
///
/// Each service reports its own error enum:
/// - `DecodeError` from the image presenter
/// - `CatalogError` from file listing, removal and import
/// - `InputError` from the "Resize to" fields (never shown, replaced by the fallback box)
/// - `ConfigError` from loading settings

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::state::data::Dimensions;

/// An image could not be turned into a displayable bitmap
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The source path could not be read
    #[error("failed to read image {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The data is not an image the decoder understands
    #[error("unsupported or corrupt image: {0}")]
    Image(#[from] image::ImageError),

    /// The buffer was neither an encoded image nor base64 text of one
    #[error("buffer is not an image and not base64 image data: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The bounding box asks for more pixels than a bitmap may hold
    #[error("{requested} is too large to display")]
    TooLarge { requested: Dimensions },

    /// Re-encoding the resized image to PNG failed
    #[error("failed to encode bitmap: {0}")]
    Encode(#[source] image::ImageError),
}

/// A catalog file operation failed
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The target vanished before the operation ran
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Copy or delete failed for any other reason (permissions, disk full...)
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CatalogError {
    /// Classify an `io::Error` raised while touching `path`
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            CatalogError::NotFound(path)
        } else {
            CatalogError::Io { path, source }
        }
    }
}

/// A "Resize to" field did not hold a usable size
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("`{0}` is not a whole number")]
    NotANumber(String),
    #[error("size must be at least 1 pixel")]
    Zero,
}

/// Settings could not be loaded
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
