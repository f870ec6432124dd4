/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the catalog, the image presenter and the windows.

use crate::error::InputError;
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;

/// A width/height pair in pixels, both at least 1
///
/// Used both for an image's natural size and for a bounding box
/// an image must fit into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Returns `None` if either side is zero
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    /// Convert a window size reported in logical pixels
    ///
    /// Fractions are rounded and a collapsed window still counts as 1x1.
    pub fn from_logical(width: f32, height: f32) -> Self {
        let side = |v: f32| {
            if v.is_finite() {
                v.round().max(1.0) as u32
            } else {
                1
            }
        };
        Self {
            width: side(width),
            height: side(height),
        }
    }

    /// Parse the two "Resize to" text fields
    pub fn parse(width: &str, height: &str) -> Result<Self, InputError> {
        let side = |raw: &str| {
            let raw = raw.trim();
            raw.parse::<u32>()
                .map_err(|_| InputError::NotANumber(raw.to_string()))
        };
        Self::new(side(width)?, side(height)?).ok_or(InputError::Zero)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Where an image comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A file on disk
    Path(PathBuf),
    /// An encoded image (PNG, JPEG...) or base64 text of one
    Encoded(Vec<u8>),
}

/// A PNG-encoded image ready to hand to a window
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// PNG bytes
    pub png: Vec<u8>,
    /// Pixel size of the encoded image
    pub dimensions: Dimensions,
}

// The PNG payload is noise in logs
impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("dimensions", &self.dimensions)
            .field("png_len", &self.png.len())
            .finish()
    }
}

/// A file name (no directory) listed in the catalog
///
/// Names are kept as the OS returned them, so files whose names
/// are not valid UTF-8 can still be selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogEntry(OsString);

impl CatalogEntry {
    pub fn new(file_name: impl Into<OsString>) -> Self {
        Self(file_name.into())
    }

    /// The exact file name, for building paths
    pub fn file_name(&self) -> &OsStr {
        &self.0
    }

    /// The file name for display (invalid UTF-8 replaced)
    pub fn name(&self) -> Cow<'_, str> {
        self.0.to_string_lossy()
    }
}
