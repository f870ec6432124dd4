use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::data::CatalogEntry;
use crate::error::CatalogError;

/// Name suffixes (lowercase) of files shown in the catalog.
///
/// `jpeg` has no leading dot, so a file literally named `jpeg` or
/// `notajpeg` is listed too. Kept for compatibility with existing map folders.
const IMAGE_SUFFIXES: [&str; 5] = [".png", ".jpg", "jpeg", ".tiff", ".bmp"];

/// The Catalog is the listing of one browsed directory.
///
/// It is always rebuilt from scratch with `scan`, never patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    directory: PathBuf,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// List `directory` and remember it as the browsed directory
    pub fn scan(directory: impl Into<PathBuf>) -> Self {
        let directory = directory.into();
        let entries = list_images(&directory);

        log::info!(
            "📁 {} maps in {}",
            entries.len(),
            directory.display()
        );

        Catalog { directory, entries }
    }

    /// The directory this catalog was built from
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Listed file names, in filesystem order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Full path of a file name inside the browsed directory
    pub fn resolve(&self, name: impl AsRef<Path>) -> PathBuf {
        self.directory.join(name)
    }

    pub fn contains(&self, entry: &CatalogEntry) -> bool {
        self.entries.contains(entry)
    }

    /// Scan the same directory again
    pub fn rescan(&self) -> Self {
        Self::scan(self.directory.clone())
    }
}

/// Check whether a file name is one of the supported map formats
pub fn is_catalog_image(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
}

/// List the map images directly inside `directory` (not recursive)
///
/// An unreadable or missing directory lists as empty. No particular
/// order is guaranteed.
pub fn list_images(directory: &Path) -> Vec<CatalogEntry> {
    WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::debug!("skipping unreadable entry: {}", err);
                None
            }
        })
        // Only regular files (not directories)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| is_catalog_image(&entry.file_name().to_string_lossy()))
        .map(|entry| CatalogEntry::new(entry.file_name()))
        .collect()
}

/// Delete a map file
///
/// A path that no longer exists reports `CatalogError::NotFound`.
pub fn remove_file(path: &Path) -> Result<(), CatalogError> {
    fs::remove_file(path).map_err(|err| CatalogError::from_io(path, err))?;
    log::info!("🗑️  Removed {}", path.display());
    Ok(())
}

/// Copy a file into `destination`, replacing any file with the same name
///
/// Returns the path of the copy. Every failure is reported as `CatalogError::Io`.
pub fn import_file(source: &Path, destination: &Path) -> Result<PathBuf, CatalogError> {
    let name = source.file_name().ok_or_else(|| CatalogError::Io {
        path: source.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
    })?;
    let target = destination.join(name);

    fs::copy(source, &target).map_err(|source_err| CatalogError::Io {
        path: source.to_path_buf(),
        source: source_err,
    })?;

    log::info!("📥 Imported {} into {}", source.display(), destination.display());
    Ok(target)
}
