use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::catalog::DeskRecord;

#[derive(Debug, Error)]
pub enum ImageCacheError {
    #[error("image locator is empty")]
    EmptyLocator,
    #[error("remote image {0} cannot be preloaded from disk")]
    Remote(String),
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type ImageCacheResult<T> = std::result::Result<T, ImageCacheError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PreloadReport {
    pub cached: usize,
    pub failed: usize,
}

/// Preloads desk images from the asset root so the viewer can show them without waiting.
#[derive(Debug, Clone)]
pub struct ImageCache {
    asset_root: PathBuf,
    entries: HashMap<String, CachedImage>,
}

impl ImageCache {
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
            entries: HashMap::new(),
        }
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_cached(&self, locator: &str) -> bool {
        self.entries.contains_key(locator)
    }

    pub fn get(&self, locator: &str) -> Option<&CachedImage> {
        self.entries.get(locator)
    }

    pub fn resolve_path(&self, locator: &str) -> ImageCacheResult<PathBuf> {
        let locator = locator.trim();
        if locator.is_empty() {
            return Err(ImageCacheError::EmptyLocator);
        }
        if locator.contains("://") {
            return Err(ImageCacheError::Remote(locator.to_string()));
        }
        Ok(self.asset_root.join(locator.trim_start_matches('/')))
    }

    pub fn preload(&mut self, locator: &str) -> ImageCacheResult<CachedImage> {
        if let Some(cached) = self.entries.get(locator) {
            return Ok(cached.clone());
        }

        let path = self.resolve_path(locator)?;
        let (width, height) = image::image_dimensions(&path).map_err(|source| {
            ImageCacheError::Decode {
                path: path.clone(),
                source,
            }
        })?;
        tracing::debug!(locator, width, height, "image preloaded");

        let cached = CachedImage {
            path,
            width,
            height,
        };
        self.entries.insert(locator.to_string(), cached.clone());
        Ok(cached)
    }

    /// Preloads the profile and every photo of a desk; failures are logged and counted.
    pub fn preload_desk(&mut self, desk: &DeskRecord) -> PreloadReport {
        let mut report = PreloadReport::default();
        let locators = desk
            .profile
            .iter()
            .chain(desk.photos.iter())
            .map(String::as_str);

        for locator in locators {
            match self.preload(locator) {
                Ok(_) => report.cached += 1,
                Err(err) => {
                    tracing::warn!(desk = %desk.id, locator, %err, "failed to preload desk image");
                    report.failed += 1;
                }
            }
        }
        report
    }
}
