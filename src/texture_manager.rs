//! Host-side image resolution.
//!
//! Image shapes only name their source. The texture manager decodes sources
//! with the `image` crate, keeps the decoded pixels, and uploads filtered
//! textures to egui, re-uploading whenever the document's filters change.

use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use image::DynamicImage;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::filters::ImageFilters;
use crate::shape::ImageSource;

/// Errors that can occur while decoding an image source
#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("Failed to read image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode image {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error("Dropped file {0} has no accessible data")]
    NoData(String),
}

const FILE_SCHEME: &str = "file://";

struct UploadedTexture {
    filters: ImageFilters,
    handle: TextureHandle,
}

#[derive(Default)]
pub struct TextureManager {
    decoded: HashMap<ImageSource, DynamicImage>,
    uploaded: HashMap<ImageSource, UploadedTexture>,
}

impl std::fmt::Debug for TextureManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureManager")
            .field("decoded", &self.decoded.len())
            .field("uploaded", &self.uploaded.len())
            .finish()
    }
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a file and returns the source to store on the image shape.
    pub fn load_path(&mut self, path: &Path) -> Result<ImageSource, ImageLoadError> {
        let bytes = std::fs::read(path).map_err(|source| ImageLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source = ImageSource::new(format!("{FILE_SCHEME}{}", path.display()));
        self.load_bytes(source, &bytes)
    }

    /// Decodes in-memory bytes under the given source name.
    pub fn load_bytes(
        &mut self,
        source: ImageSource,
        bytes: &[u8],
    ) -> Result<ImageSource, ImageLoadError> {
        let decoded = image::load_from_memory(bytes).map_err(|e| ImageLoadError::Decode {
            name: source.as_str().to_owned(),
            source: e,
        })?;

        log::info!(
            "Decoded {} ({}x{})",
            source.as_str(),
            decoded.width(),
            decoded.height()
        );
        self.uploaded.remove(&source);
        self.decoded.insert(source.clone(), decoded);
        Ok(source)
    }

    pub fn is_resolved(&self, source: &ImageSource) -> bool {
        self.decoded.contains_key(source)
    }

    /// Decodes every file-backed source that is not in memory yet, e.g.
    /// after a snapshot load. Returns the sources that could not be decoded.
    pub fn resolve_all<'a>(
        &mut self,
        sources: impl IntoIterator<Item = &'a ImageSource>,
    ) -> Vec<ImageSource> {
        let mut failed = Vec::new();
        for source in sources {
            if self.is_resolved(source) {
                continue;
            }

            let Some(path) = source.as_str().strip_prefix(FILE_SCHEME) else {
                log::warn!("Cannot resolve image source {}", source.as_str());
                failed.push(source.clone());
                continue;
            };
            if let Err(err) = self.load_path(Path::new(path)) {
                log::warn!("{err}");
                failed.push(source.clone());
            }
        }
        failed
    }

    /// Texture for `source` with `filters` applied, uploading on first use
    /// and whenever the filters differ from the last upload.
    pub fn texture(
        &mut self,
        ctx: &Context,
        source: &ImageSource,
        filters: ImageFilters,
    ) -> Option<TextureId> {
        if let Some(uploaded) = self.uploaded.get(source) {
            if uploaded.filters == filters {
                return Some(uploaded.handle.id());
            }
        }

        let decoded = self.decoded.get(source)?;
        let pixels = filters.apply(decoded);
        let size = [pixels.width() as usize, pixels.height() as usize];
        let image = ColorImage::from_rgba_unmultiplied(size, pixels.as_raw());
        let handle = ctx.load_texture(source.as_str(), image, TextureOptions::LINEAR);
        let id = handle.id();
        self.uploaded
            .insert(source.clone(), UploadedTexture { filters, handle });
        Some(id)
    }

    /// Drops decoded pixels and textures no shape refers to anymore.
    pub fn retain<'a>(&mut self, live: impl IntoIterator<Item = &'a ImageSource>) {
        let live: HashSet<&ImageSource> = live.into_iter().collect();
        self.decoded.retain(|source, _| live.contains(source));
        self.uploaded.retain(|source, _| live.contains(source));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let mut bytes = Vec::new();
        RgbaImage::from_pixel(2, 3, Rgba([1, 2, 3, 255]))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn decodes_png_bytes() {
        let mut manager = TextureManager::new();
        let source = manager
            .load_bytes(ImageSource::new("memory://a"), &png_bytes())
            .unwrap();
        assert!(manager.is_resolved(&source));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let mut manager = TextureManager::new();
        let err = manager
            .load_bytes(ImageSource::new("memory://b"), b"not an image")
            .unwrap_err();
        assert!(matches!(err, ImageLoadError::Decode { .. }));
    }

    #[test]
    fn unresolvable_sources_are_reported() {
        let mut manager = TextureManager::new();
        let sources = [
            ImageSource::new("memory://nowhere"),
            ImageSource::new("file:///no/such/image.png"),
        ];
        assert_eq!(manager.resolve_all(&sources).len(), 2);
    }

    #[test]
    fn retain_drops_unused_images() {
        let mut manager = TextureManager::new();
        let kept = manager
            .load_bytes(ImageSource::new("memory://kept"), &png_bytes())
            .unwrap();
        let dropped = manager
            .load_bytes(ImageSource::new("memory://dropped"), &png_bytes())
            .unwrap();
        manager.retain([&kept]);
        assert!(manager.is_resolved(&kept));
        assert!(!manager.is_resolved(&dropped));
    }
}
