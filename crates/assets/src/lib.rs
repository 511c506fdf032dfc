//! Texture assets: image decoding, solid-colour fallbacks, and a
//! content-addressed store.
//!
//! The renderer consumes textures by `TextureId`, never by file path.
//! Identical image bytes resolve to the same id and are decoded once.

use cakestand_common::Rgba;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Content-addressed texture id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

/// Decoded RGBA8 pixels, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureData {
    /// A 1x1 texture of a single colour.
    pub fn solid(color: Rgba) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: color.to_rgba8().to_vec(),
        }
    }

    /// Bytes per row of pixels.
    pub fn stride(&self) -> u32 {
        4 * self.width
    }
}

/// Errors from texture operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decode PNG or JPEG bytes into RGBA8.
pub fn decode_image(bytes: &[u8]) -> Result<TextureData, AssetError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(TextureData {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Read and decode an image file.
pub fn load_texture(path: impl AsRef<Path>) -> Result<TextureData, AssetError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_image(&bytes)
}

/// Texture registry rooted at an assets directory.
#[derive(Debug, Clone, Default)]
pub struct TextureStore {
    root: PathBuf,
    textures: BTreeMap<TextureId, TextureData>,
}

impl TextureStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            textures: BTreeMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Register already-decoded pixels.
    pub fn register(&mut self, data: TextureData) -> TextureId {
        let mut hasher = Sha256::new();
        hasher.update(b"pixels");
        hasher.update(data.width.to_le_bytes());
        hasher.update(data.height.to_le_bytes());
        hasher.update(&data.pixels);
        let id = digest_id(hasher);
        self.textures.entry(id).or_insert(data);
        id
    }

    /// Load an image relative to the store root. Files with identical bytes
    /// share one id and are decoded only once.
    pub fn load(&mut self, relative: impl AsRef<Path>) -> Result<TextureId, AssetError> {
        let path = self.root.join(relative.as_ref());
        let bytes = std::fs::read(&path).map_err(|source| AssetError::Io {
            path: path.clone(),
            source,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(b"file");
        hasher.update(&bytes);
        let id = digest_id(hasher);
        if !self.textures.contains_key(&id) {
            let data = decode_image(&bytes)?;
            tracing::debug!(
                "decoded {} ({}x{})",
                path.display(),
                data.width,
                data.height
            );
            self.textures.insert(id, data);
        }
        Ok(id)
    }

    /// Load an image, or register a solid `fallback` texture if it cannot be
    /// read or decoded.
    pub fn load_or_fallback(&mut self, relative: impl AsRef<Path>, fallback: Rgba) -> TextureId {
        match self.load(relative.as_ref()) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(
                    "texture {} unavailable, using {}: {e}",
                    relative.as_ref().display(),
                    fallback.to_hex()
                );
                self.register(TextureData::solid(fallback))
            }
        }
    }

    pub fn get(&self, id: TextureId) -> Option<&TextureData> {
        self.textures.get(&id)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

fn digest_id(hasher: Sha256) -> TextureId {
    let result = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&result[..8]);
    TextureId(u64::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(dir: &Path, name: &str, pixel: [u8; 4]) {
        image::RgbaImage::from_pixel(2, 3, image::Rgba(pixel))
            .save(dir.join(name))
            .unwrap();
    }

    #[test]
    fn solid_texture_is_one_pixel() {
        let tex = TextureData::solid(Rgba::from_rgb8(0x8B, 0x45, 0x13));
        assert_eq!((tex.width, tex.height), (1, 1));
        assert_eq!(tex.pixels, vec![0x8B, 0x45, 0x13, 0xFF]);
        assert_eq!(tex.stride(), 4);
    }

    #[test]
    fn load_png_from_root() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "bunny.png", [10, 20, 30, 255]);

        let mut store = TextureStore::new(dir.path());
        let id = store.load("bunny.png").unwrap();
        let tex = store.get(id).unwrap();
        assert_eq!((tex.width, tex.height), (2, 3));
        assert_eq!(&tex.pixels[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn identical_files_share_an_id() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png", [1, 2, 3, 255]);
        write_png(dir.path(), "b.png", [1, 2, 3, 255]);
        write_png(dir.path(), "c.png", [9, 9, 9, 255]);

        let mut store = TextureStore::new(dir.path());
        let a = store.load("a.png").unwrap();
        let b = store.load("b.png").unwrap();
        let c = store.load("c.png").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TextureStore::new(dir.path());
        assert!(matches!(
            store.load("missing.png"),
            Err(AssetError::Io { .. })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn garbage_bytes_are_decode_error() {
        assert!(matches!(
            decode_image(b"not an image"),
            Err(AssetError::Decode(_))
        ));
    }

    #[test]
    fn fallback_uses_cake_color() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TextureStore::new(dir.path());
        let color = Rgba::from_rgb8(0xFF, 0xC0, 0xCB);
        let id = store.load_or_fallback("WinniePooh.png", color);
        assert_eq!(store.get(id), Some(&TextureData::solid(color)));

        // Same colour twice is one texture
        let again = store.load_or_fallback("Principito.png", color);
        assert_eq!(id, again);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn load_texture_reads_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "x.png", [0, 0, 0, 255]);
        let tex = load_texture(dir.path().join("x.png")).unwrap();
        assert_eq!(tex.pixels.len(), 2 * 3 * 4);
    }
}
