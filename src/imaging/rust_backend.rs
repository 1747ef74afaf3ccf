//! Pure Rust decoding backend built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Read + fingerprint | `std::fs::read`, SHA-256 of the bytes |
//! | Decode (PNG) | `image::ImageReader` over the same bytes, content-sniffed format |
//! | Normalize | `DynamicImage::into_rgba8` |
//! | Encode (PNG) | `RgbaImage::save_with_format` |

use super::backend::{BackendError, Decoded, ImageBackend, hash_bytes};
use image::{ImageFormat, ImageReader, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Extensions discovery accepts as variation images.
const SUPPORTED_EXTENSIONS: &[&str] = &["png"];

/// Whether `path` has a supported image extension (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|ext| e.eq_ignore_ascii_case(ext))
        })
}

/// Backend using the `image` crate decoders.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    /// The file is read once; the fingerprint and the pixels come from the
    /// same bytes.
    fn decode(&self, path: &Path) -> Result<Decoded, BackendError> {
        let bytes = std::fs::read(path)?;
        let reader = ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()
            .map_err(BackendError::Io)?;
        let image = reader.decode().map_err(|e| {
            BackendError::Decode(format!("Failed to decode {}: {}", path.display(), e))
        })?;
        Ok(Decoded {
            image: image.into_rgba8(),
            source_sha256: hash_bytes(&bytes),
        })
    }
}

/// Encode an RGBA image as PNG.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), BackendError> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| BackendError::Encode(format!("Failed to write {}: {}", path.display(), e)))
}
