//! Image decoding backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the one seam between composition and the
//! filesystem: it turns a source path into RGBA pixels plus a fingerprint of
//! the exact bytes those pixels came from. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend); tests substitute the
//! in-memory `MockBackend` below.

use image::RgbaImage;
use sha2::{Digest, Sha256};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn of(image: &RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
        }
    }
}

/// A decoded source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub image: RgbaImage,
    /// SHA-256 (hex) of the bytes `image` was decoded from.
    pub source_sha256: String,
}

/// Trait for image decoding backends.
///
/// `Sync` so decoding can fan out across rayon workers.
pub trait ImageBackend: Sync {
    /// Open and decode an image into 8-bit RGBA.
    fn decode(&self, path: &Path) -> Result<Decoded, BackendError>;
}

/// SHA-256 hash of a byte slice, returned as a hex string.
pub fn hash_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
