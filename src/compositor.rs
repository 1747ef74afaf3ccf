//! Composition of selected variations into one image.
//!
//! A [`Compositor`] pairs one [`CompositionStrategy`] with an image decoding
//! backend. [`Compositor::compose`] decodes every variation's source, then
//! draws them in list order:
//!
//! | Strategy | Canvas | Drawing |
//! |---|---|---|
//! | [`Overlap`](CompositionStrategy::Overlap) | max width × max height | each layer at the origin, alpha "over" |
//! | [`Horizontal`](CompositionStrategy::Horizontal) | sum of widths × max height | left to right, direct copy |
//!
//! ## Ordering
//!
//! Decoding runs in parallel on the rayon pool, but results are collected in
//! input order before anything is drawn. Neither strategy reorders, skips or
//! deduplicates its input: the list order (trait order) is the layer order.
//!
//! ## Failure
//!
//! An empty list, or any source that cannot be opened or decoded, fails the
//! whole composition. No partial canvas is ever returned.
//!
//! ## Fingerprints
//!
//! A [`Composition`] carries the SHA-256 of every source file alongside the
//! pixels, hashed from the same bytes the backend decoded. Audit records
//! built from it never re-read the sources.

use crate::imaging::{
    BackendError, Decoded, Dimensions, ImageBackend, RustBackend, stack_layers,
    tile_horizontally,
};
use crate::variation::Variation;
use image::RgbaImage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("No variations to compose")]
    Empty,
    #[error("Failed to load {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    #[error("Combined canvas is too large ({0} images)")]
    CanvasTooLarge(usize),
}

/// How the selected variations are arranged in relation to one another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositionStrategy {
    /// Layers stacked at the same position; later traits on top.
    #[default]
    Overlap,
    /// Images placed side by side, first trait on the left.
    Horizontal,
}

impl fmt::Display for CompositionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overlap => write!(f, "overlap"),
            Self::Horizontal => write!(f, "horizontal"),
        }
    }
}

impl CompositionStrategy {
    /// Arrange already-decoded images.
    pub fn apply(self, images: &[RgbaImage]) -> Result<RgbaImage, ComposeError> {
        if images.is_empty() {
            return Err(ComposeError::Empty);
        }
        match self {
            Self::Overlap => Ok(stack_layers(images)),
            Self::Horizontal => {
                tile_horizontally(images).ok_or(ComposeError::CanvasTooLarge(images.len()))
            }
        }
    }
}

/// A composed image and the fingerprints of the sources drawn into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub image: RgbaImage,
    /// SHA-256 (hex) of each source file, in input order.
    pub source_sha256: Vec<String>,
}

/// Arranges variations into the final image using one strategy.
pub struct Compositor<B: ImageBackend = RustBackend> {
    strategy: CompositionStrategy,
    backend: B,
}

impl Compositor<RustBackend> {
    pub fn new(strategy: CompositionStrategy) -> Self {
        Self::with_backend(strategy, RustBackend::new())
    }
}

impl Default for Compositor<RustBackend> {
    fn default() -> Self {
        Self::new(CompositionStrategy::default())
    }
}

impl<B: ImageBackend> Compositor<B> {
    /// Build a compositor that decodes through a specific backend (allows testing with mock).
    pub fn with_backend(strategy: CompositionStrategy, backend: B) -> Self {
        Self { strategy, backend }
    }

    pub fn strategy(&self) -> CompositionStrategy {
        self.strategy
    }

    /// Decode every variation and compose them with the configured strategy.
    pub fn compose(&self, variations: &[&Variation]) -> Result<Composition, ComposeError> {
        if variations.is_empty() {
            return Err(ComposeError::Empty);
        }

        let decoded = variations
            .par_iter()
            .map(|v| {
                self.backend
                    .decode(v.path())
                    .map_err(|source| ComposeError::ImageLoad {
                        path: v.path().to_path_buf(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let (images, source_sha256): (Vec<RgbaImage>, Vec<String>) = decoded
            .into_iter()
            .map(|Decoded { image, source_sha256 }| (image, source_sha256))
            .unzip();
        let image = self.strategy.apply(&images)?;
        let size = Dimensions::of(&image);
        tracing::debug!(
            strategy = %self.strategy,
            layers = images.len(),
            width = size.width,
            height = size.height,
            "composed image"
        );
        Ok(Composition {
            image,
            source_sha256,
        })
    }
}
