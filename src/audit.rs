//! Audit records for generated images.
//!
//! Every generated image can be traced back to exactly what produced it: the
//! seed, the strategy, and for each trait the digit it read from the seed
//! and the variation it landed on. Source files and the composed pixels are
//! fingerprinted with SHA-256, so a later run can prove it reproduced the
//! same image from the same inputs.
//!
//! ## Fingerprints
//!
//! - **`source_sha256`**: SHA-256 of the variation's source file bytes,
//!   taken from the very bytes the decoder read (see
//!   [`Composition`]). Content-based, so renaming a file does not change it
//!   but editing the artwork does.
//! - **`pixels_sha256`**: SHA-256 over the canvas width and height
//!   (little-endian `u32`) followed by the raw RGBA bytes. Independent of
//!   PNG encoder settings, so it identifies the image rather than the file.
//!
//! ## Storage
//!
//! [`write_outputs`] writes the record as pretty JSON next to the image:
//! `generated/239487.png` + `generated/239487.json`. The record is
//! serialized before anything is written, and an image whose record cannot
//! be written is removed again, so an image never sits on disk without its
//! record.

use crate::compositor::{Composition, CompositionStrategy};
use crate::imaging::{BackendError, save_png};
use crate::select::Pick;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Image error: {0}")]
    Image(#[from] BackendError),
}

/// Everything needed to reproduce and verify one generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub seed: u64,
    pub composition: CompositionStrategy,
    pub traits: Vec<TraitRecord>,
    pub width: u32,
    pub height: u32,
    pub pixels_sha256: String,
}

/// The selection outcome for one trait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitRecord {
    #[serde(rename = "trait")]
    pub trait_name: String,
    pub variation: String,
    pub rarity: u32,
    pub digit: u64,
    pub table_len: u64,
    pub source: PathBuf,
    pub source_sha256: String,
}

impl GenerationRecord {
    /// Build a record from a seed's picks and what they composed into.
    ///
    /// `picks` and `composed.source_sha256` are both in trait order. No file
    /// is read.
    pub fn build(
        seed: u64,
        strategy: CompositionStrategy,
        picks: &[Pick<'_>],
        composed: &Composition,
    ) -> Self {
        let traits = picks
            .iter()
            .zip(&composed.source_sha256)
            .map(|(p, sha)| TraitRecord {
                trait_name: p.trait_name.to_string(),
                variation: p.variation.name().to_string(),
                rarity: p.variation.rarity(),
                digit: p.digit,
                table_len: p.table_len,
                source: p.variation.path().to_path_buf(),
                source_sha256: sha.clone(),
            })
            .collect();

        Self {
            seed,
            composition: strategy,
            traits,
            width: composed.image.width(),
            height: composed.image.height(),
            pixels_sha256: hash_pixels(&composed.image),
        }
    }

    /// Write the record as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), AuditError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read a record written by [`save`](Self::save).
    pub fn load(path: &Path) -> Result<Self, AuditError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// SHA-256 hash of an image's dimensions and RGBA pixels, as a hex string.
pub fn hash_pixels(image: &RgbaImage) -> String {
    let mut hasher = Sha256::new();
    hasher.update(image.width().to_le_bytes());
    hasher.update(image.height().to_le_bytes());
    hasher.update(image.as_raw());
    format!("{:x}", hasher.finalize())
}

/// Path of the audit record that accompanies `image_path`.
pub fn record_path(image_path: &Path) -> PathBuf {
    image_path.with_extension("json")
}

/// Files produced by [`write_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub image: PathBuf,
    /// `None` when the record was skipped.
    pub record: Option<PathBuf>,
}

/// Write `<seed>.png`, and `<seed>.json` when `with_record` is set, into
/// `output_dir` (created if missing).
pub fn write_outputs(
    output_dir: &Path,
    image: &RgbaImage,
    record: &GenerationRecord,
    with_record: bool,
) -> Result<Written, AuditError> {
    let json = if with_record {
        Some(serde_json::to_string_pretty(record)?)
    } else {
        None
    };

    std::fs::create_dir_all(output_dir)?;
    let image_path = output_dir.join(format!("{}.png", record.seed));
    save_png(image, &image_path)?;

    let Some(json) = json else {
        return Ok(Written {
            image: image_path,
            record: None,
        });
    };
    let path = record_path(&image_path);
    if let Err(e) = std::fs::write(&path, json) {
        if let Err(cleanup) = std::fs::remove_file(&image_path) {
            tracing::warn!(
                path = %image_path.display(),
                error = %cleanup,
                "could not remove image after failed record write"
            );
        }
        return Err(e.into());
    }
    Ok(Written {
        image: image_path,
        record: Some(path),
    })
}
