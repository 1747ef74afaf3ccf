//! Trait directory discovery.
//!
//! Walks one trait directory and yields its variations as ordered
//! `(rarity, path)` entries. Turning those entries into a [`Trait`] is the
//! pure job of [`Trait::from_entries`]; this module only touches the
//! filesystem.
//!
//! ## Directory Structure
//!
//! ```text
//! traits/
//! ├── background/          # Trait (name = directory name)
//! │   ├── 0/               # Rarity level 0
//! │   │   ├── dusk.png
//! │   │   └── noon.png
//! │   └── 1/
//! │       └── aurora.png
//! └── tall/
//!     ├── 0/
//!     │   └── hat.png
//!     └── 2/
//!         └── extra/       # Nested folders are searched too
//!             └── crown.png
//! ```
//!
//! ## Ordering
//!
//! Rarity directories and the files within them are visited in lexical
//! filename order, so `10/` is visited before `2/`. Variation order is
//! significant: it fixes the layout of the rarity table and therefore which
//! variation a given seed selects.
//!
//! ## Validation
//!
//! - The trait path must exist and be a directory
//! - Every (non-hidden) subdirectory name must be a rarity integer
//! - The trait must end up with at least one variation
//!
//! Hidden entries (leading `.`), loose files at the trait root, and files
//! without a supported image extension are ignored. Symlinks to files count
//! as variations; a dangling one is an error rather than a silently smaller
//! rarity table.

use crate::imaging::is_supported_image;
use crate::naming;
use crate::traits::{Trait, TraitError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Trait path not found: {0}")]
    NotFound(PathBuf),
    #[error("Trait path is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Rarity directory name is not a non-negative integer: {0}")]
    InvalidRarity(PathBuf),
    #[error("Variation symlink target is missing: {0}")]
    BrokenLink(PathBuf),
    #[error(transparent)]
    Trait(#[from] TraitError),
}

/// Discover the variations of a trait directory as `(rarity, path)` pairs.
pub fn discover(trait_dir: &Path) -> Result<Vec<(u32, PathBuf)>, ScanError> {
    let metadata = std::fs::metadata(trait_dir).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ScanError::NotFound(trait_dir.to_path_buf()),
        _ => ScanError::Io(e),
    })?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory(trait_dir.to_path_buf()));
    }

    let mut entries = Vec::new();
    let rarity_dirs = WalkDir::new(trait_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for rarity_dir in rarity_dirs {
        let rarity_dir = rarity_dir?;
        if !rarity_dir.file_type().is_dir() {
            continue;
        }
        let dir_name = rarity_dir.file_name().to_string_lossy();
        let rarity = naming::parse_rarity(&dir_name)
            .ok_or_else(|| ScanError::InvalidRarity(rarity_dir.path().to_path_buf()))?;

        let files = WalkDir::new(rarity_dir.path())
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e));
        for file in files {
            let file = file?;
            if is_supported_image(file.path()) && is_variation_file(&file)? {
                entries.push((rarity, file.into_path()));
            }
        }
    }

    Ok(entries)
}

/// Discover and build one trait. The trait is named after its directory.
pub fn load_trait(trait_dir: &Path, rarity_multiplier: u32) -> Result<Trait, ScanError> {
    let name = naming::trait_name(trait_dir);
    if rarity_multiplier == 0 {
        return Err(TraitError::ZeroMultiplier { name }.into());
    }
    let entries = discover(trait_dir)?;
    Ok(Trait::from_entries(name, entries, rarity_multiplier)?)
}

/// Regular files, and symlinks resolving to one, are variations. Symlinked
/// directories are not descended into.
fn is_variation_file(entry: &DirEntry) -> Result<bool, ScanError> {
    if entry.file_type().is_file() {
        return Ok(true);
    }
    if !entry.path_is_symlink() {
        return Ok(false);
    }
    std::fs::metadata(entry.path())
        .map(|m| m.is_file())
        .map_err(|_| ScanError::BrokenLink(entry.path().to_path_buf()))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
