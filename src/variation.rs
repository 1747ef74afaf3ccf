//! A single option for a trait.

use crate::naming;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One variation of a trait: a source image plus its rarity level.
///
/// Rarity 0 is the most common level; each level above it is less likely by
/// the owning trait's rarity multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variation {
    name: String,
    path: PathBuf,
    rarity: u32,
}

impl Variation {
    /// Build a variation from its source path, deriving the name from the filename.
    pub fn from_path(path: impl Into<PathBuf>, rarity: u32) -> Self {
        let path = path.into();
        Self {
            name: naming::variation_name(&path),
            path,
            rarity,
        }
    }

    /// Build a variation with an explicit name.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, rarity: u32) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            rarity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rarity(&self) -> u32 {
        self.rarity
    }
}
