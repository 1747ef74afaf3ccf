//! Shared test utilities for the traitmint test suite.
//!
//! Builds trait directories full of synthetic PNGs inside a temp dir, and
//! provides lookups that panic with a clear message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let dir = write_trait(tmp.path(), "tall", &[(0, "hat"), (2, "crown")]);
//! let t = load_trait(&dir, 2).unwrap();
//! assert_eq!(variation_names(&t), vec!["hat", "crown"]);
//! assert_eq!(find_variation(&t, "crown").rarity(), 2);
//! ```

use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

use crate::traits::Trait;
use crate::variation::Variation;

/// Side length of the square PNGs written by [`write_trait`].
pub const VARIATION_SIZE: u32 = 8;

// =========================================================================
// Fixture setup
// =========================================================================

/// Write a solid-color PNG, creating parent directories as needed.
pub fn write_png(path: &Path, width: u32, height: u32, color: [u8; 4]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    RgbaImage::from_pixel(width, height, Rgba(color))
        .save(path)
        .unwrap();
}

/// Opaque color derived from a variation name, so different names draw differently.
pub fn color_for(name: &str) -> [u8; 4] {
    let mut hash: u32 = 2_166_136_261;
    for b in name.bytes() {
        hash = (hash ^ u32::from(b)).wrapping_mul(16_777_619);
    }
    let [r, g, b, _] = hash.to_le_bytes();
    [r, g, b, 255]
}

/// Create `<root>/<trait_name>/<rarity>/<name>.png` for each `(rarity, name)`.
///
/// Returns the trait directory.
pub fn write_trait(root: &Path, trait_name: &str, variations: &[(u32, &str)]) -> PathBuf {
    let dir = root.join(trait_name);
    for &(rarity, name) in variations {
        let path = dir.join(rarity.to_string()).join(format!("{name}.png"));
        write_png(&path, VARIATION_SIZE, VARIATION_SIZE, color_for(name));
    }
    dir
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a variation by name. Panics if not found.
pub fn find_variation<'a>(t: &'a Trait, name: &str) -> &'a Variation {
    t.variations()
        .iter()
        .find(|v| v.name() == name)
        .unwrap_or_else(|| {
            panic!(
                "variation '{name}' not found in trait '{}'. Available: {:?}",
                t.name(),
                variation_names(t)
            )
        })
}

/// Variation names of a trait, in order.
pub fn variation_names(t: &Trait) -> Vec<&str> {
    t.variations().iter().map(Variation::name).collect()
}
