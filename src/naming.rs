//! Name parsing for the trait directory convention.
//!
//! A trait directory holds one subdirectory per rarity level, and each level
//! holds the variation images:
//!
//! ```text
//! traits/background/     # trait "background"
//! ├── 0/                 # rarity 0 (most common)
//! │   ├── sky.png        # variation "sky"
//! │   └── sea.png
//! └── 2/                 # rarity 2
//!     └── gold.leaf.png  # variation "gold" (name stops at the first dot)
//! ```
//!
//! Both helpers here are pure string functions so the discovery code in
//! [`scan`](crate::scan) stays a thin walk over the filesystem.

use std::path::Path;

/// Parse a rarity level from a directory name.
///
/// Only plain decimal digits are accepted:
/// - `"0"` → `Some(0)`
/// - `"12"` → `Some(12)`
/// - `"007"` → `Some(7)`
/// - `"+3"`, `"-1"`, `"rare"`, `""` → `None`
pub fn parse_rarity(name: &str) -> Option<u32> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

/// Derive a variation name from its source file path.
///
/// The name is the file name up to its first `.`:
/// - `traits/tall/0/crown.png` → `"crown"`
/// - `traits/tall/0/crown.v2.png` → `"crown"`
/// - `traits/tall/0/crown` → `"crown"`
pub fn variation_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    file_name
        .split('.')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Derive a trait name from its directory path (the last path component).
pub fn trait_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
