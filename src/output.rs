//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Every entity (trait, variation, pick) leads with a positional index and
//! its name; filesystem paths follow as indented `Source:` lines. The output
//! reads as an inventory first and a file listing second.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Traits
//! 001 background (3 variations, max rarity 1, multiplier 2, table 5)
//!     001 sky [rarity 0, weight 2]
//!         Source: traits/background/0/sky.png
//!     002 sunset [rarity 1, weight 1]
//!         Source: traits/background/1/sunset.png
//! ```
//!
//! ## Select
//!
//! ```text
//! Seed 239487
//! 001 background → sea (slot 2 of 5)
//!     Source: traits/background/0/sea.png
//! 002 tall → hat (slot 3 of 5)
//!     Source: traits/tall/0/hat.png
//! ```
//!
//! ## Generate
//!
//! ```text
//! Generated 239487 → generated/239487.png (8x8, overlap)
//!     Record: generated/239487.json
//!     Pixels: 3f2a…
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::audit::GenerationRecord;
use crate::select::Pick;
use crate::traits::Trait;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the discovered traits and their variations.
pub fn format_traits(traits: &[Trait]) -> Vec<String> {
    let mut lines = vec!["Traits".to_string()];

    for (i, t) in traits.iter().enumerate() {
        lines.push(format!(
            "{} {} ({}, max rarity {}, multiplier {}, table {})",
            format_index(i + 1),
            t.name(),
            plural(t.variations().len(), "variation"),
            t.max_rarity(),
            t.rarity_multiplier(),
            t.rarity_table().len()
        ));
        for (j, variation) in t.variations().iter().enumerate() {
            lines.push(format!(
                "{}{} {} [rarity {}, weight {}]",
                indent(1),
                format_index(j + 1),
                variation.name(),
                variation.rarity(),
                t.weight_of(j).unwrap_or(0)
            ));
            lines.push(format!(
                "{}Source: {}",
                indent(2),
                variation.path().display()
            ));
        }
    }

    lines
}

/// Print the trait inventory to stdout.
pub fn print_traits(traits: &[Trait]) {
    for line in format_traits(traits) {
        println!("{}", line);
    }
}

// ============================================================================
// Select output
// ============================================================================

/// Format the per-trait selection for a seed.
pub fn format_selection(seed: u64, picks: &[Pick<'_>]) -> Vec<String> {
    let mut lines = vec![format!("Seed {}", seed)];
    for (i, pick) in picks.iter().enumerate() {
        lines.push(format!(
            "{} {} → {} (slot {} of {})",
            format_index(i + 1),
            pick.trait_name,
            pick.variation.name(),
            pick.digit,
            pick.table_len
        ));
        lines.push(format!(
            "{}Source: {}",
            indent(1),
            pick.variation.path().display()
        ));
    }
    lines
}

/// Print the selection to stdout.
pub fn print_selection(seed: u64, picks: &[Pick<'_>]) {
    for line in format_selection(seed, picks) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

/// Format the result of generating one image.
///
/// `record_path` is `None` when the audit record was skipped.
pub fn format_generate_output(
    record: &GenerationRecord,
    image_path: &Path,
    record_path: Option<&Path>,
) -> Vec<String> {
    let mut lines = vec![format!(
        "Generated {} → {} ({}x{}, {})",
        record.seed,
        image_path.display(),
        record.width,
        record.height,
        record.composition
    )];
    if let Some(path) = record_path {
        lines.push(format!("{}Record: {}", indent(1), path.display()));
    }
    lines.push(format!("{}Pixels: {}", indent(1), record.pixels_sha256));
    lines
}

/// Print the generate result to stdout.
pub fn print_generate_output(
    record: &GenerationRecord,
    image_path: &Path,
    record_path: Option<&Path>,
) {
    for line in format_generate_output(record, image_path, record_path) {
        println!("{}", line);
    }
}
