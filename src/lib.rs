//! # traitmint
//!
//! Deterministic generator for layered trait images. A set of traits (each a
//! directory of image variations grouped by rarity) is turned into a single
//! composed image per seed: the same seed always yields the same combination
//! and the same pixels.
//!
//! # Architecture: Select, Then Compose
//!
//! ```text
//! 1. Configure   traitmint.toml  →  Engine         (discover traits, build rarity tables)
//! 2. Select      seed            →  [Variation]    (one variation per trait, in trait order)
//! 3. Compose     [Variation]     →  RgbaImage      (overlap or horizontal)
//! ```
//!
//! Configuration happens once; selection and composition run per seed and
//! share no mutable state, so one [`engine::Engine`] serves any number of
//! seeds.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`variation`] | One trait option: name, source path, rarity level |
//! | [`naming`] | Variation names from filenames, rarity levels from directory names |
//! | [`traits`] | A trait's variations, rarity multiplier, and derived [`traits::RarityTable`] |
//! | [`scan`] | Walks a trait directory into ordered `(rarity, path)` entries |
//! | [`select`] | Seed decomposition: which variation each trait picks |
//! | [`imaging`] | Decoding backend, canvas geometry, pixel composition |
//! | [`compositor`] | Applies one [`compositor::CompositionStrategy`] to decoded variations |
//! | [`engine`] | Ordered traits plus a compositor; `select_variants` and `generate` |
//! | [`config`] | `traitmint.toml` loading, merging, validation |
//! | [`audit`] | SHA-256 fingerprints and the per-image JSON generation record |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Rarity as Table Slots
//!
//! A variation at rarity level `r` gets `multiplier^(max_rarity - r)` slots in
//! its trait's rarity table. With the default multiplier of 2, each level is
//! half as likely as the one below it. Tables are stored as cumulative
//! weights, so a trait with many levels never materializes millions of
//! entries.
//!
//! ## Seeds as Digit Groups
//!
//! Each trait reads the low decimal digits of the remaining seed: the
//! residue modulo the table length picks a slot, then as many decimal digits
//! as the table length needs are shifted off for the next trait. Because
//! traits consume digits in configuration order, reordering traits changes
//! every image. A trait with a single variation consumes no digits.
//!
//! ## Filesystem as Data Source
//!
//! Rarity lives in directory names (`background/0/sky.png`,
//! `background/1/sunset.png`), not in a manifest. Directories and files are
//! visited in lexical order, so discovery is reproducible across platforms.

pub mod audit;
pub mod compositor;
pub mod config;
pub mod engine;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod scan;
pub mod select;
pub mod traits;
pub mod variation;

#[cfg(test)]
pub(crate) mod test_helpers;
