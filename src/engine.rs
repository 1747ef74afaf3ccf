//! The generator: ordered traits plus one compositor.
//!
//! ```text
//! GeneratorConfig ──from_config──▶ Engine
//!                                    │
//!          seed ──select_variants────┤  one Variation per trait (select.rs)
//!                                    │
//!          seed ──generate───────────┘  select, then Compositor::compose
//! ```
//!
//! An engine is built once and reused for any number of seeds. It holds no
//! mutable state, so a shared reference can serve concurrent callers.

use crate::compositor::{ComposeError, Composition, CompositionStrategy, Compositor};
use crate::config::{GeneratorConfig, TraitConfig};
use crate::imaging::{ImageBackend, RustBackend};
use crate::scan::{self, ScanError};
use crate::select::{self, Pick, SelectError};
use crate::traits::Trait;
use crate::variation::Variation;
use image::RgbaImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Scan(#[from] ScanError),
    #[error("Selection error: {0}")]
    Select(#[from] SelectError),
    #[error("Composition error: {0}")]
    Compose(#[from] ComposeError),
}

/// Selects variations for a seed and composes them.
pub struct Engine<B: ImageBackend = RustBackend> {
    traits: Vec<Trait>,
    compositor: Compositor<B>,
}

impl Engine<RustBackend> {
    /// Build an engine from configuration, discovering every trait directory.
    ///
    /// Fails on the first trait that cannot be loaded; no partially
    /// configured engine is returned.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, EngineError> {
        let traits = load_traits(&config.traits)?;
        tracing::info!(
            traits = traits.len(),
            composition = %config.composition,
            "engine ready"
        );
        Ok(Self::new(traits, config.composition))
    }

    pub fn new(traits: Vec<Trait>, strategy: CompositionStrategy) -> Self {
        Self::with_compositor(traits, Compositor::new(strategy))
    }
}

impl<B: ImageBackend> Engine<B> {
    /// Build an engine around a specific compositor (allows testing with mock).
    pub fn with_compositor(traits: Vec<Trait>, compositor: Compositor<B>) -> Self {
        Self { traits, compositor }
    }

    pub fn traits(&self) -> &[Trait] {
        &self.traits
    }

    pub fn strategy(&self) -> CompositionStrategy {
        self.compositor.strategy()
    }

    /// Per-trait selection details for `seed`.
    pub fn select(&self, seed: u64) -> Result<Vec<Pick<'_>>, SelectError> {
        select::select(seed, &self.traits)
    }

    /// One variation per trait for `seed`, in trait order.
    pub fn select_variants(&self, seed: u64) -> Result<Vec<&Variation>, SelectError> {
        Ok(self.select(seed)?.into_iter().map(|p| p.variation).collect())
    }

    /// Select variations for `seed` and compose them into one image.
    pub fn generate(&self, seed: u64) -> Result<RgbaImage, EngineError> {
        let variations = self.select_variants(seed)?;
        Ok(self.compositor.compose(&variations)?.image)
    }

    /// Like [`generate`](Self::generate), also returning the selection details
    /// and the fingerprints of the sources that were decoded.
    pub fn generate_with_picks(
        &self,
        seed: u64,
    ) -> Result<(Vec<Pick<'_>>, Composition), EngineError> {
        let picks = self.select(seed)?;
        let variations: Vec<&Variation> = picks.iter().map(|p| p.variation).collect();
        let composition = self.compositor.compose(&variations)?;
        Ok((picks, composition))
    }
}

/// Load every configured trait, in configuration order.
pub fn load_traits(configs: &[TraitConfig]) -> Result<Vec<Trait>, ScanError> {
    configs
        .iter()
        .map(|tc| scan::load_trait(&tc.path, tc.rarity_multiplier))
        .collect()
}
