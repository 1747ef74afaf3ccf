//! Traits and their rarity tables.
//!
//! A trait is one axis of visual variation (background, body, hat). Exactly
//! one of its variations appears in every generated image. Which one is
//! decided by the trait's **rarity table**: a weighted sequence of variation
//! indices that a uniformly distributed residue is looked up in.
//!
//! ## Weighting
//!
//! Every variation gets `multiplier ^ (max_rarity - rarity)` slots, where
//! `max_rarity` is the largest rarity present in the trait. With multiplier 2
//! and rarities `0, 0, 1, 2, 4, 4, 6, 8, 9`:
//!
//! ```text
//! rarity   0    0    1    2    4   4   6  8  9
//! weight   512  512  256  128  32  32  8  2  1    (total 1483)
//! ```
//!
//! Rarity 0 is always the most common level present. A trait with a single
//! variation has a table of length 1 whatever its rarity.
//!
//! ## Storage
//!
//! Tables can get long (the multiplier is raised to the rarity spread), so
//! [`RarityTable`] stores cumulative weights and answers positional lookups
//! by binary search. [`RarityTable::indices`] expands the full sequence when
//! it is actually needed.

use crate::variation::Variation;
use std::path::PathBuf;
use thiserror::Error;

/// Rarity multiplier used when a configuration does not specify one.
///
/// A multiplier of 2 makes each rarity level half as likely as the level below it.
pub const DEFAULT_RARITY_MULTIPLIER: u32 = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraitError {
    #[error("Trait '{name}': rarity multiplier must be positive")]
    ZeroMultiplier { name: String },
    #[error("Trait '{name}' has no variations")]
    NoVariations { name: String },
    #[error("Trait '{name}': weights overflow (multiplier {multiplier}, rarity spread {spread})")]
    WeightOverflow {
        name: String,
        multiplier: u32,
        spread: u32,
    },
}

/// Weighted index sequence for one trait.
///
/// Logically the concatenation, in variation order, of each variation index
/// repeated `weight` times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RarityTable {
    /// Running total of weights; `cumulative[i]` is the end (exclusive) of
    /// variation `i`'s run.
    cumulative: Vec<u64>,
}

impl RarityTable {
    /// Total weight, i.e. the number of slots in the table.
    pub fn len(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Variation index stored at `position`, or `None` past the end.
    pub fn get(&self, position: u64) -> Option<usize> {
        if position >= self.len() {
            return None;
        }
        Some(self.cumulative.partition_point(|&end| end <= position))
    }

    /// Weight of the variation at `index`.
    pub fn weight(&self, index: usize) -> Option<u64> {
        let end = *self.cumulative.get(index)?;
        let start = index
            .checked_sub(1)
            .map_or(0, |previous| self.cumulative[previous]);
        Some(end - start)
    }

    /// Per-variation weights, in variation order.
    pub fn weights(&self) -> Vec<u64> {
        let mut previous = 0;
        self.cumulative
            .iter()
            .map(|&end| {
                let weight = end - previous;
                previous = end;
                weight
            })
            .collect()
    }

    /// Expand the table into its full index sequence.
    pub fn indices(&self) -> Vec<usize> {
        self.weights()
            .into_iter()
            .enumerate()
            .flat_map(|(index, weight)| (0..weight).map(move |_| index))
            .collect()
    }
}

/// A trait characteristic of the generated image.
///
/// Immutable after construction: the rarity table is computed once in
/// [`Trait::new`] and always matches the variations it was built from.
#[derive(Debug, Clone)]
pub struct Trait {
    name: String,
    variations: Vec<Variation>,
    rarity_multiplier: u32,
    table: RarityTable,
}

impl Trait {
    /// Build a trait from its variations, validating the multiplier and weights.
    pub fn new(
        name: impl Into<String>,
        variations: Vec<Variation>,
        rarity_multiplier: u32,
    ) -> Result<Self, TraitError> {
        let name = name.into();
        if rarity_multiplier == 0 {
            return Err(TraitError::ZeroMultiplier { name });
        }
        if variations.is_empty() {
            return Err(TraitError::NoVariations { name });
        }
        let table = build_table(&name, &variations, rarity_multiplier)?;
        Ok(Self {
            name,
            variations,
            rarity_multiplier,
            table,
        })
    }

    /// Build a trait from discovered `(rarity, path)` entries, in entry order.
    pub fn from_entries(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (u32, PathBuf)>,
        rarity_multiplier: u32,
    ) -> Result<Self, TraitError> {
        let variations = entries
            .into_iter()
            .map(|(rarity, path)| Variation::from_path(path, rarity))
            .collect();
        Self::new(name, variations, rarity_multiplier)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variations(&self) -> &[Variation] {
        &self.variations
    }

    pub fn rarity_multiplier(&self) -> u32 {
        self.rarity_multiplier
    }

    /// Highest rarity value among this trait's variations.
    pub fn max_rarity(&self) -> u32 {
        max_rarity(&self.variations)
    }

    pub fn rarity_table(&self) -> &RarityTable {
        &self.table
    }

    /// Weight of the variation at `index`.
    pub fn weight_of(&self, index: usize) -> Option<u64> {
        self.table.weight(index)
    }
}

fn max_rarity(variations: &[Variation]) -> u32 {
    variations.iter().map(Variation::rarity).max().unwrap_or(0)
}

fn build_table(
    name: &str,
    variations: &[Variation],
    multiplier: u32,
) -> Result<RarityTable, TraitError> {
    let max = max_rarity(variations);
    let overflow = || TraitError::WeightOverflow {
        name: name.to_string(),
        multiplier,
        spread: max - variations.iter().map(Variation::rarity).min().unwrap_or(0),
    };

    let mut cumulative = Vec::with_capacity(variations.len());
    let mut total: u64 = 0;
    for variation in variations {
        let weight = u64::from(multiplier)
            .checked_pow(max - variation.rarity())
            .ok_or_else(overflow)?;
        total = total.checked_add(weight).ok_or_else(overflow)?;
        cumulative.push(total);
    }
    Ok(RarityTable { cumulative })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trait_with_rarities(rarities: &[u32], multiplier: u32) -> Trait {
        let variations = rarities
            .iter()
            .enumerate()
            .map(|(i, &r)| Variation::new(format!("v{i}"), format!("v{i}.png"), r))
            .collect();
        Trait::new("test", variations, multiplier).unwrap()
    }

    #[test]
    fn two_level_example_table() {
        let t = trait_with_rarities(&[0, 2], 2);
        assert_eq!(t.rarity_table().len(), 5);
        assert_eq!(t.rarity_table().indices(), vec![0, 0, 0, 0, 1]);
    }

    #[test]
    fn documented_weights_for_sparse_rarities() {
        let t = trait_with_rarities(&[0, 0, 1, 2, 4, 4, 6, 8, 9], 2);
        assert_eq!(
            t.rarity_table().weights(),
            vec![512, 512, 256, 128, 32, 32, 8, 2, 1]
        );
        assert_eq!(t.rarity_table().len(), 1483);
        assert_eq!(t.max_rarity(), 9);
    }

    #[test]
    fn length_equals_sum_of_weights() {
        for (rarities, multiplier) in [
            (vec![0, 1, 2], 3),
            (vec![3, 3, 1], 2),
            (vec![0, 5], 4),
            (vec![2], 10),
        ] {
            let t = trait_with_rarities(&rarities, multiplier);
            let max = *rarities.iter().max().unwrap();
            let expected: u64 = rarities
                .iter()
                .map(|&r| u64::from(multiplier).pow(max - r))
                .sum();
            assert_eq!(t.rarity_table().len(), expected);
            assert_eq!(t.rarity_table().indices().len() as u64, expected);
        }
    }

    #[test]
    fn every_index_appears() {
        let t = trait_with_rarities(&[0, 3, 1, 3, 0], 3);
        let indices = t.rarity_table().indices();
        for i in 0..t.variations().len() {
            assert!(indices.contains(&i), "index {i} missing");
        }
        assert!(t.rarity_table().len() >= t.variations().len() as u64);
    }

    #[test]
    fn single_variation_has_length_one() {
        let t = trait_with_rarities(&[7], 5);
        assert_eq!(t.rarity_table().len(), 1);
        assert_eq!(t.rarity_table().indices(), vec![0]);
    }

    #[test]
    fn multiplier_one_weights_everything_equally() {
        let t = trait_with_rarities(&[0, 4, 9], 1);
        assert_eq!(t.rarity_table().weights(), vec![1, 1, 1]);
    }

    #[test]
    fn lookup_matches_expansion() {
        let t = trait_with_rarities(&[1, 0, 2, 0], 2);
        let table = t.rarity_table();
        let expanded = table.indices();
        for (position, &index) in expanded.iter().enumerate() {
            assert_eq!(table.get(position as u64), Some(index));
        }
        assert_eq!(table.get(table.len()), None);
    }

    #[test]
    fn weight_of_reports_per_variation_weight() {
        let t = trait_with_rarities(&[0, 2], 2);
        assert_eq!(t.weight_of(0), Some(4));
        assert_eq!(t.weight_of(1), Some(1));
        assert_eq!(t.weight_of(2), None);
    }

    #[test]
    fn single_weight_lookup_matches_weights() {
        let t = trait_with_rarities(&[0, 0, 1, 2, 4, 4, 6, 8, 9], 2);
        let table = t.rarity_table();
        let each: Vec<u64> = (0..9).map(|i| table.weight(i).unwrap()).collect();
        assert_eq!(each, table.weights());
        assert_eq!(table.weight(9), None);
    }

    #[test]
    fn zero_multiplier_rejected() {
        let err = Trait::new("hat", vec![Variation::new("a", "a.png", 0)], 0).unwrap_err();
        assert_eq!(
            err,
            TraitError::ZeroMultiplier {
                name: "hat".into()
            }
        );
    }

    #[test]
    fn empty_trait_rejected() {
        let err = Trait::new("hat", Vec::new(), 2).unwrap_err();
        assert_eq!(err, TraitError::NoVariations { name: "hat".into() });
    }

    #[test]
    fn overflowing_weights_rejected() {
        let variations = vec![
            Variation::new("common", "a.png", 0),
            Variation::new("mythic", "b.png", 70),
        ];
        let err = Trait::new("hat", variations, 2).unwrap_err();
        assert!(matches!(
            err,
            TraitError::WeightOverflow {
                multiplier: 2,
                spread: 70,
                ..
            }
        ));
    }

    #[test]
    fn from_entries_keeps_entry_order() {
        let t = Trait::from_entries(
            "tall",
            vec![(2, PathBuf::from("b/2/z.png")), (0, PathBuf::from("b/0/a.png"))],
            2,
        )
        .unwrap();
        let names: Vec<&str> = t.variations().iter().map(Variation::name).collect();
        assert_eq!(names, vec!["z", "a"]);
        assert_eq!(t.rarity_table().indices(), vec![0, 1, 1, 1, 1]);
    }
}
