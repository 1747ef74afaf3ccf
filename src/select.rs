//! Seed decomposition: one integer in, one variation per trait out.
//!
//! The seed's decimal representation is read as a concatenation of
//! variable-width digit groups, lowest group first, one group per trait in
//! trait order. Each group is as wide as the number of decimal digits needed
//! for values up to `L - 1`, where `L` is that trait's rarity table length.
//!
//! For each trait, with `r` the remaining seed value:
//!
//! ```text
//! digit = r mod L              # position in the rarity table
//! r     = (r - digit) / 10^k   # k = ceil(log10(L)), smallest k with 10^k >= L
//! ```
//!
//! The group is used through `mod L` rather than read directly, so values
//! within a group map non-uniformly when `L` is not a power of ten.
//!
//! ## Single-variation traits
//!
//! With `L = 1` the digit is always 0 and `k = 0`, so the remaining value
//! passes through untouched: such a trait neither consumes nor shifts the
//! seed for the traits after it. Adding or removing a one-variation trait
//! therefore never changes what other traits select.
//!
//! ## Exhaustion
//!
//! If the remaining value is 0 when a trait is reached, selection fails with
//! [`SelectError::InvalidSeed`]. Seeds must be large enough to cover every
//! trait's digit group (a final trait with table length 1 still needs a
//! non-zero remainder).

use crate::traits::Trait;
use crate::variation::Variation;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    #[error("Seed {seed} exhausted at trait {trait_index} ('{trait_name}'): remaining value is 0")]
    InvalidSeed {
        seed: u64,
        trait_index: usize,
        trait_name: String,
    },
}

/// The outcome of selection for one trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pick<'a> {
    pub trait_name: &'a str,
    pub variation: &'a Variation,
    /// Index of the chosen variation within its trait.
    pub variation_index: usize,
    /// Position looked up in the rarity table (`remaining mod table_len`).
    pub digit: u64,
    pub table_len: u64,
    pub remaining_before: u64,
    pub remaining_after: u64,
}

/// Number of decimal digits a trait with table length `len` consumes.
///
/// Equal to `ceil(log10(len))`, computed exactly: the smallest `k` with
/// `10^k >= len`. `1 → 0`, `5 → 1`, `10 → 1`, `11 → 2`, `100 → 2`.
pub fn digit_group_width(len: u64) -> u32 {
    let mut width = 0;
    let mut bound: u64 = 1;
    while bound < len {
        width += 1;
        match bound.checked_mul(10) {
            Some(next) => bound = next,
            None => break,
        }
    }
    width
}

/// Advance the remaining seed past one trait: returns `(digit, next_remaining)`.
///
/// `table_len` must be non-zero.
pub fn step(remaining: u64, table_len: u64) -> (u64, u64) {
    let digit = remaining % table_len;
    let shifted = remaining - digit;
    let next = match 10u64.checked_pow(digit_group_width(table_len)) {
        Some(divisor) => shifted / divisor,
        None => 0,
    };
    (digit, next)
}

/// Select one variation per trait for `seed`, in trait order.
pub fn select(seed: u64, traits: &[Trait]) -> Result<Vec<Pick<'_>>, SelectError> {
    let mut remaining = seed;
    let mut picks = Vec::with_capacity(traits.len());

    for (trait_index, t) in traits.iter().enumerate() {
        if remaining == 0 {
            return Err(SelectError::InvalidSeed {
                seed,
                trait_index,
                trait_name: t.name().to_string(),
            });
        }
        let table = t.rarity_table();
        let table_len = table.len();
        let (digit, next) = step(remaining, table_len);
        // Trait construction guarantees a non-empty table, so the lookup and
        // the index are always in range.
        let variation_index = table.get(digit).unwrap_or(0);
        let variation = &t.variations()[variation_index];

        tracing::debug!(
            trait_name = t.name(),
            variation = variation.name(),
            digit,
            table_len,
            remaining,
            "selected variation"
        );

        picks.push(Pick {
            trait_name: t.name(),
            variation,
            variation_index,
            digit,
            table_len,
            remaining_before: remaining,
            remaining_after: next,
        });
        remaining = next;
    }

    Ok(picks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_trait(name: &str, rarities: &[u32], multiplier: u32) -> Trait {
        let variations = rarities
            .iter()
            .enumerate()
            .map(|(i, &r)| Variation::new(format!("{name}{i}"), format!("{name}{i}.png"), r))
            .collect();
        Trait::new(name, variations, multiplier).unwrap()
    }

    /// A trait whose rarity table has exactly `len` equally weighted slots.
    fn flat_trait(name: &str, len: usize) -> Trait {
        make_trait(name, &vec![0; len], 2)
    }

    // =========================================================================
    // Digit group width
    // =========================================================================

    #[test]
    fn width_of_one_is_zero() {
        assert_eq!(digit_group_width(1), 0);
    }

    #[test]
    fn width_below_ten_is_one() {
        assert_eq!(digit_group_width(2), 1);
        assert_eq!(digit_group_width(5), 1);
        assert_eq!(digit_group_width(9), 1);
    }

    #[test]
    fn width_at_powers_of_ten() {
        assert_eq!(digit_group_width(10), 1);
        assert_eq!(digit_group_width(100), 2);
        assert_eq!(digit_group_width(1000), 3);
    }

    #[test]
    fn width_just_past_powers_of_ten() {
        assert_eq!(digit_group_width(11), 2);
        assert_eq!(digit_group_width(101), 3);
    }

    #[test]
    fn width_near_u64_max() {
        assert_eq!(digit_group_width(u64::MAX), 20);
        assert_eq!(step(u64::MAX, u64::MAX), (0, 0));
    }

    // =========================================================================
    // Single step
    // =========================================================================

    #[test]
    fn step_consumes_one_digit_for_short_table() {
        assert_eq!(step(239_487, 5), (2, 23_948));
    }

    #[test]
    fn step_table_of_ten_consumes_one_digit() {
        assert_eq!(step(4_321, 10), (1, 432));
    }

    #[test]
    fn step_table_of_hundred_consumes_two_digits() {
        assert_eq!(step(98_765, 100), (65, 987));
    }

    #[test]
    fn step_table_of_one_consumes_nothing() {
        assert_eq!(step(98_765, 1), (0, 98_765));
    }

    // =========================================================================
    // Selection
    // =========================================================================

    #[test]
    fn two_level_example_selects_by_residue() {
        let traits = vec![make_trait("tall", &[0, 2], 2)];
        for seed in 1..=40u64 {
            let picks = select(seed, &traits).unwrap();
            let expected = if seed % 5 == 4 { 1 } else { 0 };
            assert_eq!(picks[0].variation_index, expected, "seed {seed}");
        }
    }

    #[test]
    fn returns_one_pick_per_trait_in_order() {
        let traits = vec![flat_trait("a", 3), flat_trait("b", 4), flat_trait("c", 2)];
        let picks = select(987_654, &traits).unwrap();
        let names: Vec<&str> = picks.iter().map(|p| p.trait_name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn digit_groups_are_consumed_low_first() {
        // Tables of 10 read the seed one decimal digit at a time.
        let traits = vec![flat_trait("a", 10), flat_trait("b", 10), flat_trait("c", 10)];
        let picks = select(472, &traits).unwrap();
        let indices: Vec<usize> = picks.iter().map(|p| p.variation_index).collect();
        assert_eq!(indices, vec![2, 7, 4]);
        assert_eq!(picks[2].remaining_after, 0);
    }

    #[test]
    fn hundred_slot_table_reads_two_digits() {
        let traits = vec![flat_trait("wide", 100), flat_trait("next", 10)];
        let picks = select(3_457, &traits).unwrap();
        assert_eq!(picks[0].digit, 57);
        assert_eq!(picks[0].remaining_after, 34);
        assert_eq!(picks[1].digit, 4);
    }

    #[test]
    fn single_variation_trait_consumes_no_entropy() {
        let solo = flat_trait("solo", 1);
        for seed in [1u64, 7, 42, 1_000, 123_456_789] {
            let picks = select(seed, std::slice::from_ref(&solo)).unwrap();
            assert_eq!(picks[0].variation_index, 0);
            assert_eq!(picks[0].remaining_before, picks[0].remaining_after);
        }
    }

    #[test]
    fn single_variation_trait_does_not_shift_later_traits() {
        let with_solo = vec![flat_trait("a", 10), flat_trait("solo", 1), flat_trait("b", 10)];
        let without = vec![flat_trait("a", 10), flat_trait("b", 10)];
        let seed = 58;
        let a = select(seed, &with_solo).unwrap();
        let b = select(seed, &without).unwrap();
        assert_eq!(a[2].variation_index, b[1].variation_index);
    }

    #[test]
    fn zero_seed_is_invalid() {
        let traits = vec![flat_trait("a", 3)];
        assert_eq!(
            select(0, &traits).unwrap_err(),
            SelectError::InvalidSeed {
                seed: 0,
                trait_index: 0,
                trait_name: "a".into()
            }
        );
    }

    #[test]
    fn exhausted_seed_names_the_trait() {
        let traits = vec![flat_trait("a", 10), flat_trait("b", 10), flat_trait("c", 10)];
        let err = select(7, &traits).unwrap_err();
        assert!(matches!(
            err,
            SelectError::InvalidSeed { trait_index: 1, ref trait_name, .. } if trait_name == "b"
        ));
    }

    #[test]
    fn selection_is_deterministic() {
        let traits = vec![
            make_trait("bg", &[0, 0, 1], 2),
            make_trait("tall", &[0, 2], 2),
            make_trait("short", &[0, 1, 1, 3], 3),
        ];
        let first = select(239_487, &traits).unwrap();
        let second = select(239_487, &traits).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn no_traits_selects_nothing() {
        assert!(select(5, &[]).unwrap().is_empty());
    }
}
