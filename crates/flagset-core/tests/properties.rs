//! Property tests for the flag registry.
//!
//! Registry under test: `A=1, B=2, C=4, D=8`, plus a full 128-flag registry
//! for the wide cases.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use flagset_core::formats::{decode_definitions, decode_mask, encode_definitions, encode_mask};
use flagset_core::{FlagError, FlagSet, Flags, Mask};
use proptest::prelude::*;
use proptest::sample::subsequence;

const NAMES: [&str; 4] = ["A", "B", "C", "D"];

fn abcd() -> FlagSet<&'static str> {
    FlagSet::try_new([
        ("A", Mask(1)),
        ("B", Mask(2)),
        ("C", Mask(4)),
        ("D", Mask(8)),
    ])
    .unwrap()
}

fn wide() -> FlagSet<String> {
    FlagSet::from_names((0..Mask::MAX_FLAGS).map(|i| format!("F{i:03}"))).unwrap()
}

/// Any sequence of defined names, with repetition, in any order.
fn name_sequences() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(NAMES.to_vec()), 0..12)
}

fn any_mask() -> impl Strategy<Value = Mask> {
    any::<u128>().prop_map(Mask)
}

// =============================================================================
// MERGE
// =============================================================================

proptest! {
    #[test]
    fn merge_is_order_independent(mut names in name_sequences()) {
        let flags = abcd();
        let forward = flags.merge(&names).unwrap();
        names.reverse();
        prop_assert_eq!(flags.merge(&names).unwrap(), forward);
        names.sort_unstable();
        prop_assert_eq!(flags.merge(&names).unwrap(), forward);
    }

    #[test]
    fn merge_is_idempotent_on_duplicates(names in name_sequences()) {
        let flags = abcd();
        let once = flags.merge(&names).unwrap();
        let twice: Vec<_> = names.iter().chain(names.iter()).copied().collect();
        prop_assert_eq!(flags.merge(&twice).unwrap(), once);
    }

    #[test]
    fn merge_stays_within_defined_bits(names in name_sequences()) {
        let flags = abcd();
        let merged = flags.merge(&names).unwrap();
        prop_assert!(flags.all().contains(merged));
        prop_assert_eq!(flags.unknown_bits(merged), Mask::EMPTY);
    }
}

// =============================================================================
// RESOLVE
// =============================================================================

proptest! {
    #[test]
    fn resolve_inverts_merge(subset in subsequence(NAMES.to_vec(), 0..=NAMES.len())) {
        let flags = abcd();
        let mask = flags.merge(&subset).unwrap();
        let resolved: Vec<&str> = flags.resolve(mask).into_iter().copied().collect();
        // subsequence keeps definition order, so the vectors match exactly
        prop_assert_eq!(resolved, subset);
    }

    #[test]
    fn resolve_ignores_unknown_bits(mask in any_mask()) {
        let flags = abcd();
        let known = mask & flags.all();
        prop_assert_eq!(flags.resolve(mask), flags.resolve(known));
        prop_assert_eq!(flags.merge(flags.resolve(mask)).unwrap(), known);
    }

    #[test]
    fn resolve_inverts_merge_on_wide_registry(mask in any_mask()) {
        let flags = wide();
        let names = flags.resolve(mask);
        prop_assert_eq!(names.len() as u32, mask.count());
        prop_assert_eq!(flags.merge(names).unwrap(), mask);
    }
}

// =============================================================================
// SET ALGEBRA
// =============================================================================

proptest! {
    #[test]
    fn has_matches_and_equality(current in any_mask(), needed in any_mask()) {
        let flags = abcd();
        prop_assert_eq!(
            flags.has(current, needed).unwrap(),
            current & needed == needed
        );
        prop_assert!(flags.has(current, Mask::EMPTY).unwrap());
    }

    #[test]
    fn add_is_union_and_idempotent(x in any_mask(), y in any_mask()) {
        let flags = abcd();
        let once = flags.add(x, y).unwrap();
        prop_assert_eq!(once, x | y);
        prop_assert_eq!(flags.add(once, y).unwrap(), once);
        prop_assert!(flags.has(once, y).unwrap());
    }

    #[test]
    fn remove_and_difference_are_xor(x in any_mask(), y in any_mask()) {
        let flags = abcd();
        prop_assert_eq!(flags.difference(x, y).unwrap(), x ^ y);
        prop_assert_eq!(flags.remove(x, y).unwrap(), x ^ y);
        // toggling twice restores the original
        let toggled = flags.remove(x, y).unwrap();
        prop_assert_eq!(flags.remove(toggled, y).unwrap(), x);
    }

    #[test]
    fn clear_and_missing_are_and_not(x in any_mask(), y in any_mask()) {
        let flags = abcd();
        let cleared = flags.clear(x, y).unwrap();
        prop_assert_eq!(cleared, x & !y);
        prop_assert!(!cleared.intersects(y));
        prop_assert_eq!(flags.missing(x, y).unwrap(), y & !x);
        prop_assert_eq!(flags.missing(x, y).unwrap(), flags.difference(x, y).unwrap() & y);
    }
}

// =============================================================================
// FORMATS
// =============================================================================

proptest! {
    #[test]
    fn mask_encoding_decodes_back(mask in any_mask()) {
        let bytes = encode_mask(mask).unwrap();
        prop_assert!(!bytes.is_empty() && bytes.len() <= 19);
        prop_assert_eq!(decode_mask(&bytes).unwrap(), mask);
    }
}

#[test]
fn wide_snapshot_decodes_back() {
    let flags = wide();
    let bytes = encode_definitions(&flags).unwrap();
    let restored: FlagSet<String> = decode_definitions(&bytes).unwrap();
    assert_eq!(restored, flags);
    assert_eq!(restored.all(), Mask(u128::MAX));
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn fixed_registry_properties() {
    let flags = abcd();

    assert_eq!(flags.merge(Vec::<&str>::new()).unwrap(), Mask::EMPTY);
    assert_eq!(
        flags.merge(["A", "B"]).unwrap(),
        flags.merge(["B", "A"]).unwrap()
    );
    assert!(flags.has(["A", "B"], ["A"]).unwrap());
    assert!(!flags.has(["A"], ["B"]).unwrap());
    assert_eq!(flags.remove(["A", "B"], ["A"]).unwrap(), Mask(2));
    assert_eq!(flags.remove(["A"], ["B"]).unwrap(), Mask(3));
}

#[test]
fn language_scenario() {
    let flags = FlagSet::try_new([
        ("EN", Mask::bit(0)),
        ("FR", Mask::bit(1)),
        ("DE", Mask::bit(2)),
        ("ES", Mask::bit(3)),
        ("IT", Mask::bit(4)),
    ])
    .unwrap();

    let spoken = flags.merge(["EN", "FR", "DE", "EN"]).unwrap();
    assert_eq!(spoken, Mask(7));

    let rest = flags.difference(spoken, Flags::name("EN")).unwrap();
    assert_eq!(rest, Mask(6));
    assert_eq!(flags.resolve(rest), vec![&"FR", &"DE"]);

    assert_eq!(
        flags.merge(["XX"]),
        Err(FlagError::UnknownFlagName {
            name: "XX".to_string()
        })
    );
}
