//! Seed-filler properties
//!
//! The insert strategy is chosen by the caller; these tests pin down the row
//! generation itself: explicit ids are contiguous above the current maximum,
//! auto-increment rows carry no ids, and values stay inside the configured
//! range with two decimals.

use pretty_assertions::assert_eq;
use rand::{rngs::StdRng, SeedableRng};

use tablero::seed::{self, FIRST_NAMES, LAST_NAMES, PROFESSIONS};

#[test]
fn auto_increment_strategy_supplies_no_identifiers() {
    let mut rng = StdRng::seed_from_u64(11);
    let rows = seed::generate_rows(&mut rng, 200, None);

    assert_eq!(rows.len(), 200);
    assert!(rows.iter().all(|r| r.id.is_none()));
}

#[test]
fn explicit_strategy_assigns_a_gapless_block_above_max() {
    let mut rng = StdRng::seed_from_u64(12);
    let current_max = Some(140u64);
    let start = seed::next_id(current_max);
    let rows = seed::generate_rows(&mut rng, 60, Some(start));

    let ids: Vec<u64> = rows.iter().map(|r| r.id.expect("explicit id")).collect();
    let expected: Vec<u64> = (141..=200).collect();
    assert_eq!(ids, expected);
}

#[test]
fn empty_table_block_starts_at_one() {
    assert_eq!(seed::next_id(None), 1);
    assert_eq!(seed::next_id(Some(0)), 1);
}

#[test]
fn generated_fields_stay_inside_the_pools_and_range() {
    let mut rng = StdRng::seed_from_u64(13);
    for row in seed::generate_rows(&mut rng, 300, Some(1)) {
        let (first, last) = row.name.split_once(' ').expect("two-part name");
        assert!(FIRST_NAMES.contains(&first), "unknown first name {first}");
        assert!(LAST_NAMES.contains(&last), "unknown last name {last}");
        assert!(PROFESSIONS.contains(&row.profession.as_str()));

        assert!((1100.0..=3800.0).contains(&row.value));
        let cents = row.value * 100.0;
        assert!((cents - cents.round()).abs() < 1e-6, "{} is not 2dp", row.value);
    }
}

#[test]
fn zero_count_produces_no_rows() {
    let mut rng = StdRng::seed_from_u64(14);
    assert!(seed::generate_rows(&mut rng, 0, Some(5)).is_empty());
    assert!(seed::generate_rows(&mut rng, 0, None).is_empty());
}
