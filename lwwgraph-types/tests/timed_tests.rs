use lwwgraph_types::{TimedValue, Timestamp};
use std::cmp::Ordering;
use std::collections::HashSet;

fn ts(t: i64) -> Timestamp {
    Timestamp::new(t)
}

// ── Construction ─────────────────────────────────────────────────

#[test]
fn new_keeps_value_and_timestamp() {
    let tv = TimedValue::new("a", ts(5));
    assert_eq!(*tv.value(), "a");
    assert_eq!(tv.timestamp(), ts(5));
}

#[test]
fn now_uses_the_default_clock() {
    let before = Timestamp::now();
    let tv = TimedValue::now(1u64);
    assert!(tv.timestamp() > before);
}

#[test]
fn into_parts_splits() {
    let (value, time) = TimedValue::new(String::from("x"), ts(3)).into_parts();
    assert_eq!(value, "x");
    assert_eq!(time, ts(3));
}

// ── Identity ─────────────────────────────────────────────────────

#[test]
fn equality_ignores_timestamp() {
    assert_eq!(TimedValue::new(1, ts(1)), TimedValue::new(1, ts(99)));
    assert_ne!(TimedValue::new(1, ts(1)), TimedValue::new(2, ts(1)));
}

#[test]
fn hash_ignores_timestamp() {
    let mut set = HashSet::new();
    set.insert(TimedValue::new("v", ts(1)));
    set.insert(TimedValue::new("v", ts(2)));
    assert_eq!(set.len(), 1);
}

// ── Recency ──────────────────────────────────────────────────────

#[test]
fn cmp_timestamp_ignores_values() {
    let early = TimedValue::new(9, ts(1));
    let late = TimedValue::new(0, ts(2));
    assert_eq!(early.cmp_timestamp(&late), Ordering::Less);
    assert_eq!(late.cmp_timestamp(&early), Ordering::Greater);
    assert!(late.is_newer_than(&early));
    assert!(!early.is_newer_than(&late));
}

#[test]
fn same_time_different_values_tie_on_recency_but_stay_distinct() {
    let a = TimedValue::new(1, ts(4));
    let b = TimedValue::new(2, ts(4));
    assert_eq!(a.cmp_timestamp(&b), Ordering::Equal);
    assert!(!a.is_newer_than(&b));
    assert!(!b.is_newer_than(&a));
    assert_ne!(a, b);
}

#[test]
fn same_value_at_different_times_is_equal_but_not_a_tie() {
    let a = TimedValue::new(1, ts(4));
    let c = TimedValue::new(1, ts(9));
    assert_eq!(a, c);
    assert_eq!(a.cmp_timestamp(&c), Ordering::Less);
    assert!(c.is_newer_than(&a));
}

#[test]
fn latest_is_picked_with_cmp_timestamp() {
    let values = [
        TimedValue::new("b", ts(3)),
        TimedValue::new("c", ts(7)),
        TimedValue::new("a", ts(5)),
    ];
    let latest = values.iter().max_by(|x, y| x.cmp_timestamp(y)).unwrap();
    assert_eq!(*latest.value(), "c");
}

// ── Display ──────────────────────────────────────────────────────

#[test]
fn display_renders_value_and_time() {
    assert_eq!(TimedValue::new("n", ts(7)).to_string(), "Timed[\"n\" @ 7]");
}
