// HashTable unit test suite (public API only).
//
// Each test documents what behavior is being verified and which
// invariants are assumed or asserted. The core invariants exercised:
// - Round-trip: put(k, v) then get(k) yields v.
// - Uniqueness: re-putting a key updates in place; len counts it once.
// - Deletion: remove reports presence exactly once.
// - Growth: 16 buckets hold 12 entries; the 13th doubles to 32.
// - Collisions: keys sharing a bucket stay independent.
// - Bucket range: negative accumulators still map into [0, capacity).
use chained_hashtable::hash::{bucket_index, hash_key};
use chained_hashtable::resize::{ResizePolicy, DEFAULT_CAPACITY, LOAD_FACTOR};
use chained_hashtable::{HashTable, Number, Primitive, Symbol, TableError};
use std::num::NonZeroUsize;
use std::rc::Rc;
use test_log::test;

// Test: round-trip across every key kind.
// Verifies: each kind stores and returns its own value.
#[test]
fn round_trip_every_kind() {
    let mut text: HashTable<String, i32> = HashTable::new();
    text.put("alpha".to_string(), 1);
    assert_eq!(text.get("alpha"), Some(&1));

    let mut numbers: HashTable<Number, &str> = HashTable::new();
    numbers.put(Number::new(1.5), "one and a half");
    numbers.put(Number::new(f64::NAN), "nan");
    numbers.put(Number::new(-0.0), "zero");
    assert_eq!(numbers.get(&Number::new(1.5)), Some(&"one and a half"));
    assert_eq!(numbers.get(&Number::new(f64::NAN)), Some(&"nan"));
    assert_eq!(numbers.get(&Number::new(0.0)), Some(&"zero"));
    assert_eq!(numbers.len(), 3);

    let mut bigs: HashTable<i128, u8> = HashTable::new();
    bigs.put(i128::MAX, 1);
    bigs.put(i128::MIN, 2);
    assert_eq!(bigs.get(&i128::MAX), Some(&1));
    assert_eq!(bigs.get(&i128::MIN), Some(&2));

    let mut symbols: HashTable<Symbol, u8> = HashTable::new();
    let s = Symbol::new("token");
    symbols.put(s.clone(), 7);
    assert_eq!(symbols.get(&s), Some(&7));
    assert_eq!(symbols.get(&Symbol::new("token")), None);

    let mut shared: HashTable<Rc<str>, u8> = HashTable::new();
    shared.put(Rc::from("rc"), 3);
    assert_eq!(shared.get("rc"), Some(&3));
}

// Test: key independence regardless of insertion order.
// Verifies: get(k1) == v1 and get(k2) == v2 in both orders.
#[test]
fn key_independence() {
    for order in [["k1", "k2"], ["k2", "k1"]] {
        let mut t: HashTable<&str, &str> = HashTable::new();
        for k in order {
            t.put(k, if k == "k1" { "v1" } else { "v2" });
        }
        assert_eq!(t.get("k1"), Some(&"v1"));
        assert_eq!(t.get("k2"), Some(&"v2"));
    }
}

// Test: upsert idempotence.
// Assumes: len counts stored entries.
// Verifies: the second identical put leaves one entry.
#[test]
fn upsert_is_idempotent() {
    let mut t: HashTable<String, i32> = HashTable::new();
    t.put("k".to_string(), 5);
    assert_eq!(t.len(), 1);
    t.put("k".to_string(), 5);
    assert_eq!(t.len(), 1);
    assert_eq!(t.iter().count(), 1);
}

// Test: deletion.
// Verifies: remove true once, then false; get absent afterward.
#[test]
fn deletion() {
    let mut t: HashTable<u32, &str> = HashTable::new();
    t.put(4, "four");
    assert!(t.remove(&4));
    assert_eq!(t.get(&4), None);
    assert!(!t.remove(&4));
    assert!(!t.remove(&5));
    assert!(t.is_empty());
}

// Test: growth preserves data.
// Assumes: default capacity 16, threshold 12.
// Verifies: 13 keys grow the table to 32; count and values survive.
#[test]
fn growth_preserves_data() {
    assert_eq!(DEFAULT_CAPACITY, 16);
    assert_eq!(LOAD_FACTOR, 0.75);
    let mut t: HashTable<String, usize> = HashTable::new();
    for i in 0..13 {
        t.put(format!("item-{i}"), i * 10);
        let expected = if i < 12 { 16 } else { 32 };
        assert_eq!(t.capacity(), expected, "after {} inserts", i + 1);
    }
    assert_eq!(t.len(), 13);
    for i in 0..13 {
        assert_eq!(t.get(format!("item-{i}").as_str()), Some(&(i * 10)));
    }
    assert!(t.load_factor() <= LOAD_FACTOR);
}

// Test: growth across many doublings from a custom initial capacity.
// Verifies: capacity stays initial * 2^n, load factor never exceeds 0.75.
#[test]
fn growth_from_custom_capacity() {
    let mut t: HashTable<u64, u64> = HashTable::with_capacity(NonZeroUsize::new(5).unwrap());
    let policy = ResizePolicy::new();
    for i in 0..1_000u64 {
        t.put(i, i * i);
        assert!(t.len() <= policy.threshold(t.capacity()));
    }
    assert_eq!(t.capacity(), 5 * 512);
    assert!((0..1_000u64).all(|i| t.get(&i) == Some(&(i * i))));
}

// Test: collision handling.
// Assumes: "Aa" and "BB" share an accumulator under the 31-polynomial.
// Verifies: both retrievable; removing one leaves the other intact.
#[test]
fn collision_handling() {
    assert_eq!(hash_key("Aa"), hash_key("BB"));
    let mut t: HashTable<String, i32> = HashTable::new();
    t.put("Aa".to_string(), 1);
    t.put("BB".to_string(), 2);
    let index = bucket_index("Aa", t.capacity());
    assert_eq!(t.bucket_len(index), 2);
    assert!(t.remove("BB"));
    assert_eq!(t.get("Aa"), Some(&1));
    assert_eq!(t.get("BB"), None);
}

// Test: symbols with the same description collide but stay distinct.
// Verifies: identity equality for symbol keys.
#[test]
fn symbol_collisions_are_identity_resolved() {
    let a = Symbol::new("dup");
    let b = Symbol::new("dup");
    let mut t: HashTable<Symbol, &str> = HashTable::new();
    t.put(a.clone(), "a");
    t.put(b.clone(), "b");
    assert_eq!(t.len(), 2);
    assert_eq!(t.bucket_len(bucket_index(&a, t.capacity())), 2);
    assert!(t.remove(&a));
    assert_eq!(t.get(&b), Some(&"b"));
    assert_eq!(t.get(&a), None);
}

// Test: negative-modulo regression.
// Assumes: "hello world!" folds to a negative accumulator.
// Verifies: its bucket index is non-negative and in range; round-trip works.
#[test]
fn negative_accumulator_bucket_in_range() {
    let hash = hash_key("hello world!");
    assert!(hash < 0);
    for capacity in [1usize, 3, 10, 16, 32, 1000] {
        assert!(bucket_index("hello world!", capacity) < capacity);
    }
    let mut t: HashTable<String, ()> = HashTable::new();
    t.put("hello world!".to_string(), ());
    assert!(t.contains_key("hello world!"));
}

// Test: heterogeneous keys through `Primitive`.
// Verifies: equal text, different kind => separate entries.
#[test]
fn primitive_kinds_are_distinct_keys() {
    let mut t: HashTable<Primitive, i32> = HashTable::new();
    t.put(Primitive::from("10"), 1);
    t.put(Primitive::from(10), 2);
    t.put(Primitive::from(10i64), 3);
    assert_eq!(t.len(), 3);
    assert_eq!(t.get(&Primitive::from("10")), Some(&1));
    assert_eq!(t.get(&Primitive::from(10.0)), Some(&2));
    assert_eq!(t.get(&Primitive::from(10i128)), Some(&3));
}

// Test: collect/extend go through put.
// Verifies: later duplicates overwrite earlier ones.
#[test]
fn from_iterator_upserts() {
    let t: HashTable<&str, i32> = [("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
    assert_eq!(t.len(), 2);
    assert_eq!(t.get("a"), Some(&3));
}

// Test: fallible insertion on the happy path.
// Verifies: try_put behaves like put when growth succeeds.
#[test]
fn try_put_happy_path() -> Result<(), TableError> {
    let mut t: HashTable<u32, u32> =
        HashTable::try_with_capacity(NonZeroUsize::new(2).unwrap())?;
    for i in 0..50 {
        t.try_put(i, i)?;
    }
    assert_eq!(t.len(), 50);
    assert_eq!(t.capacity(), 128);
    Ok(())
}
