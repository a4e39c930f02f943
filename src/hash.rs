//! Hash function: 31-polynomial over a key's canonical text.
//!
//! `acc = acc * 31 + unit` for each UTF-16 code unit, in wrapping `i32`
//! arithmetic. The accumulator may end up negative, so bucket selection
//! uses the Euclidean remainder and always lands in `[0, capacity)`.

use crate::key::PrimitiveKey;
use core::fmt::{self, Write};

const MULTIPLIER: i32 = 0x1f;

/// Streaming polynomial accumulator. Implements `fmt::Write` so a key's
/// `Display` output is folded without an intermediate `String`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PolyHasher {
    acc: i32,
}

impl PolyHasher {
    pub const fn new() -> Self {
        Self { acc: 0 }
    }

    #[inline]
    pub fn update(&mut self, text: &str) {
        for unit in text.encode_utf16() {
            self.acc = self
                .acc
                .wrapping_mul(MULTIPLIER)
                .wrapping_add(i32::from(unit));
        }
    }

    pub fn finish(&self) -> i32 {
        self.acc
    }
}

impl Write for PolyHasher {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.update(s);
        Ok(())
    }
}

/// Raw (signed) accumulator for `key`.
pub fn hash_key<Q>(key: &Q) -> i32
where
    Q: ?Sized + PrimitiveKey,
{
    let mut hasher = PolyHasher::new();
    // The accumulator never fails; an error could only come from the key's
    // own formatting, and every key type here formats infallibly.
    let _ = write!(hasher, "{key}");
    hasher.finish()
}

/// Bucket index for an already computed accumulator.
#[inline]
pub fn index_for_hash(hash: i32, capacity: usize) -> usize {
    debug_assert!(capacity > 0, "bucket store must have at least one bucket");
    i128::from(hash).rem_euclid(capacity as i128) as usize
}

/// Bucket index of `key` in a table with `capacity` buckets.
pub fn bucket_index<Q>(key: &Q, capacity: usize) -> usize
where
    Q: ?Sized + PrimitiveKey,
{
    index_for_hash(hash_key(key), capacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Number;
    use crate::symbol::Symbol;

    /// Invariant: Known accumulator values for short strings.
    #[test]
    fn known_values() {
        assert_eq!(hash_key(""), 0);
        assert_eq!(hash_key("a"), 97);
        assert_eq!(hash_key("hello"), 99_162_322);
        assert_eq!(bucket_index("hello", 16), 2);
        assert_eq!(bucket_index("hello", 32), 18);
    }

    /// Invariant: Keys are hashed through their text form, whatever the kind.
    #[test]
    fn hashes_follow_text_form() {
        assert_eq!(hash_key(&Number::new(5.0)), hash_key("5"));
        assert_eq!(hash_key(&5i64), hash_key("5"));
        assert_eq!(hash_key(&Symbol::new("x")), hash_key("Symbol(x)"));
        assert_eq!(hash_key(&String::from("k0")), hash_key("k0"));
    }

    /// Invariant: Overflow wraps; a negative accumulator still maps into
    /// `[0, capacity)`.
    #[test]
    fn negative_accumulator_maps_into_range() {
        let h = hash_key("hello world!");
        assert_eq!(h, -217_287_203);
        assert_eq!(h % 16, -3, "truncating remainder would go negative");
        assert_eq!(bucket_index("hello world!", 16), 13);
        assert_eq!(bucket_index("hello world!", 10), 7);
        assert_eq!(index_for_hash(i32::MIN, 16), 0);
        assert_eq!(index_for_hash(-1, 16), 15);
    }

    /// Invariant: Classic 31-polynomial collision pair lands in one bucket
    /// at every capacity.
    #[test]
    fn colliding_pair() {
        assert_eq!(hash_key("Aa"), hash_key("BB"));
        for capacity in [1, 7, 16, 32, 1024] {
            assert_eq!(bucket_index("Aa", capacity), bucket_index("BB", capacity));
        }
    }

    /// Invariant: Characters outside the BMP fold as two UTF-16 code units.
    #[test]
    fn surrogate_pairs() {
        let (hi, lo) = (0xD83Du16, 0xDE00u16);
        let folded = (i32::from(hi)).wrapping_mul(31).wrapping_add(i32::from(lo));
        assert_eq!(hash_key("\u{1F600}"), folded);
        assert_eq!(hash_key("\u{1F600}"), 1_772_899);
    }
}
