//! ResizePolicy: when to grow, and the allocate-new/move/drop-old rehash.
//!
//! Growth is checked once after every insertion that created an entry:
//! the table doubles as soon as `count > capacity * 0.75`. The threshold is
//! evaluated as `count * 4 > capacity * 3` so no float rounding applies.

use crate::bucket_store::BucketStore;
use crate::error::TableError;
use core::mem;

pub const DEFAULT_CAPACITY: usize = 16;
pub const LOAD_FACTOR: f64 = 0.75;
pub const GROWTH_FACTOR: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizePolicy {
    numerator: u128,
    denominator: u128,
    growth: usize,
}

impl ResizePolicy {
    pub const fn new() -> Self {
        Self {
            numerator: 3,
            denominator: 4,
            growth: GROWTH_FACTOR,
        }
    }

    #[cfg(test)]
    pub(crate) const fn with_growth(growth: usize) -> Self {
        Self {
            numerator: 3,
            denominator: 4,
            growth,
        }
    }

    pub fn load_factor(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Largest entry count `capacity` buckets may hold without growing.
    pub fn threshold(&self, capacity: usize) -> usize {
        (capacity as u128 * self.numerator / self.denominator) as usize
    }

    #[inline]
    pub fn should_grow(&self, count: usize, capacity: usize) -> bool {
        count as u128 * self.denominator > capacity as u128 * self.numerator
    }

    pub fn grown_capacity(&self, capacity: usize) -> Result<usize, TableError> {
        capacity
            .checked_mul(self.growth)
            .ok_or(TableError::CapacityOverflow { capacity })
    }
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace `store` with one of the grown capacity holding the same entries.
///
/// Every allocation happens before the first entry moves, so on error the
/// old store is untouched. Entries are re-placed bucket 0 first, chain
/// order within each bucket; that becomes the new chain order.
pub(crate) fn rehash<K, V>(
    store: &mut BucketStore<K, V>,
    policy: &ResizePolicy,
) -> Result<usize, TableError> {
    let new_capacity = policy.grown_capacity(store.bucket_count())?;
    let alloc_failed = |source| TableError::AllocFailed {
        buckets: new_capacity,
        source,
    };

    let mut next = BucketStore::try_with_buckets(new_capacity).map_err(alloc_failed)?;
    next.try_reserve_for(store.hashes()).map_err(alloc_failed)?;

    let old = mem::replace(store, next);
    for entry in old.into_entries() {
        store.append(entry);
    }
    Ok(new_capacity)
}
