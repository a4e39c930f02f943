//! chained-hashtable: a single-threaded, separate-chaining hash table over
//! primitive-like keys (text, numbers, big integers, identity symbols).
//!
//! Internal Design:
//!
//! Summary
//! - Goal: amortized O(1) get/put/remove with an explicit, inspectable
//!   collision and growth story.
//! - Layers:
//!   - `hash`: 31-polynomial accumulator over the key's text form in
//!     wrapping `i32` arithmetic; bucket index is the Euclidean remainder.
//!   - `BucketStore<K, V>`: fixed-length array of chains (`Vec<Entry>`);
//!     find/upsert/remove by linear scan of one chain.
//!   - `ResizePolicy` + `rehash`: grow ×2 when `count > capacity * 0.75`;
//!     allocate the new store, move every entry, drop the old store.
//!   - `HashTable<K, V>`: public surface composing the above.
//!
//! Constraints
//! - Keys implement the sealed `PrimitiveKey` trait. Their `Display`
//!   output is what gets hashed; equality is per kind (values for text and
//!   numbers, identity for `Symbol`).
//! - Each entry caches its raw accumulator; rehashing only recomputes the
//!   bucket index and never formats a key again.
//! - Capacity never decreases. Removal does not shrink.
//! - Every mutation takes `&mut self`; there is no interior mutability, so
//!   concurrent use needs an external lock around the whole table.
//!
//! Growth semantics
//! - Checked once after each insertion that created an entry; updates of
//!   an existing key never grow.
//! - Entries are re-placed in old order (bucket 0 first, chain order within
//!   a bucket); that is the effective, not guaranteed, iteration order.
//! - All allocation for a rehash happens before any entry moves. If it
//!   fails, `try_put` withdraws the new entry and returns `TableError`;
//!   `put` panics with the same message.
//!
//! Notes and non-goals
//! - No shrink-on-delete, no ordering guarantee, no serialization.
//! - The hash is not DoS-resistant and is not meant to be.

mod bucket_store;
mod error;
pub mod hash;
mod hash_table;
mod hash_table_proptest;
mod key;
pub mod resize;
mod symbol;

// Public surface
pub use error::TableError;
pub use hash_table::{HashTable, Iter, IterMut};
pub use key::{Number, Primitive, PrimitiveKey};
pub use symbol::Symbol;
