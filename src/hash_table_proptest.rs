#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can check the
// bucket store directly.

use crate::hash::bucket_index;
use crate::hash_table::HashTable;
use crate::resize::ResizePolicy;
use core::num::NonZeroUsize;
use hashbrown::HashMap;
use proptest::prelude::*;
use std::collections::BTreeSet;

// Pool-indexed operations so shrinking moves toward earlier keys.
#[derive(Clone, Debug)]
enum Op {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Mutate(usize, i32),
    Iterate,
}

fn arb_ops(pool_len: usize) -> impl Strategy<Value = Vec<Op>> {
    let idx = 0..pool_len;
    let op = prop_oneof![
        3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Put(i, v)),
        1 => idx.clone().prop_map(Op::Remove),
        1 => idx.clone().prop_map(Op::Get),
        1 => (idx, any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
        1 => Just(Op::Iterate),
    ];
    proptest::collection::vec(op, 1..120)
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<Op>)> {
    (1usize..=20, proptest::collection::vec("[a-zA-Z0-9 ]{0,6}", 1..=40)).prop_flat_map(
        |(initial, pool)| {
            let n = pool.len();
            (Just(initial), Just(pool), arb_ops(n))
        },
    )
}

// Every string built from equal-length blocks "Aa"/"BB" has the same
// accumulator, so the whole pool lands in a single chain.
fn arb_colliding_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<Op>)> {
    let block = prop_oneof![Just("Aa"), Just("BB")];
    let word = proptest::collection::vec(block, 5).prop_map(|bs| bs.concat());
    (1usize..=20, proptest::collection::btree_set(word, 1..=10)).prop_flat_map(|(initial, set)| {
        let pool: Vec<String> = set.into_iter().collect();
        let n = pool.len();
        (Just(initial), Just(pool), arb_ops(n))
    })
}

fn run(initial: usize, pool: &[String], ops: Vec<Op>) -> Result<(), TestCaseError> {
    let initial_nz = NonZeroUsize::new(initial).expect("strategy yields positive capacity");
    let mut sut: HashTable<String, i32> = HashTable::with_capacity(initial_nz);
    let mut model: HashMap<String, i32> = HashMap::new();
    let policy = ResizePolicy::new();
    let mut last_capacity = sut.capacity();

    for op in ops {
        match op {
            Op::Put(i, v) => {
                let k = pool[i].clone();
                let before = sut.len();
                let existed = model.insert(k.clone(), v).is_some();
                sut.put(k, v);
                prop_assert_eq!(sut.len(), if existed { before } else { before + 1 });
            }
            Op::Remove(i) => {
                let k = pool[i].as_str();
                let removed = sut.remove(k);
                prop_assert_eq!(removed, model.remove(k).is_some());
                prop_assert!(sut.get(k).is_none());
            }
            Op::Get(i) => {
                let k = pool[i].as_str();
                prop_assert_eq!(sut.get(k), model.get(k));
                prop_assert_eq!(sut.contains_key(k), model.contains_key(k));
            }
            Op::Mutate(i, d) => {
                let k = pool[i].as_str();
                match (sut.get_mut(k), model.get_mut(k)) {
                    (Some(sv), Some(mv)) => {
                        *sv = sv.wrapping_add(d);
                        *mv = mv.wrapping_add(d);
                    }
                    (None, None) => {}
                    _ => {
                        prop_assert!(false, "presence mismatch for {:?}", k);
                    }
                }
            }
            Op::Iterate => {
                let s: BTreeSet<(String, i32)> =
                    sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                let m: BTreeSet<(String, i32)> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(s, m);
            }
        }

        // Post-conditions after each op
        // 1) count matches chain lengths and the model
        prop_assert_eq!(sut.store_len(), sut.len());
        prop_assert_eq!(sut.len(), model.len());
        // 2) load factor restored
        prop_assert!(sut.len() <= policy.threshold(sut.capacity()));
        // 3) capacity only ever doubles from the initial value
        let capacity = sut.capacity();
        prop_assert!(capacity == last_capacity || capacity == last_capacity * 2);
        prop_assert_eq!(capacity % initial, 0);
        prop_assert!((capacity / initial).is_power_of_two());
        last_capacity = capacity;
        // 4) every entry sits in the bucket its key hashes to
        for (index, k) in sut.iter().map(|(k, _)| (bucket_index(k, capacity), k)) {
            prop_assert!(index < capacity);
            prop_assert_eq!(sut.get(k.as_str()), model.get(k));
        }
    }
    Ok(())
}

// Property: State-machine equivalence against hashbrown::HashMap.
// Invariants exercised across random operation sequences:
// - `put` upserts; `len` grows only when the key was absent.
// - `remove` reports presence; removed keys are absent afterward.
// - `get`/`get_mut`/`contains_key` parity with the model.
// - `iter` yields exactly the model's entries.
// - count == sum of chain lengths; count <= capacity * 0.75 after every op;
//   capacity is initial * 2^n and never decreases.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((initial, pool, ops) in arb_scenario()) {
        run(initial, &pool, ops)?;
    }
}

// Property: Same invariants with every key in one chain, stressing the
// linear scan, in-chain removal and rehash of a long chain.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_single_chain((initial, pool, ops) in arb_colliding_scenario()) {
        let capacity = NonZeroUsize::new(initial).expect("positive").get();
        let first = bucket_index(pool[0].as_str(), capacity);
        for k in &pool {
            prop_assert_eq!(bucket_index(k.as_str(), capacity), first);
        }
        run(initial, &pool, ops)?;
    }
}

// Property: For any key, the bucket index is in range and stable.
proptest! {
    #[test]
    fn prop_bucket_index_in_range(key in ".{0,24}", capacity in 1usize..4096) {
        let index = bucket_index(key.as_str(), capacity);
        prop_assert!(index < capacity);
        prop_assert_eq!(index, bucket_index(key.as_str(), capacity));
    }
}
