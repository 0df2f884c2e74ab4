#![cfg(test)]

// Property tests for ChainMap kept inside the crate so they can stress the
// growth machinery without exposing internals.

use crate::chain_map::ChainMap;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    AddAssign(usize, i32),
    Iterate,
    Keys,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Get),
            prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::AddAssign(i, d)),
            Just(OpI::Iterate),
            Just(OpI::Keys),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_scenario<S>(sut: &mut ChainMap<String, i32, S>, pool: &[String], ops: Vec<OpI>) -> Result<(), TestCaseError>
where
    S: BuildHasher,
{
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = pool[i].as_str();
                prop_assert_eq!(sut.put(k, v), model.insert(k.to_string(), v));
            }
            OpI::Remove(i) => {
                let k = pool[i].as_str();
                prop_assert_eq!(sut.remove(k), model.remove(k));
            }
            OpI::Get(i) => {
                let k = pool[i].as_str();
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(s.as_str()), model.contains_key(&s));
            }
            OpI::AddAssign(i, d) => {
                let k = pool[i].as_str();
                match (sut.get_mut(k), model.get_mut(k)) {
                    (Some(a), Some(b)) => {
                        *a = a.saturating_add(d);
                        *b = b.saturating_add(d);
                    }
                    (None, None) => {}
                    _ => prop_assert!(false, "presence mismatch for {:?}", k),
                }
            }
            OpI::Iterate => {
                let seen: BTreeMap<String, i32> =
                    sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                let expected: BTreeMap<String, i32> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(seen, expected);
                // Exactly once: no duplicate keys collapsed by the BTreeMap.
                prop_assert_eq!(sut.iter().count(), model.len());
            }
            OpI::Keys => {
                let keys = sut.keys();
                prop_assert_eq!(keys.len(), model.len());
                let exported: BTreeSet<&String> = keys.into_iter().collect();
                let expected: BTreeSet<&String> = model.keys().collect();
                prop_assert_eq!(exported, expected);
            }
        }

        // Post-conditions after each op.
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.len() <= sut.capacity(), "load factor above 1.0");
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - put returns the previous value exactly when the model replaces.
// - get/remove/contains_key parity with the model, including misses.
// - iter/keys yield each live entry exactly once; sets equal the model's.
// - len/is_empty parity and load factor <= 1.0 after every operation.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: ChainMap<String, i32> = ChainMap::new();
        run_scenario(&mut sut, &pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress chain traversal,
// unlinking, and growth-as-relink in a single bucket.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let mut sut: ChainMap<String, i32, ConstBuildHasher> =
            ChainMap::with_hasher(ConstBuildHasher);
        run_scenario(&mut sut, &pool, ops)?;
    }
}

// Property: bulk distinct insertion far past the initial capacity keeps every
// mapping retrievable and the load factor at or below 1.0.
proptest! {
    #![proptest_config(ProptestConfig { cases: 16, .. ProptestConfig::default() })]
    #[test]
    fn prop_growth_preserves_mappings(n in 101usize..400) {
        let mut sut: ChainMap<String, usize> = ChainMap::new();
        for i in 0..n {
            let k = format!("key-{i}");
            prop_assert_eq!(sut.put(k.as_str(), i), None);
        }
        prop_assert_eq!(sut.len(), n);
        prop_assert!(sut.capacity() >= 200);
        prop_assert!(sut.len() <= sut.capacity());
        for i in 0..n {
            let k = format!("key-{i}");
            prop_assert_eq!(sut.get(k.as_str()), Some(&i));
        }
    }
}
