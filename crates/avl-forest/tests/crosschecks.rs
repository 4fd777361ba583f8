use std::collections::BTreeMap as StdMap;

use avl_forest::AvlMap;
use proptest::prelude::*;

mod common;
use common::*;

proptest! {
    #[test]
    fn random_traces_match_std(trace in ops()) {
        let mut avl = AvlMap::new();
        let mut std = StdMap::new();
        for op in &trace {
            apply(&mut avl, &mut std, op);
            prop_assert!(avl.assert_valid().is_ok(), "{}", avl.print());
        }
        assert_same(&avl, &std);
        assert_height_bound(&avl);
    }

    #[test]
    fn insert_then_remove_everything(keys in prop::collection::btree_set(any::<u16>(), 0..300)) {
        let mut avl: AvlMap<u16, ()> = keys.iter().map(|&k| (k, ())).collect();
        prop_assert!(avl.is_balanced());
        prop_assert_eq!(avl.len(), keys.len());
        for k in &keys {
            prop_assert_eq!(avl.remove(k), Some(()));
        }
        prop_assert!(avl.is_empty());
        prop_assert_eq!(avl.root(), None);
    }

    #[test]
    fn reversed_iteration_matches_std(pairs in prop::collection::vec((0u16..1024, 0u16..1024), 0..256)) {
        let avl: AvlMap<u16, u16> = pairs.iter().copied().collect();
        let std: StdMap<u16, u16> = pairs.iter().copied().collect();
        prop_assert!(avl.iter().rev().eq(std.iter().rev()));
    }
}

#[test]
fn seeded_fuzz_traces() {
    init_tracing();
    for seed in 0..16 {
        let mut fuzzer = TraceFuzzer::new(seed);
        let key_space = fuzzer.random_int(8, 2048);
        let trace = fuzzer.trace(2000, key_space, 0.55);

        let mut avl = AvlMap::new();
        let mut std = StdMap::new();
        for (step, op) in trace.iter().enumerate() {
            apply(&mut avl, &mut std, op);
            if let Err(err) = avl.assert_valid() {
                panic!("seed {} step {step} {op:?}: {err}", fuzzer.seed);
            }
        }
        assert_same(&avl, &std);
        assert_height_bound(&avl);
    }
}

#[test]
fn drain_heavy_trace_empties_the_map() {
    let mut fuzzer = TraceFuzzer::new(0xA5);
    let mut avl = AvlMap::new();
    let mut std = StdMap::new();
    for op in fuzzer.trace(500, 64, 0.9) {
        apply(&mut avl, &mut std, &op);
    }
    for op in fuzzer.trace(4000, 64, 0.05) {
        apply(&mut avl, &mut std, &op);
        avl.assert_valid().unwrap();
    }
    assert_same(&avl, &std);
}
