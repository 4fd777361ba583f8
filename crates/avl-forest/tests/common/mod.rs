#![allow(dead_code)]

use std::collections::BTreeMap as StdMap;
use std::sync::Once;

use avl_forest::AvlMap;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// One mutation in a randomized trace.
#[derive(Clone, Debug)]
pub enum Op {
    Insert(u16, u16),
    Remove(u16),
}

/// Seeded generator of operation traces.
///
/// Uses the xoshiro256** PRNG so a failing seed replays the same trace.
pub struct TraceFuzzer {
    pub seed: u64,
    rng: Xoshiro256StarStar,
}

impl TraceFuzzer {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Xoshiro256StarStar::seed_from_u64(seed),
        }
    }

    /// Random integer in `[min, max]`.
    pub fn random_int(&mut self, min: u16, max: u16) -> u16 {
        self.rng.gen_range(min..=max)
    }

    /// Inserts with probability `insert_ratio`, otherwise removes; keys are
    /// drawn from `0..=key_space` so removals often hit present keys.
    pub fn op(&mut self, key_space: u16, insert_ratio: f64) -> Op {
        let k = self.random_int(0, key_space);
        if self.rng.gen_bool(insert_ratio) {
            Op::Insert(k, self.random_int(0, u16::MAX))
        } else {
            Op::Remove(k)
        }
    }

    pub fn trace(&mut self, len: usize, key_space: u16, insert_ratio: f64) -> Vec<Op> {
        (0..len).map(|_| self.op(key_space, insert_ratio)).collect()
    }
}

pub fn ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            3 => (0u16..256, any::<u16>()).prop_map(|(k, v)| Op::Insert(k, v)),
            2 => (0u16..256).prop_map(Op::Remove),
        ],
        0..400,
    )
}

/// Applies `op` to both maps and checks they agree on the outcome.
pub fn apply(avl: &mut AvlMap<u16, u16>, std: &mut StdMap<u16, u16>, op: &Op) {
    match *op {
        Op::Insert(k, v) => assert_eq!(avl.insert(k, v), std.insert(k, v), "{op:?}"),
        Op::Remove(k) => assert_eq!(avl.remove(&k), std.remove(&k), "{op:?}"),
    }
}

pub fn assert_same(avl: &AvlMap<u16, u16>, std: &StdMap<u16, u16>) {
    assert_eq!(avl.len(), std.len());
    assert!(avl.iter().eq(std.iter()));
}

/// AVL height guarantee, counting nodes on the longest path.
pub fn assert_height_bound<K, V>(map: &AvlMap<K, V>) {
    let bound = 1.44 * ((map.len() + 2) as f64).log2();
    assert!(
        map.height() as f64 <= bound,
        "height {} exceeds {bound} for {} nodes",
        map.height(),
        map.len()
    );
}

/// Routes rebalancing events to the test output; filter with `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
