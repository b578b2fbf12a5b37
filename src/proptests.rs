use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::{BTreeMap, BTreeSet};

use crate::hashing::{linear_probe_index, multiplicative_index};

/// Walk the tree checking strict ordering on every edge and the node count.
fn validate_tree(t: &BinarySearchTree) {
    let tokens: Vec<Token> = t.iter().copied().collect();
    for pair in tokens.windows(2) {
        assert!(
            pair[0] < pair[1],
            "in-order walk must be strictly ascending: {:?} !< {:?}",
            pair[0],
            pair[1]
        );
    }
    assert_eq!(tokens.len(), t.len(), "reachable nodes must match len");
    assert!(t.height() <= t.len());
}

fn validate_closed(t: &ProbeSequenceTable) {
    assert_eq!(t.iter().count(), t.occupied(), "occupied count drifted");
    assert!(t.occupied() <= t.table_size());
}

#[derive(Clone, Copy, Debug, Arbitrary)]
enum Op {
    Search,
    Insert,
    Delete,
}

fn token_strategy() -> impl Strategy<Value = Token> + Clone {
    // A small alphabet and short words keep collisions and repeats frequent.
    prop::collection::vec(b'a'..=b'e', 0..=4).prop_map(|raw| Token::normalize(raw))
}

fn ops_strategy() -> impl Strategy<Value = Vec<(Op, Token)>> {
    prop::collection::vec((any::<Op>(), token_strategy()), 0..=400)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_normalize_idempotent(raw in prop::collection::vec(any::<u8>(), 0..=32)) {
        let once = Token::normalize(&raw);
        prop_assert_eq!(once.as_bytes().len(), TOKEN_LEN);
        prop_assert_eq!(Token::normalize(once.as_bytes()), once);
    }

    #[test]
    fn prop_indices_in_range(key in 0u32..=2550, m in 1usize..5000, i in 0usize..10_000) {
        prop_assert!(multiplicative_index(key, m) < m);
        prop_assert!(linear_probe_index(key, i, m) < m);
    }

    #[test]
    fn prop_bst_equivalence(ops in ops_strategy()) {
        let mut t = BinarySearchTree::new();
        let mut m: BTreeSet<Token> = BTreeSet::new();

        for (op, token) in ops {
            match op {
                Op::Insert => {
                    t.insert(token);
                    m.insert(token);
                }
                Op::Delete => {
                    prop_assert_eq!(t.remove(&token), m.remove(&token));
                }
                Op::Search => {
                    prop_assert_eq!(t.search(&token), m.contains(&token));
                }
            }
            prop_assert_eq!(t.len(), m.len());
        }

        validate_tree(&t);
        let got: Vec<Token> = t.iter().copied().collect();
        let expected: Vec<Token> = m.into_iter().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_chains_equivalence(ops in ops_strategy(), m in 1usize..17) {
        let mut unsorted = UnsortedChainTable::new(m);
        let mut sorted = SortedChainTable::new(m);
        let mut model: BTreeMap<Token, usize> = BTreeMap::new();

        for (op, token) in ops {
            match op {
                Op::Insert => {
                    unsorted.insert(token);
                    sorted.insert(token);
                    *model.entry(token).or_default() += 1;
                }
                Op::Delete => {
                    let expected = match model.get_mut(&token) {
                        Some(c) => {
                            *c -= 1;
                            if *c == 0 {
                                model.remove(&token);
                            }
                            true
                        }
                        None => false,
                    };
                    prop_assert_eq!(unsorted.remove(&token), expected);
                    prop_assert_eq!(sorted.remove(&token), expected);
                }
                Op::Search => {
                    let expected = model.contains_key(&token);
                    prop_assert_eq!(unsorted.search(&token), expected);
                    prop_assert_eq!(sorted.search(&token), expected);
                }
            }
        }

        for idx in 0..m {
            let bucket = sorted.bucket(idx);
            prop_assert!(bucket.windows(2).all(|w| w[0] <= w[1]), "bucket {} unsorted", idx);
        }
        let total: usize = model.values().sum();
        prop_assert_eq!(unsorted.len(), total);
        prop_assert_eq!(sorted.len(), total);
    }

    #[test]
    fn prop_closed_occupancy_conserved(ops in ops_strategy()) {
        // Large enough that 400 operations can never fill it.
        let mut t = ProbeSequenceTable::new(401);
        let mut inserts = 0usize;
        let mut removals = 0usize;

        for (op, token) in ops {
            match op {
                Op::Insert => {
                    t.insert(token);
                    inserts += 1;
                }
                Op::Delete => {
                    if t.remove(&token) {
                        removals += 1;
                    }
                }
                Op::Search => {
                    t.search(&token);
                }
            }
            prop_assert_eq!(t.occupied(), inserts - removals);
        }
        validate_closed(&t);
    }

    #[test]
    fn prop_counters_only_grow(ops in ops_strategy()) {
        for kind in EngineKind::ALL {
            let mut engine = kind.build(401);
            let mut prev = engine.probes().clone();
            for (op, token) in &ops {
                match op {
                    Op::Insert => engine.insert(*token),
                    Op::Delete => {
                        engine.remove(token);
                    }
                    Op::Search => {
                        engine.search(token);
                    }
                }
                let now = engine.probes().clone();
                let mut grew = 0;
                for class in OpClass::ALL {
                    prop_assert!(now.sum(class) >= prev.sum(class));
                    prop_assert!(now.count(class) >= prev.count(class));
                    grew += now.count(class) - prev.count(class);
                }
                prop_assert_eq!(grew, 1, "each call is charged exactly once");
                prev = now;
            }
        }
    }

    #[test]
    fn prop_schedule_digits_round_trip(decimal in any::<u64>()) {
        let s = Schedule::from_decimal(decimal);
        let digits = s.to_string();
        prop_assert_eq!(u64::from_str_radix(&digits, 3).ok(), Some(decimal));
        prop_assert_eq!(digits.parse::<Schedule>().ok(), Some(s));
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

fn small_set() -> Vec<Token> {
    ["d", "b", "f", "a", "c", "e"].map(Token::from).to_vec()
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys = small_set();
    let mut expected = keys.clone();
    expected.sort();

    for_each_permutation(&keys, |perm| {
        let mut t = BinarySearchTree::new();
        for k in perm {
            t.insert(k);
        }
        validate_tree(&t);
        let got: Vec<Token> = t.iter().copied().collect();
        assert_eq!(got, expected);
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys = small_set();

    // Insert in a fixed order, then remove in all permutations.
    let mut base = BinarySearchTree::new();
    for k in &keys {
        base.insert(*k);
    }

    for_each_permutation(&keys, |perm| {
        let mut t = base.clone();
        let mut live: BTreeSet<Token> = keys.iter().copied().collect();
        for k in perm {
            assert!(t.remove(&k));
            live.remove(&k);
            validate_tree(&t);
            let got: Vec<Token> = t.iter().copied().collect();
            let expected: Vec<Token> = live.iter().copied().collect();
            assert_eq!(got, expected);
        }
        assert_eq!(t.len(), 0);
        assert!(t.is_empty());
    });
}
