use crate::bst::{Tree, Unbalanced};
use crate::compare::Natural;
use crate::splay_tree::{splay, Splay};

use proptest::prelude::*;
use std::collections::BTreeMap;

type SplayTree = Tree<u16, u32, Natural, Splay>;

#[derive(Clone, Debug)]
enum Op {
    Insert(u16, u32),
    Remove(u16),
    Get(u16),
    Peek(u16),
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = 0u16..512;
    let op = prop_oneof![
        4 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => key.clone().prop_map(Op::Remove),
        2 => key.clone().prop_map(Op::Get),
        1 => key.prop_map(Op::Peek),
    ];
    prop::collection::vec(op, 0..=400)
}

fn root_key(tree: &SplayTree) -> Option<u16> {
    tree.root()
        .and_then(|handle| tree.entry(handle))
        .map(|entry| entry.key)
}

fn plain_tree(keys: &[u16]) -> Tree<u16, u32, Natural, Unbalanced> {
    let mut tree = Tree::default();
    for &key in keys {
        tree.try_insert(key, u32::from(key)).unwrap();
    }
    tree
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_matches_btreemap(ops in ops_strategy()) {
        let mut tree = SplayTree::default();
        let mut expected = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let old_tree = tree.try_insert(key, value).unwrap().map(|entry| entry.value);
                    let old_expected = expected.insert(key, value);
                    prop_assert_eq!(old_tree, old_expected);
                    prop_assert_eq!(root_key(&tree), Some(key));
                }
                Op::Remove(key) => {
                    let shape = tree.shape();
                    let old_tree = tree.remove(&key).map(|entry| entry.value);
                    let old_expected = expected.remove(&key);
                    prop_assert_eq!(old_tree, old_expected);
                    if old_expected.is_none() {
                        prop_assert_eq!(tree.shape(), shape);
                    } else {
                        prop_assert!(tree.find(&key).is_none());
                    }
                }
                Op::Get(key) => {
                    let got = tree.get(&key).copied();
                    prop_assert_eq!(got, expected.get(&key).copied());
                    if got.is_some() {
                        prop_assert_eq!(root_key(&tree), Some(key));
                    }
                }
                Op::Peek(key) => {
                    let root = tree.root();
                    prop_assert_eq!(tree.peek(&key), expected.get(&key));
                    prop_assert_eq!(tree.root(), root);
                }
            }

            prop_assert_eq!(tree.len(), expected.len());
            tree.assert_invariants();
        }

        let got: Vec<(u16, u32)> = tree.iter().map(|(k, v)| (*k, *v)).collect();
        let want: Vec<(u16, u32)> = expected.into_iter().collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn prop_splay_only_changes_shape(
        keys in prop::collection::vec(any::<u16>(), 1..200),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut tree: SplayTree = plain_tree(&keys).with_strategy();
        let before = tree.handles_in_order();
        let target = before[pick.index(before.len())];

        splay(&mut tree, target);

        prop_assert_eq!(tree.root(), Some(target));
        prop_assert_eq!(tree.handles_in_order(), before);
        tree.assert_invariants();
    }

    #[test]
    fn prop_erase_present_removes_exactly_one(
        keys in prop::collection::vec(any::<u16>(), 1..200),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut tree = SplayTree::default();
        for &key in &keys {
            tree.try_insert(key, u32::from(key)).unwrap();
        }
        let len = tree.len();
        let key = keys[pick.index(keys.len())];

        prop_assert_eq!(tree.remove(&key).map(|entry| entry.key), Some(key));
        prop_assert_eq!(tree.len(), len - 1);
        prop_assert_eq!(tree.search(&key), None);
        tree.assert_invariants();
    }
}
