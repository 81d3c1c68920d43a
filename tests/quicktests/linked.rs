use ordered_tree::linked::Tree;
use ordered_tree::traverse::{in_order_keys, is_ordered};

use std::collections::{HashMap, HashSet};

use quickcheck_macros::quickcheck;

use crate::Op;

/// Applies a set of operations to a tree and a hashmap.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in the map.
///
/// Duplicate-key inserts are skipped: the map would overwrite while the
/// tree keeps its first entry per key.
fn do_ops<K, V>(ops: &[Op<K, V>], bst: &mut Tree<K, V>, map: &mut HashMap<K, V>)
where
    K: std::hash::Hash + Eq + Clone + Ord,
    V: std::fmt::Debug + PartialEq + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                if !map.contains_key(k) {
                    bst.insert(k.clone(), v.clone());
                    map.insert(k.clone(), v.clone());
                }
            }
            Op::Remove(k) => {
                assert_eq!(bst.remove(k).is_ok(), map.remove(k).is_some());
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
    let mut tree = Tree::new();
    let mut map = HashMap::new();

    do_ops(&ops, &mut tree, &mut map);
    map.keys().all(|key| tree.find(key).ok() == map.get(key))
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }

    xs.iter().all(|x| tree.find(x) == Ok(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_err())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    // Distinct keys so one remove per key fully evicts it.
    let xs: HashSet<i8> = xs.into_iter().collect();
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    for delete in &deletes {
        let _ = tree.remove(delete);
    }

    let deletes: HashSet<i8> = deletes.into_iter().collect();
    deletes.iter().all(|x| tree.find(x).is_err())
        && xs.difference(&deletes).all(|x| tree.find(x).is_ok())
}

#[quickcheck]
fn in_order_keys_are_sorted(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }

    // Duplicate inserts make separate nodes, so every insert shows up.
    let keys = in_order_keys(tree.root());
    keys.len() == xs.len() && keys.windows(2).all(|pair| pair[0] <= pair[1])
}

#[quickcheck]
fn removal_preserves_ordering(xs: Vec<i8>, pick: usize) -> bool {
    let xs: Vec<i8> = {
        let distinct: HashSet<i8> = xs.into_iter().collect();
        distinct.into_iter().collect()
    };
    if xs.is_empty() {
        return true;
    }
    let removed = xs[pick % xs.len()];

    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    tree.remove(&removed).unwrap();

    tree.find(&removed).is_err() && is_ordered(tree.root(), None, None)
}

#[quickcheck]
fn size_accounting(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    // N distinct inserts followed by M removes of distinct existing keys
    // leave exactly N - M findable keys.
    let xs: HashSet<i8> = xs.into_iter().collect();
    let deletes: Vec<i8> = deletes
        .into_iter()
        .collect::<HashSet<i8>>()
        .intersection(&xs)
        .copied()
        .collect();

    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    for delete in &deletes {
        tree.remove(delete).unwrap();
    }

    let found = (i8::MIN..=i8::MAX).filter(|x| tree.find(x).is_ok()).count();
    found == xs.len() - deletes.len()
}

#[quickcheck]
fn stays_ordered_under_arbitrary_ops(ops: Vec<Op<i8, i8>>) -> bool {
    let mut tree = Tree::new();
    for op in ops {
        match op {
            Op::Insert(k, v) => tree.insert(k, v),
            Op::Remove(k) => {
                let _ = tree.remove(&k);
            }
        }
    }
    is_ordered(tree.root(), None, None)
}
