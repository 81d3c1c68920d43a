//! Read-only traversal utilities over the structure exposed by
//! [`linked::Tree::root`].
//!
//! Every function here walks the tree recursively through the public
//! [`Node`] accessors and never mutates anything. They all take an
//! `Option<&Node>` so an empty tree (or an absent child) can be passed
//! directly.
//!
//! [`linked::Tree::root`]: crate::linked::Tree::root

use std::ops::Add;

use crate::linked::Node;

/// Sums every value in the subtree rooted at `node`, returning
/// `V::default()` for an absent node. `O(n)`.
///
/// # Examples
///
/// ```
/// use ordered_tree::linked::Tree;
/// use ordered_tree::traverse::subtree_sum;
///
/// let mut tree = Tree::new();
/// for key in [3, 1, 4] {
///     tree.insert(key, key);
/// }
///
/// assert_eq!(subtree_sum(tree.root()), 8);
/// ```
pub fn subtree_sum<K, V>(node: Option<&Node<K, V>>) -> V
where
    V: Copy + Default + Add<Output = V>,
{
    match node {
        None => V::default(),
        Some(n) => subtree_sum(n.left()) + *n.value() + subtree_sum(n.right()),
    }
}

/// The height of the subtree rooted at `node`: 0 for an absent node and
/// `1 + max(left, right)` otherwise, so a lone node has height 1. `O(n)`.
pub fn height<K, V>(node: Option<&Node<K, V>>) -> usize {
    match node {
        None => 0,
        Some(n) => 1 + height(n.left()).max(height(n.right())),
    }
}

/// Checks that every key in the subtree rooted at `node` respects the BST
/// ordering, tightening the `(lower, upper)` bound on each descent and
/// short-circuiting on the first violation. Pass `(None, None)` for a whole
/// tree.
///
/// A key *equal* to one of its bounds is tolerated, so trees holding
/// duplicate keys (which this crate routes right) still validate.
pub fn is_ordered<K, V>(node: Option<&Node<K, V>>, lower: Option<&K>, upper: Option<&K>) -> bool
where
    K: Ord,
{
    let n = match node {
        None => return true,
        Some(n) => n,
    };
    let key = n.key();
    if lower.map_or(false, |lower| key < lower) {
        return false;
    }
    if upper.map_or(false, |upper| key > upper) {
        return false;
    }
    is_ordered(n.left(), lower, Some(key)) && is_ordered(n.right(), Some(key), upper)
}

/// Whether `node`'s two immediate subtrees are within one level of each
/// other in height. An absent node counts as balanced.
///
/// This is a *shallow* check: it only compares the heights at `node`
/// itself and says nothing about balance deeper in the tree (it is not an
/// AVL invariant check).
pub fn is_root_height_balanced<K, V>(node: Option<&Node<K, V>>) -> bool {
    match node {
        None => true,
        Some(n) => {
            let left = height(n.left());
            let right = height(n.right());
            left.abs_diff(right) <= 1
        }
    }
}

/// Every key in the subtree rooted at `node`, in ascending (in-order)
/// order. Duplicate keys appear once per node holding them.
pub fn in_order_keys<K, V>(node: Option<&Node<K, V>>) -> Vec<&K> {
    fn walk<'a, K, V>(node: Option<&'a Node<K, V>>, keys: &mut Vec<&'a K>) {
        if let Some(n) = node {
            walk(n.left(), keys);
            keys.push(n.key());
            walk(n.right(), keys);
        }
    }

    let mut keys = Vec::new();
    walk(node, &mut keys);
    keys
}

/// The key with 1-based rank `k` counting down from the largest, or `None`
/// when `k` is 0 or exceeds the number of nodes.
///
/// Collects every key and sorts descending, so this is `O(n log n)` rather
/// than the `O(n)` a rank-tracking descent could manage.
///
/// # Examples
///
/// ```
/// use ordered_tree::linked::Tree;
/// use ordered_tree::traverse::kth_largest;
///
/// let mut tree = Tree::new();
/// for key in [3, 1, 4] {
///     tree.insert(key, ());
/// }
///
/// assert_eq!(kth_largest(tree.root(), 1), Some(&4));
/// assert_eq!(kth_largest(tree.root(), 3), Some(&1));
/// assert_eq!(kth_largest(tree.root(), 4), None);
/// ```
pub fn kth_largest<K, V>(node: Option<&Node<K, V>>, k: usize) -> Option<&K>
where
    K: Ord,
{
    let mut keys = in_order_keys(node);
    keys.sort_unstable_by(|a, b| b.cmp(a));
    if k == 0 {
        return None;
    }
    keys.get(k - 1).copied()
}
