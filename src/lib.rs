//! An unbalanced Binary Search Tree (BST) with parent back-references,
//! mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than (or, in this crate, equal to) its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! keys in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). BSTs also naturally support
//! sorted iteration by visiting the left subtree, then the subtree root, then
//! the right subtree.
//!
//! The tree in this crate does *not* rebalance itself: its height is
//! determined entirely by insertion order, so adversarial (sorted) input
//! degenerates it into a chain. Every node keeps a non-owning back-reference
//! to its parent, which is what lets removal splice a node out of the
//! structure in `O(1)` once it has been located.
//!
//! Two quirks of this tree worth knowing up front:
//!
//! * Inserting a key that is already present does **not** overwrite the
//!   existing value. Equal keys are routed right, so a duplicate insert
//!   grows a second node in the right subtree and [`find`][linked::Tree::find]
//!   keeps returning the first-inserted entry until it is removed.
//! * Lookups that miss report an explicit [`KeyNotFound`] error rather than
//!   an `Option`, so callers can always tell a missing key apart from a
//!   stored value.
//!
//! The [`traverse`] module has read-only helpers (subtree sum, height,
//! ordering check, a shallow balance check, k-th-largest lookup) built on
//! the tree's public structural view.

#![deny(missing_docs)]

mod error;
pub mod linked;
pub mod traverse;

#[cfg(test)]
mod test;

pub use error::KeyNotFound;
