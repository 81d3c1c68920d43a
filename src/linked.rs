//! A pointer-linked BST whose nodes carry non-owning parent back-references.
//! The tree never rebalances; removal uses the parent links to splice nodes
//! out of the structure in `O(1)` once they have been located.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::linked::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.find(&1).is_err());
//!
//! tree.insert(1, 2);
//! assert_eq!(tree.find(&1), Ok(&2));
//!
//! // Inserting the same key again adds a second node to the right subtree
//! // instead of overwriting the first entry.
//! tree.insert(1, 3);
//! assert_eq!(tree.find(&1), Ok(&2));
//!
//! // Removing the first entry uncovers the duplicate.
//! tree.remove(&1).unwrap();
//! assert_eq!(tree.find(&1), Ok(&3));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ptr::NonNull;

use crate::KeyNotFound;

/// An unbalanced Binary Search Tree. This can be used for inserting,
/// finding, and removing keys and values. Keys equal to an existing key are
/// routed into the right subtree, so duplicate inserts accumulate extra
/// nodes rather than overwriting values.
pub struct Tree<K, V> {
    // This is a `Link` instead of an `Option<Node>` so that it can be moved
    // around with the `Tree` without the children's parent pointers breaking.
    root: Link<K, V>,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for Tree<K, V> {
    fn drop(&mut self) {
        if let Some(mut root) = self.root.take().0 {
            // SAFETY: We own the root we're dropping so this won't be called
            // twice. The root was initially allocated using `Box::new` (in
            // `Node::new_boxed`) so this should be well aligned, etc.
            unsafe { drop(Box::from_raw(root.as_mut())) };
        }
    }
}

impl<K, V> Clone for Tree<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        let root = self.root().map(|root| {
            let new_root = Box::leak(Box::new(root.clone()));
            new_root.fix_left_child_parent();
            new_root.fix_right_child_parent();
            NonNull::from(new_root)
        });
        Self { root: Link(root) }
    }
}

impl<K, V> fmt::Debug for Tree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("root", &self.root()).finish()
    }
}

impl<K, V> Tree<K, V> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: Link(None) }
    }

    /// Generates a `Tree` holding a single entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::linked::Tree;
    ///
    /// let tree = Tree::with_entry(1, 2);
    /// assert_eq!(tree.find(&1), Ok(&2));
    /// ```
    pub fn with_entry(key: K, value: V) -> Self {
        Self {
            root: Link(Some(NonNull::from(Box::leak(Node::new_boxed(key, value))))),
        }
    }

    /// Returns `true` if the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.root.0.is_none()
    }

    /// Finds the value associated with the given key. Fails with
    /// [`KeyNotFound`] when no node matches the key exactly.
    ///
    /// When the key was inserted more than once, the entry nearest the root
    /// (the first one inserted) wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::linked::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.find(&1), Ok(&2));
    /// assert!(tree.find(&42).is_err());
    /// ```
    pub fn find(&self, key: &K) -> Result<&V, KeyNotFound>
    where
        K: Ord,
    {
        let mut current = self.root();
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Equal => return Ok(&node.value),
                Ordering::Less => current = node.left(),
                Ordering::Greater => current = node.right(),
            }
        }
        Err(KeyNotFound)
    }

    /// Inserts the given value into the tree stored at the given key. The
    /// new node always lands at the first empty slot on its search path; no
    /// rebalancing happens, so sorted input builds a chain.
    ///
    /// Inserting a key that is already present does **not** overwrite the
    /// existing entry: equal keys descend right, growing a second node.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::linked::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// tree.insert(1, 2);
    /// tree.insert(1, 3);
    /// assert_eq!(tree.find(&1), Ok(&2));
    /// ```
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        let mut current = match self.root.0 {
            Some(root) => root,
            None => {
                self.root = Link(Some(NonNull::from(Box::leak(Node::new_boxed(key, value)))));
                return;
            }
        };
        loop {
            // SAFETY: `current` points at a live node owned by this tree and
            // we hold `&mut self`, so no other reference into the tree can
            // exist while we descend.
            let node = unsafe { current.as_mut() };
            // Equal keys are routed right.
            let child = if key < node.key {
                &mut node.left
            } else {
                &mut node.right
            };
            match child.0 {
                Some(next) => current = next,
                None => {
                    let mut leaf = Node::new_boxed(key, value);
                    leaf.parent = Link(Some(current));
                    *child = Link(Some(NonNull::from(Box::leak(leaf))));
                    return;
                }
            }
        }
    }

    /// Removes the node containing the given key from the tree. Fails with
    /// [`KeyNotFound`] when no node matches, in which case the tree is left
    /// unmodified (the search runs before any mutation).
    ///
    /// When the key was inserted more than once, the entry nearest the root
    /// is the one removed; later duplicates become visible to [`find`] again.
    ///
    /// [`find`]: Tree::find
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::linked::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert!(tree.remove(&1).is_ok());
    /// assert!(tree.find(&1).is_err());
    /// assert!(tree.remove(&1).is_err());
    /// ```
    pub fn remove(&mut self, key: &K) -> Result<(), KeyNotFound>
    where
        K: Ord,
    {
        let node = self.locate(key)?;
        // SAFETY: `locate` returned a node owned by this tree and no
        // references into the tree are live here.
        unsafe { self.remove_node(node) };
        Ok(())
    }

    /// Read-only view of the root node, if any. The [`traverse`] utilities
    /// take this as their starting point.
    ///
    /// [`traverse`]: crate::traverse
    pub fn root(&self) -> Option<&Node<K, V>> {
        // SAFETY: If the root is not `None` then it is a valid `Node`.
        // Because we take `&self` here, only shared access is handed out.
        unsafe { self.root.0.as_ref().map(|root| root.as_ref()) }
    }

    /// Walks the same descent as `find` but yields the matching node's
    /// pointer so removal can splice it structurally.
    fn locate(&self, key: &K) -> Result<NonNull<Node<K, V>>, KeyNotFound>
    where
        K: Ord,
    {
        let mut current = self.root.0;
        while let Some(ptr) = current {
            // SAFETY: Every link in the tree points at a live, exclusively
            // owned node, and we hold `&self` so shared access is fine.
            let node = unsafe { ptr.as_ref() };
            match key.cmp(&node.key) {
                Ordering::Equal => return Ok(ptr),
                Ordering::Less => current = node.left.0,
                Ordering::Greater => current = node.right.0,
            }
        }
        Err(KeyNotFound)
    }

    /// Detaches `node` from the tree and frees it.
    ///
    /// # Safety
    ///
    /// `node` must be owned by this tree and no references into the tree may
    /// be live across this call.
    unsafe fn remove_node(&mut self, mut node: NonNull<Node<K, V>>) {
        let (has_left, has_right) = {
            let n = node.as_ref();
            (n.left.0.is_some(), n.right.0.is_some())
        };
        if has_left && has_right {
            // Two children: the in-order successor (leftmost node of the
            // right subtree, which never has a left child) donates its entry
            // to this node and is spliced out of its old position instead.
            let mut successor = node.as_ref().right.0.expect("two children implies a right child");
            while let Some(left) = successor.as_ref().left.0 {
                successor = left;
            }
            let replacement = {
                // SAFETY (for the two `as_mut`s): the successor sits strictly
                // inside `node`'s right subtree, so these are distinct
                // allocations and the two references cannot alias.
                let n = node.as_mut();
                let s = successor.as_mut();
                mem::swap(&mut n.key, &mut s.key);
                mem::swap(&mut n.value, &mut s.value);
                // The successor carries the removed entry away; its right
                // subtree (possibly empty) takes its place.
                s.right.take()
            };
            self.splice(successor, replacement);
        } else {
            let replacement = {
                let n = node.as_mut();
                if has_left {
                    n.left.take()
                } else {
                    n.right.take()
                }
            };
            self.splice(node, replacement);
        }
    }

    /// Redirects whichever of `parent.left`/`parent.right` pointed at `node`
    /// to `replacement` (repointing the root handle when `node` has no
    /// parent), reparents the replacement, and frees `node`.
    ///
    /// # Safety
    ///
    /// `node` must be owned by this tree, its child links must no longer
    /// reach `replacement` (the caller detaches it first), and no references
    /// into the tree may be live across this call.
    unsafe fn splice(&mut self, node: NonNull<Node<K, V>>, replacement: Link<K, V>) {
        let parent = node.as_ref().parent;
        if let Some(mut new_child) = replacement.0 {
            new_child.as_mut().parent = parent;
        }
        match parent.0 {
            Some(mut parent) => {
                let parent = parent.as_mut();
                if parent.left.0 == Some(node) {
                    parent.left = replacement;
                } else {
                    parent.right = replacement;
                }
            }
            None => self.root = replacement,
        }
        // The caller already detached everything this node still owned, so
        // this frees exactly one allocation.
        drop(Box::from_raw(node.as_ptr()));
    }
}

struct Link<K, V>(Option<NonNull<Node<K, V>>>);

impl<K, V> Clone for Link<K, V> {
    fn clone(&self) -> Self {
        Self(self.0)
    }
}
impl<K, V> Copy for Link<K, V> {}

impl<K, V> Link<K, V> {
    fn node(&self) -> Option<&Node<K, V>> {
        // SAFETY: If the link is not `None` then it points at a valid
        // `Node`. We take `&self`, so only shared access can be handed out.
        unsafe { self.0.as_ref().map(|ptr| ptr.as_ref()) }
    }

    fn node_mut(&mut self) -> Option<&mut Node<K, V>> {
        // SAFETY: As in `node`, but we take `&mut self` so handing out
        // exclusive access is fine.
        unsafe { self.0.as_mut().map(|ptr| ptr.as_mut()) }
    }

    fn take(&mut self) -> Self {
        Link(self.0.take())
    }
}

/// A `Node` has a key that is used for searching/sorting, a value that is
/// associated with that key, up to two children, and a non-owning reference
/// back to its parent (absent for the root).
pub struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
    parent: Link<K, V>,
}

impl<K, V> Drop for Node<K, V> {
    // TODO drop iteratively so teardown doesn't recurse tree-deep
    fn drop(&mut self) {
        // SAFETY: Dropping a node doesn't drop its parent and we are the
        // only owners of these children so we won't drop them twice. They
        // were initially allocated using `Box::new` (in `Node::new_boxed`)
        // so they should be well aligned, etc.
        unsafe {
            if let Some(mut left) = self.left.0.take() {
                drop(Box::from_raw(left.as_mut()));
            }
            if let Some(mut right) = self.right.0.take() {
                drop(Box::from_raw(right.as_mut()));
            }
        }
    }
}

impl<K, V> Clone for Node<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        let left = self.left().map(|left| {
            let new_left = Box::leak(Box::new(left.clone()));
            new_left.fix_left_child_parent();
            new_left.fix_right_child_parent();
            NonNull::from(new_left)
        });
        let right = self.right().map(|right| {
            let new_right = Box::leak(Box::new(right.clone()));
            new_right.fix_left_child_parent();
            new_right.fix_right_child_parent();
            NonNull::from(new_right)
        });
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            left: Link(left),
            right: Link(right),
            // Stale copy; fixed by the cloning parent's fix-up calls.
            parent: self.parent,
        }
    }
}

impl<K, V> fmt::Debug for Node<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<K, V> Node<K, V> {
    fn new_boxed(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: Link(None),
            right: Link(None),
            parent: Link(None),
        })
    }

    /// The key this node was inserted under.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The value stored alongside the key.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The left child, holding only keys less than this node's.
    pub fn left(&self) -> Option<&Self> {
        self.left.node()
    }

    /// The right child, holding keys greater than or equal to this node's.
    pub fn right(&self) -> Option<&Self> {
        self.right.node()
    }

    fn left_mut(&mut self) -> Option<&mut Self> {
        self.left.node_mut()
    }

    fn right_mut(&mut self) -> Option<&mut Self> {
        self.right.node_mut()
    }

    fn fix_left_child_parent(&mut self) {
        let self_ptr = NonNull::from(&*self);
        if let Some(left) = self.left_mut() {
            left.parent = Link(Some(self_ptr));
        }
    }

    fn fix_right_child_parent(&mut self) {
        let self_ptr = NonNull::from(&*self);
        if let Some(right) = self.right_mut() {
            right.parent = Link(Some(self_ptr));
        }
    }
}
