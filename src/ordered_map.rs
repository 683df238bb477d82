//! An unbalanced BST owning its nodes through `Box`es. Keys that are not strictly less than a
//! node's key go to its right, so duplicate keys are kept rather than overwritten.
//!
//! # Examples
//!
//! ```
//! use ordered_bst::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//!
//! // Nothing in here yet.
//! assert_eq!(map.find(&1), None);
//!
//! map.insert(1, 2);
//! assert_eq!(map.find(&1), Some(&2));
//!
//! // Inserting the same key again adds a second node. Lookups still see the first one.
//! map.insert(1, 3);
//! assert_eq!(map.find(&1), Some(&2));
//! assert_eq!(map.size(), 2);
//!
//! // Removing a key returns the value of the node nearest the root.
//! assert_eq!(map.remove(&1), Some(2));
//! assert_eq!(map.find(&1), Some(&3));
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::io;

use crate::pre_order::{PreOrder, PreOrderKeys};

/// A child slot. `None` marks the empty pointer at the bottom of a subtree.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// A Binary Search Tree mapping keys to values. This can be used for inserting, finding, and
/// removing keys and values. No rebalancing is ever done, so inserting sorted keys builds a tree
/// as deep as it is large.
pub struct OrderedMap<K, V> {
    root: Link<K, V>,
    size: usize,
}

/// A `Node` has a key that is used for searching and a value associated with that key. Its
/// children are owned exclusively by it.
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn boxed(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: None,
            right: None,
        })
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for OrderedMap<K, V> {
    fn drop(&mut self) {
        teardown(self.root.take());
    }
}

/// Rebuilds the same shape: inserting a pre-order sequence visits every node after its
/// ancestors, so each key lands exactly where it was.
impl<K, V> Clone for OrderedMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        self.traverse()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<K, V> fmt::Debug for OrderedMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.traverse()).finish()
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> OrderedMap<K, V> {
    /// Generates a new, empty `OrderedMap`.
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// The number of nodes in the tree. Every insert counts, including duplicates.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Discards every node.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::OrderedMap;
    ///
    /// let mut map: OrderedMap<_, _> = (0..10).map(|x| (x, x)).collect();
    /// map.clear();
    ///
    /// assert_eq!(map.size(), 0);
    /// assert_eq!(map.find(&3), None);
    /// ```
    pub fn clear(&mut self) {
        tracing::trace!(size = self.size, "clearing ordered map");
        teardown(self.root.take());
        self.size = 0;
    }

    /// Visits `(key, value)` pairs in pre-order: a node, then its left subtree, then its right
    /// subtree. This shows the shape of the tree; it is not sorted order. Call it again to start
    /// over.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = [2, 1, 3].iter().map(|&x| (x, x * 10)).collect();
    /// let visited: Vec<_> = map.traverse().collect();
    ///
    /// assert_eq!(visited, vec![(&2, &20), (&1, &10), (&3, &30)]);
    /// ```
    pub fn traverse(&self) -> PreOrder<'_, K, V> {
        PreOrder::new(self.root.as_deref())
    }

    /// A `Display` adaptor printing every key, padded by a space on each side, in pre-order.
    ///
    /// ```
    /// use ordered_bst::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = [2, 1, 3].iter().map(|&x| (x, ())).collect();
    ///
    /// assert_eq!(map.pre_order_keys().to_string(), " 2  1  3 ");
    /// ```
    pub fn pre_order_keys(&self) -> PreOrderKeys<'_, K, V> {
        PreOrderKeys::new(self)
    }

    /// Writes the [`pre_order_keys`][Self::pre_order_keys] dump to `out`.
    pub fn dump<W>(&self, out: &mut W) -> io::Result<()>
    where
        W: io::Write + ?Sized,
        K: fmt::Display,
    {
        write!(out, "{}", self.pre_order_keys())
    }

    /// Potentially finds the value associated with the given key. When the key was inserted more
    /// than once the node nearest the root wins. If no node has the key, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, 2);
    ///
    /// assert_eq!(map.find(&1), Some(&2));
    /// assert_eq!(map.find(&42), None);
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => link = node.left.as_deref(),
                Ordering::Equal => return Some(&node.value),
                Ordering::Greater => link = node.right.as_deref(),
            }
        }
        None
    }

    /// Like [`find`][Self::find] but hands out the value mutably.
    pub fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut link = self.root.as_deref_mut();
        while let Some(node) = link {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => link = node.left.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
                Ordering::Greater => link = node.right.as_deref_mut(),
            }
        }
        None
    }

    /// Returns `true` if some node holds the given key.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Inserts the given value at the given key. This never fails and never overwrites: a key
    /// equal to an existing one is placed in that node's right subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    ///
    /// map.insert(1, 2);
    /// map.insert(1, 3);
    ///
    /// assert_eq!(map.size(), 2);
    /// assert_eq!(map.find(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Equal | Ordering::Greater => &mut node.right,
            };
        }
        *slot = Some(Node::boxed(key, value));
        self.size += 1;
    }

    /// Removes the node nearest the root holding the given key and returns the value it held. If
    /// the tree does not contain the key, nothing happens.
    ///
    /// A node with two children is not unlinked itself. It takes the key and value of its
    /// in-order successor (the smallest node of its right subtree) and that successor is unlinked
    /// instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, 2);
    ///
    /// assert_eq!(map.remove(&1), Some(2));
    /// assert_eq!(map.remove(&1), None);
    /// assert_eq!(map.find(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut slot = &mut self.root;
        loop {
            let ordering = match slot.as_deref() {
                Some(node) => key.cmp(node.key.borrow()),
                None => return None,
            };
            if ordering == Ordering::Equal {
                break;
            }
            let node = slot.as_mut()?;
            slot = match ordering {
                Ordering::Less => &mut node.left,
                _ => &mut node.right,
            };
        }

        let value = unlink(slot)?;
        self.size -= 1;
        Some(value)
    }
}

/// Removes the node in `slot`, returning its value. `slot` must hold a node for this to return
/// `Some`.
fn unlink<K, V>(slot: &mut Link<K, V>) -> Option<V> {
    let node = slot.as_mut()?;
    if node.left.is_some() && node.right.is_some() {
        let successor = take_min(&mut node.right)?;
        let Node { key, value, .. } = *successor;
        node.key = key;
        tracing::trace!("removed node with two children by promoting its in-order successor");
        return Some(std::mem::replace(&mut node.value, value));
    }

    let mut node = slot.take()?;
    *slot = node.left.take().or_else(|| node.right.take());
    let Node { value, .. } = *node;
    Some(value)
}

/// Unlinks and returns the leftmost node under `slot`, putting its right child in its place.
fn take_min<K, V>(mut slot: &mut Link<K, V>) -> Option<Box<Node<K, V>>> {
    while slot.as_ref()?.left.is_some() {
        slot = &mut slot.as_mut()?.left;
    }
    let mut min = slot.take()?;
    *slot = min.right.take();
    Some(min)
}

/// Drops a subtree one node at a time so a degenerate tree can't overflow the stack.
fn teardown<K, V>(root: Link<K, V>) {
    let mut stack: Vec<Box<Node<K, V>>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}
