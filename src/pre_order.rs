//! Pre-order walks over an [`OrderedMap`]. These exist for looking at the shape of a tree, so
//! there is no sorted iteration here.

use std::fmt;

use crate::ordered_map::{Node, OrderedMap};

/// An iterator over `(key, value)` pairs in pre-order, created by [`OrderedMap::traverse`].
///
/// The walk keeps its own stack of pending subtrees instead of recursing.
pub struct PreOrder<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
}

impl<'a, K, V> PreOrder<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

/// Manual implementation of `Clone` so `K` and `V` don't have to be `Clone`; only references are
/// copied.
impl<K, V> Clone for PreOrder<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<'a, K, V> Iterator for PreOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right goes on first so the left subtree comes out first.
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        Some((&node.key, &node.value))
    }
}

/// Renders the keys of a tree in pre-order, each surrounded by single spaces.
pub struct PreOrderKeys<'a, K, V> {
    map: &'a OrderedMap<K, V>,
}

impl<'a, K, V> PreOrderKeys<'a, K, V> {
    pub(crate) fn new(map: &'a OrderedMap<K, V>) -> Self {
        Self { map }
    }
}

impl<K: fmt::Display, V> fmt::Display for PreOrderKeys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, _) in self.map.traverse() {
            write!(f, " {} ", key)?;
        }
        Ok(())
    }
}
