//! This crate exposes an unbalanced Binary Search Tree map, [`OrderedMap`], and a small named
//! family tree built on the same ownership ideas.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and a
//! value and has up to two child `Node`s. The invariants kept here are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have a key
//!    less than its own key.
//! 2. For every `Node`, all the `Node`s in its right subtree have a key
//!    greater than **or equal to** its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The second rule means the same key can be inserted more than once. Searching stops at the
//! first matching `Node`, so the copy nearest the root is the one that is found and removed.
//!
//! Searching takes `O(height)` (where `height` is the longest path from the root `Node` to a
//! leaf `Node`). Nothing here rebalances, so inserting keys in sorted order gives a tree whose
//! height is its size.
//!
//! ## Features
//!
//! * `family` (default): the [`family`] module and its [`FamilyTreeError`]. Turning it off drops
//!   the `serde`, `serde_json` and `thiserror` dependencies.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod ordered_map;
pub mod pre_order;

#[cfg(feature = "family")]
pub mod error;
#[cfg(feature = "family")]
pub mod family;

pub use ordered_map::OrderedMap;

#[cfg(feature = "family")]
pub use error::FamilyTreeError;
#[cfg(feature = "family")]
pub use family::FamilyTree;
