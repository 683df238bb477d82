//! Errors returned by [`FamilyTree`][crate::family::FamilyTree].

use thiserror::Error;

/// Why a family tree operation was rejected. The tree is left unchanged whenever one of these is
/// returned.
#[derive(Debug, Error)]
pub enum FamilyTreeError {
    /// The given name was empty or only whitespace.
    #[error("member name must not be empty")]
    EmptyName,

    /// Another member already uses this name (names are compared case-insensitively).
    #[error("a member named `{0}` already exists")]
    DuplicateMember(String),

    /// No member has this name.
    #[error("no member named `{0}`")]
    MemberNotFound(String),

    /// A parentless member was added to a tree that already has a root.
    #[error("the tree already has a root member `{0}`")]
    RootExists(String),

    /// The tree could not be rendered as JSON.
    #[error("failed to serialize family tree: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Shorthand for results of family tree operations.
pub type Result<T> = std::result::Result<T, FamilyTreeError>;
