//! A family tree: every member has any number of children and at most one parent, and members
//! are looked up by name.
//!
//! Members live in an arena owned by the [`FamilyTree`] and refer to each other by [`MemberId`],
//! so there are no parent/child reference cycles to manage. A second table maps each lowercased
//! name to its id, which makes lookups case-insensitive.
//!
//! # Examples
//!
//! ```
//! use ordered_bst::family::{FamilyTree, MemberEdit};
//!
//! let mut tree = FamilyTree::with_root("John Smith");
//! tree.add_member("Alice Smith", Some("John Smith"), Some("Daughter"))?;
//! tree.add_member("Charlie Smith", Some("alice smith"), Some("Grandson"))?;
//!
//! assert_eq!(tree.len(), 3);
//! assert_eq!(tree.parent_of("Charlie Smith"), Some("Alice Smith"));
//!
//! tree.edit_member(
//!     "Alice Smith",
//!     MemberEdit {
//!         birth_date: Some("1990-04-01".into()),
//!         ..MemberEdit::default()
//!     },
//! )?;
//!
//! // Removing a member takes their descendants too.
//! assert_eq!(tree.remove_member("Alice Smith")?, 2);
//! assert_eq!(tree.members(), vec!["John Smith"]);
//! # Ok::<(), ordered_bst::FamilyTreeError>(())
//! ```

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{FamilyTreeError, Result};

/// Relationship given to whoever sits at the top of the tree.
pub const ROOT_RELATIONSHIP: &str = "Root";

/// Handle to a member inside one [`FamilyTree`]. Ids of removed members may be reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberId(usize);

/// A person in the tree.
#[derive(Clone, Debug)]
pub struct Member {
    name: String,
    birth_date: Option<String>,
    relationship: Option<String>,
    parent: Option<MemberId>,
    children: Vec<MemberId>,
    info: HashMap<String, String>,
}

impl Member {
    fn new(name: &str, relationship: Option<String>, parent: Option<MemberId>) -> Self {
        Self {
            name: name.to_owned(),
            birth_date: None,
            relationship,
            parent,
            children: Vec::new(),
            info: HashMap::new(),
        }
    }

    /// The name as it was given, trimmed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form birth date, if one was recorded.
    pub fn birth_date(&self) -> Option<&str> {
        self.birth_date.as_deref()
    }

    /// How this member relates to their parent, e.g. "Daughter".
    pub fn relationship(&self) -> Option<&str> {
        self.relationship.as_deref()
    }

    /// `None` only for the root.
    pub fn parent(&self) -> Option<MemberId> {
        self.parent
    }

    /// Children in the order they were added.
    pub fn children(&self) -> &[MemberId] {
        &self.children
    }

    /// Looks up a free-form detail such as a birthplace.
    pub fn info(&self, key: &str) -> Option<&str> {
        self.info.get(key).map(String::as_str)
    }

    /// Records a free-form detail, returning the previous value for `key`.
    pub fn add_info(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.info.insert(key.into(), value.into())
    }
}

/// Changes applied by [`FamilyTree::edit_member`]. `None` fields are left alone, as are blank
/// names and relationships.
#[derive(Clone, Debug, Default)]
pub struct MemberEdit {
    /// New name for the member.
    pub name: Option<String>,
    /// Replaces the birth date. A blank string clears it.
    pub birth_date: Option<String>,
    /// Replaces the relationship to the parent.
    pub relationship: Option<String>,
}

/// A rooted tree of named members.
#[derive(Clone, Debug, Default)]
pub struct FamilyTree {
    members: Vec<Option<Member>>,
    vacant: Vec<usize>,
    root: Option<MemberId>,
    index: HashMap<String, MemberId>,
}

/// The shape written by [`FamilyTree::to_json`].
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MemberJson<'a> {
    name: &'a str,
    relationship: &'a str,
    birth_date: &'a str,
    children: Vec<MemberJson<'a>>,
}

fn index_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Trims `s`, treating an all-whitespace string as missing.
fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

impl FamilyTree {
    /// Generates a new, empty `FamilyTree`.
    pub fn new() -> Self {
        Self::default()
    }

    /// A tree holding just `name` as its root. A blank name gives an empty tree.
    pub fn with_root(name: &str) -> Self {
        let mut tree = Self::new();
        // Only a blank name can fail on an empty tree.
        let _ = tree.add_member(name, None, None);
        tree
    }

    /// The number of members.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the tree has no members.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The member at the top of the tree.
    pub fn root(&self) -> Option<&Member> {
        self.root.and_then(|id| self.get(id))
    }

    /// Looks up a member by id.
    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.members.get(id.0).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, id: MemberId) -> Option<&mut Member> {
        self.members.get_mut(id.0).and_then(Option::as_mut)
    }

    fn lookup(&self, name: &str) -> Option<MemberId> {
        self.index.get(&index_key(name)).copied()
    }

    fn require(&self, name: &str) -> Result<MemberId> {
        self.lookup(name)
            .ok_or_else(|| FamilyTreeError::MemberNotFound(name.trim().to_owned()))
    }

    /// Finds a member by name, ignoring case and surrounding whitespace.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.lookup(name).and_then(|id| self.get(id))
    }

    /// Like [`member`][Self::member], for recording extra [`info`][Member::add_info].
    pub fn member_mut(&mut self, name: &str) -> Option<&mut Member> {
        let id = self.lookup(name)?;
        self.get_mut(id)
    }

    /// Adds `name` as the last child of `parent`.
    ///
    /// With no parent (or a blank one), `name` becomes the root if the tree is empty. The first
    /// member of an empty tree always becomes the root, whatever parent was asked for, and gets
    /// the [`ROOT_RELATIONSHIP`].
    pub fn add_member(
        &mut self,
        name: &str,
        parent: Option<&str>,
        relationship: Option<&str>,
    ) -> Result<MemberId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FamilyTreeError::EmptyName);
        }
        let key = index_key(name);
        if self.index.contains_key(&key) {
            return Err(FamilyTreeError::DuplicateMember(name.to_owned()));
        }

        let (parent, relationship) = match (self.root, non_blank(parent)) {
            (None, _) => (None, Some(ROOT_RELATIONSHIP.to_owned())),
            (Some(root), None) => {
                let root_name = self.get(root).map(|m| m.name.clone()).unwrap_or_default();
                return Err(FamilyTreeError::RootExists(root_name));
            }
            (Some(_), Some(parent)) => (
                Some(self.require(parent)?),
                non_blank(relationship).map(str::to_owned),
            ),
        };

        let member = Member::new(name, relationship, parent);
        let id = match self.vacant.pop() {
            Some(slot) => {
                self.members[slot] = Some(member);
                MemberId(slot)
            }
            None => {
                self.members.push(Some(member));
                MemberId(self.members.len() - 1)
            }
        };

        match parent {
            Some(parent) => {
                if let Some(parent) = self.get_mut(parent) {
                    parent.children.push(id);
                }
            }
            None => self.root = Some(id),
        }
        self.index.insert(key, id);

        tracing::debug!(member = name, ?parent, "added family member");
        Ok(id)
    }

    /// Renames a member and/or updates their birth date and relationship.
    ///
    /// Nothing changes if the new name is already used by someone else.
    pub fn edit_member(&mut self, name: &str, edit: MemberEdit) -> Result<()> {
        let id = self.require(name)?;

        let rename = match non_blank(edit.name.as_deref()) {
            Some(new_name) => match self.lookup(new_name) {
                Some(other) if other != id => {
                    return Err(FamilyTreeError::DuplicateMember(new_name.to_owned()));
                }
                _ => Some(new_name.to_owned()),
            },
            None => None,
        };

        let member = self
            .get_mut(id)
            .ok_or_else(|| FamilyTreeError::MemberNotFound(name.trim().to_owned()))?;
        let old_key = index_key(&member.name);
        if let Some(new_name) = &rename {
            member.name = new_name.clone();
        }
        if let Some(birth_date) = edit.birth_date.as_deref() {
            member.birth_date = non_blank(Some(birth_date)).map(str::to_owned);
        }
        if let Some(relationship) = non_blank(edit.relationship.as_deref()) {
            member.relationship = Some(relationship.to_owned());
        }

        if let Some(new_name) = rename {
            self.index.remove(&old_key);
            self.index.insert(index_key(&new_name), id);
        }

        tracing::debug!(member = name.trim(), "edited family member");
        Ok(())
    }

    /// Removes a member together with all of their descendants, returning how many members were
    /// removed. Removing the root empties the tree.
    pub fn remove_member(&mut self, name: &str) -> Result<usize> {
        let id = self.require(name)?;

        if self.root == Some(id) {
            let removed = self.len();
            self.clear();
            return Ok(removed);
        }

        if let Some(parent) = self.get(id).and_then(|m| m.parent) {
            if let Some(parent) = self.get_mut(parent) {
                parent.children.retain(|&child| child != id);
            }
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(member) = self.members.get_mut(next.0).and_then(Option::take) {
                self.index.remove(&index_key(&member.name));
                self.vacant.push(next.0);
                stack.extend(member.children);
                removed += 1;
            }
        }

        tracing::debug!(member = name.trim(), removed, "removed family member");
        Ok(removed)
    }

    /// Removes every member.
    pub fn clear(&mut self) {
        self.members.clear();
        self.vacant.clear();
        self.index.clear();
        self.root = None;
    }

    /// Names of every member, each before their children, siblings in insertion order.
    pub fn members(&self) -> Vec<&str> {
        let mut names = Vec::with_capacity(self.len());
        let mut stack: Vec<MemberId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            if let Some(member) = self.get(id) {
                names.push(member.name());
                stack.extend(member.children.iter().rev());
            }
        }
        names
    }

    /// Names of a member's children. Unknown members have none.
    pub fn children_of(&self, name: &str) -> Vec<&str> {
        self.member(name)
            .map(|m| {
                m.children
                    .iter()
                    .filter_map(|&id| self.get(id))
                    .map(Member::name)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Name of a member's parent. The root and unknown members have none.
    pub fn parent_of(&self, name: &str) -> Option<&str> {
        self.member(name)
            .and_then(|m| m.parent)
            .and_then(|id| self.get(id))
            .map(Member::name)
    }

    /// Draws the tree with box-drawing connectors, followed by the member count.
    pub fn render(&self) -> String {
        let root = match self.root {
            Some(root) => root,
            None => return String::from("Family tree is empty."),
        };

        let mut out = String::from("Family Tree Structure:\n======================\n");
        self.render_member(root, "", true, &mut out);
        out.push_str(&format!("\nTotal family members: {}", self.len()));
        out
    }

    fn render_member(&self, id: MemberId, prefix: &str, is_last: bool, out: &mut String) {
        let member = match self.get(id) {
            Some(member) => member,
            None => return,
        };

        out.push_str(prefix);
        out.push_str(if is_last { "└── " } else { "├── " });
        out.push_str(&member.name);
        if let Some(birth_date) = member.birth_date() {
            out.push_str(&format!(" ({})", birth_date));
        }
        match member.relationship() {
            Some(relationship) if relationship != ROOT_RELATIONSHIP => {
                out.push_str(&format!(" [{}]", relationship));
            }
            _ => {}
        }
        out.push('\n');

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        let last = member.children.len().saturating_sub(1);
        for (i, &child) in member.children.iter().enumerate() {
            self.render_member(child, &child_prefix, i == last, out);
        }
    }

    /// Nested JSON objects with `name`, `relationship`, `birthDate` and `children` keys. Missing
    /// fields are empty strings and an empty tree is `{}`.
    pub fn to_json(&self) -> Result<String> {
        match self.root.and_then(|root| self.json_member(root)) {
            Some(root) => Ok(serde_json::to_string(&root)?),
            None => Ok(String::from("{}")),
        }
    }

    fn json_member(&self, id: MemberId) -> Option<MemberJson<'_>> {
        let member = self.get(id)?;
        Some(MemberJson {
            name: &member.name,
            relationship: member.relationship().unwrap_or_default(),
            birth_date: member.birth_date().unwrap_or_default(),
            children: member
                .children
                .iter()
                .filter_map(|&child| self.json_member(child))
                .collect(),
        })
    }
}
