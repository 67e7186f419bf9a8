//! Role-labeled argument lists and the (currently unused) path map.

use std::collections::BTreeMap;

use super::MentionId;
use crate::document::Edge;

/// A syntactic path leading from a trigger to an argument.
pub type SynPath = Vec<Edge>;

/// Graph traversals leading to each argument, keyed by role.
///
/// Nothing populates this today; see
/// [`construct_paths`](crate::serialization::paths::construct_paths).
pub type Paths = BTreeMap<String, BTreeMap<MentionId, SynPath>>;

/// Ordered map from argument role to the mentions filling it.
///
/// A role maps to a sequence because some events carry several arguments
/// with the same name (a `Binding` can have several themes). Role order and
/// within-role order are exactly the order they were added in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    entries: Vec<(String, Vec<MentionId>)>,
}

impl Arguments {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append `id` to `role`, creating the role at the end if needed.
    pub fn push(&mut self, role: &str, id: MentionId) {
        if let Some((_, ids)) = self.entries.iter_mut().find(|(r, _)| r == role) {
            ids.push(id);
        } else {
            self.entries.push((role.to_owned(), vec![id]));
        }
    }

    /// Set the full list for `role`, replacing any previous list in place.
    pub fn insert(&mut self, role: impl Into<String>, ids: Vec<MentionId>) {
        let role = role.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(r, _)| *r == role) {
            *existing = ids;
        } else {
            self.entries.push((role, ids));
        }
    }

    #[must_use]
    pub fn get(&self, role: &str) -> Option<&[MentionId]> {
        self.entries
            .iter()
            .find(|(r, _)| r == role)
            .map(|(_, ids)| ids.as_slice())
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(role, _)| role.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MentionId])> {
        self.entries
            .iter()
            .map(|(role, ids)| (role.as_str(), ids.as_slice()))
    }

    /// Every argument id, role by role.
    pub fn ids(&self) -> impl Iterator<Item = MentionId> + '_ {
        self.entries.iter().flat_map(|(_, ids)| ids.iter().copied())
    }

    /// Number of roles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Vec<MentionId>)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (String, Vec<MentionId>)>>(iter: I) -> Self {
        let mut args = Self::new();
        for (role, ids) in iter {
            args.insert(role, ids);
        }
        args
    }
}
