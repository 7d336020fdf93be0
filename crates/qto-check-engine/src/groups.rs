// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named result groups collected during a check

use crate::QuantityStatus;
use qto_check_model::ELEMENT_ID_SEPARATOR;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Name of the group collecting elements whose `display_name` quantity has `status`
///
/// The category is used as passed in and the display name verbatim, e.g.
/// `"Wall with negative Volume"`.
pub fn group_name(category: &str, status: QuantityStatus, display_name: &str) -> String {
    format!("{} with {} {}", category, status.as_str(), display_name)
}

/// A named bucket of element identifiers
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResultGroup {
    pub name: String,
    pub ids: Vec<String>,
}

impl ResultGroup {
    /// Identifiers joined the way hosts take them in bulk
    pub fn joined_ids(&self) -> String {
        self.ids.join(&ELEMENT_ID_SEPARATOR.to_string())
    }
}

/// Result groups in first-use order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultGroups {
    groups: Vec<ResultGroup>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

impl ResultGroups {
    /// Create an empty set of groups
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an identifier to a group, creating the group on first use
    pub fn push(&mut self, name: String, id: impl Into<String>) {
        let slot = match self.index.get(&name) {
            Some(&slot) => slot,
            None => {
                self.groups.push(ResultGroup {
                    name: name.clone(),
                    ids: Vec::new(),
                });
                self.index.insert(name, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[slot].ids.push(id.into());
    }

    /// Get a group by name
    pub fn get(&self, name: &str) -> Option<&ResultGroup> {
        self.index.get(name).map(|&slot| &self.groups[slot])
    }

    /// Iterate over groups in first-use order
    pub fn iter(&self) -> std::slice::Iter<'_, ResultGroup> {
        self.groups.iter()
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no group was created
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of identifiers across all groups
    pub fn total_entries(&self) -> usize {
        self.groups.iter().map(|g| g.ids.len()).sum()
    }
}

impl<'a> IntoIterator for &'a ResultGroups {
    type Item = &'a ResultGroup;
    type IntoIter = std::slice::Iter<'a, ResultGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
