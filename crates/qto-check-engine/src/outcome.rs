// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Check outcomes and reports

use crate::ResultGroups;
use qto_check_model::SelectionSetHandle;
use serde::Serialize;
use std::fmt;

/// Overall result of one check run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckOutcome {
    /// No element matched the category
    NoElements,
    /// Elements matched and every quantity was fine
    AllOk,
    /// At least one quantity was zero, negative or undefined
    IssuesFound,
}

impl CheckOutcome {
    /// Wire tag of the outcome
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckOutcome::NoElements => "noElements",
            CheckOutcome::AllOk => "allOk",
            CheckOutcome::IssuesFound => "issuesFound",
        }
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detailed result of one check run
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    /// Category name as passed to the run
    pub category: String,
    pub outcome: CheckOutcome,
    /// Elements matching the category
    pub matched_elements: usize,
    /// Element/quantity pairs evaluated
    pub evaluated_quantities: usize,
    /// Offending elements per group, in first-issue order
    pub groups: ResultGroups,
    /// Selection sets created on the host, one per group
    pub selection_sets: Vec<SelectionSetHandle>,
}

impl CheckReport {
    pub(crate) fn no_elements(category: &str) -> Self {
        Self {
            category: category.to_string(),
            outcome: CheckOutcome::NoElements,
            matched_elements: 0,
            evaluated_quantities: 0,
            groups: ResultGroups::new(),
            selection_sets: Vec::new(),
        }
    }
}
