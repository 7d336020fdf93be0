// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Record of host calls

use qto_check_model::{ElementHandle, ElementScope, SelectionSetHandle, ValueType};

/// A host call as issued by the caller
#[derive(Clone, Debug, PartialEq)]
pub enum HostCall {
    AllElements {
        scope: ElementScope,
    },
    Property {
        element: ElementHandle,
        name: String,
        value_type: ValueType,
    },
    ShowElementsOnly {
        elements: Vec<ElementHandle>,
    },
    ElementId {
        element: ElementHandle,
    },
    CreateSelectionSet {
        name: String,
    },
    AddToSelectionSet {
        set: SelectionSetHandle,
        joined_ids: String,
    },
}

impl HostCall {
    /// Kind of this call
    pub fn kind(&self) -> HostCallKind {
        match self {
            HostCall::AllElements { .. } => HostCallKind::AllElements,
            HostCall::Property { .. } => HostCallKind::Property,
            HostCall::ShowElementsOnly { .. } => HostCallKind::ShowElementsOnly,
            HostCall::ElementId { .. } => HostCallKind::ElementId,
            HostCall::CreateSelectionSet { .. } => HostCallKind::CreateSelectionSet,
            HostCall::AddToSelectionSet { .. } => HostCallKind::AddToSelectionSet,
        }
    }
}

/// Host call kinds, used for counting and failure injection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostCallKind {
    AllElements,
    Property,
    ShowElementsOnly,
    ElementId,
    CreateSelectionSet,
    AddToSelectionSet,
}

impl HostCallKind {
    /// Name of the `ModelHost` method behind the call
    pub fn name(&self) -> &'static str {
        match self {
            HostCallKind::AllElements => "all_elements",
            HostCallKind::Property => "property",
            HostCallKind::ShowElementsOnly => "show_elements_only",
            HostCallKind::ElementId => "element_id",
            HostCallKind::CreateSelectionSet => "create_selection_set",
            HostCallKind::AddToSelectionSet => "add_to_selection_set",
        }
    }
}
