// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SnapshotHost - ModelHost implementation over a model snapshot

use crate::journal::{HostCall, HostCallKind};
use crate::snapshot::{ModelSnapshot, SnapshotElement};
use crate::{Result, SnapshotError};

use futures::future::{self, BoxFuture};
use parking_lot::Mutex;
use qto_check_model::{
    ElementHandle, ElementScope, HostError, ModelHost, PropertyValue, SelectionSetHandle,
    ValueType, ELEMENT_ID_SEPARATOR, IFC_TYPE_OBJECT_PROPERTY, IFC_TYPE_PROPERTY,
};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A selection set created through the host
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    pub name: String,
    pub ids: Vec<String>,
}

/// Viewer-side state produced by host calls
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostState {
    /// Identifiers of the elements left visible by the last "show only" call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<Vec<String>>,
    /// Selection sets in creation order
    #[serde(rename = "selectionSets")]
    pub selection_sets: Vec<SelectionSet>,
}

#[derive(Default)]
struct Inner {
    visible: Option<Vec<ElementHandle>>,
    selection_sets: Vec<SelectionSet>,
    calls: Vec<HostCall>,
    /// Kind -> number of calls of that kind that succeed before failures start
    failures: FxHashMap<HostCallKind, usize>,
    counts: FxHashMap<HostCallKind, usize>,
}

/// In-memory host backed by a [`ModelSnapshot`]
///
/// Element handles are positions in the snapshot. Reads never change the
/// snapshot; "show only" and selection-set calls update in-memory viewer
/// state that can be inspected with [`SnapshotHost::state`].
///
/// All calls complete immediately. They are recorded in issue order in a
/// journal, which tests use to assert call counts and ordering.
pub struct SnapshotHost {
    elements: Vec<SnapshotElement>,
    inner: Mutex<Inner>,
}

impl SnapshotHost {
    /// Create a host over a snapshot
    pub fn new(snapshot: ModelSnapshot) -> Self {
        Self::from_elements(snapshot.elements)
    }

    /// Create a host over a list of elements
    pub fn from_elements(elements: Vec<SnapshotElement>) -> Self {
        Self {
            elements,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Parse a snapshot from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        ModelSnapshot::from_json(content).map(Self::new)
    }

    /// Load a snapshot file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        ModelSnapshot::load(path).map(Self::new)
    }

    /// Handle of the element with the given identifier
    pub fn handle_of(&self, id: &str) -> Option<ElementHandle> {
        self.elements
            .iter()
            .position(|e| e.id == id)
            .map(|index| ElementHandle(index as u64))
    }

    /// Make calls of `kind` fail from now on
    pub fn fail_on(&self, kind: HostCallKind) {
        let mut inner = self.inner.lock();
        let seen = inner.counts.get(&kind).copied().unwrap_or(0);
        inner.failures.insert(kind, seen);
    }

    /// Let `successes` more calls of `kind` succeed, then fail the rest
    pub fn fail_after(&self, kind: HostCallKind, successes: usize) {
        let mut inner = self.inner.lock();
        let seen = inner.counts.get(&kind).copied().unwrap_or(0);
        inner.failures.insert(kind, seen + successes);
    }

    /// Stop injecting failures
    pub fn clear_failures(&self) {
        self.inner.lock().failures.clear();
    }

    /// All calls issued so far, in order
    pub fn calls(&self) -> Vec<HostCall> {
        self.inner.lock().calls.clone()
    }

    /// Number of calls of a kind issued so far
    pub fn call_count(&self, kind: HostCallKind) -> usize {
        self.inner.lock().counts.get(&kind).copied().unwrap_or(0)
    }

    /// Number of property reads of `name` on `element`
    pub fn property_queries(&self, element: ElementHandle, name: &str) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|call| {
                matches!(call, HostCall::Property { element: e, name: n, .. } if *e == element && n == name)
            })
            .count()
    }

    /// Forget recorded calls (viewer state is kept)
    pub fn clear_journal(&self) {
        let mut inner = self.inner.lock();
        inner.calls.clear();
        inner.counts.clear();
    }

    /// Elements left visible by the last "show only" call
    pub fn visible(&self) -> Option<Vec<ElementHandle>> {
        self.inner.lock().visible.clone()
    }

    /// Selection sets in creation order
    pub fn selection_sets(&self) -> Vec<SelectionSet> {
        self.inner.lock().selection_sets.clone()
    }

    /// Viewer state with element handles resolved to identifiers
    pub fn state(&self) -> HostState {
        let inner = self.inner.lock();
        HostState {
            visible: inner.visible.as_ref().map(|handles| {
                handles
                    .iter()
                    .filter_map(|h| self.element(*h).ok())
                    .map(|e| e.id.clone())
                    .collect()
            }),
            selection_sets: inner.selection_sets.clone(),
        }
    }

    /// Write the viewer state as pretty JSON
    pub fn write_state(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.state())?;
        std::fs::write(path, json).map_err(|e| SnapshotError::io(path, e))
    }

    fn element(&self, handle: ElementHandle) -> qto_check_model::Result<&SnapshotElement> {
        usize::try_from(handle.0)
            .ok()
            .and_then(|index| self.elements.get(index))
            .ok_or(HostError::ElementNotFound(handle))
    }

    /// Record a call and apply failure injection
    fn record(&self, call: HostCall) -> qto_check_model::Result<()> {
        let kind = call.kind();
        let mut inner = self.inner.lock();
        inner.calls.push(call);
        let count = inner.counts.entry(kind).or_insert(0);
        let index = *count;
        *count += 1;
        match inner.failures.get(&kind) {
            Some(&allowed) if index >= allowed => {
                log::debug!("Injected failure for {} call #{}", kind.name(), index);
                Err(HostError::rejected(kind.name(), "injected failure"))
            }
            _ => Ok(()),
        }
    }

    fn read_property(
        &self,
        handle: ElementHandle,
        name: &str,
        value_type: ValueType,
    ) -> qto_check_model::Result<Option<PropertyValue>> {
        let element = self.element(handle)?;

        let raw = match name {
            IFC_TYPE_PROPERTY if element.ifc_type.is_some() => {
                element.ifc_type.clone().map(PropertyValue::Text)
            }
            IFC_TYPE_OBJECT_PROPERTY if element.ifc_type_object.is_some() => {
                element.ifc_type_object.clone().map(PropertyValue::Text)
            }
            _ => element.properties.get(name).cloned().flatten(),
        };

        Ok(raw.map(|value| match (value_type, value) {
            (ValueType::String, PropertyValue::Double(v)) => PropertyValue::Text(v.to_string()),
            (ValueType::Double, PropertyValue::Text(s)) => match s.trim().parse::<f64>() {
                Ok(v) => PropertyValue::Double(v),
                Err(_) => PropertyValue::Text(s),
            },
            (_, value) => value,
        }))
    }
}

impl ModelHost for SnapshotHost {
    fn all_elements(
        &self,
        scope: ElementScope,
    ) -> BoxFuture<'_, qto_check_model::Result<Vec<ElementHandle>>> {
        let result = self.record(HostCall::AllElements { scope }).map(|_| {
            self.elements
                .iter()
                .enumerate()
                .filter(|(_, e)| e.domain == scope)
                .map(|(index, _)| ElementHandle(index as u64))
                .collect::<Vec<_>>()
        });
        Box::pin(future::ready(result))
    }

    fn property<'a>(
        &'a self,
        element: ElementHandle,
        name: &'a str,
        value_type: ValueType,
    ) -> BoxFuture<'a, qto_check_model::Result<Option<PropertyValue>>> {
        let result = self
            .record(HostCall::Property {
                element,
                name: name.to_string(),
                value_type,
            })
            .and_then(|_| self.read_property(element, name, value_type));
        Box::pin(future::ready(result))
    }

    fn show_elements_only<'a>(
        &'a self,
        elements: &'a [ElementHandle],
    ) -> BoxFuture<'a, qto_check_model::Result<()>> {
        let result = self
            .record(HostCall::ShowElementsOnly {
                elements: elements.to_vec(),
            })
            .and_then(|_| {
                for handle in elements {
                    self.element(*handle)?;
                }
                self.inner.lock().visible = Some(elements.to_vec());
                Ok(())
            });
        Box::pin(future::ready(result))
    }

    fn element_id(&self, element: ElementHandle) -> BoxFuture<'_, qto_check_model::Result<String>> {
        let result = self
            .record(HostCall::ElementId { element })
            .and_then(|_| self.element(element).map(|e| e.id.clone()));
        Box::pin(future::ready(result))
    }

    fn create_selection_set<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, qto_check_model::Result<SelectionSetHandle>> {
        let result = self
            .record(HostCall::CreateSelectionSet {
                name: name.to_string(),
            })
            .map(|_| {
                let mut inner = self.inner.lock();
                inner.selection_sets.push(SelectionSet {
                    name: name.to_string(),
                    ids: Vec::new(),
                });
                SelectionSetHandle((inner.selection_sets.len() - 1) as u64)
            });
        Box::pin(future::ready(result))
    }

    fn add_to_selection_set<'a>(
        &'a self,
        set: SelectionSetHandle,
        joined_ids: &'a str,
    ) -> BoxFuture<'a, qto_check_model::Result<()>> {
        let result = self
            .record(HostCall::AddToSelectionSet {
                set,
                joined_ids: joined_ids.to_string(),
            })
            .and_then(|_| {
                let mut inner = self.inner.lock();
                let index = usize::try_from(set.0).unwrap_or(usize::MAX);
                let target = inner
                    .selection_sets
                    .get_mut(index)
                    .ok_or(HostError::SelectionSetNotFound(set))?;
                target.ids.extend(
                    joined_ids
                        .split(ELEMENT_ID_SEPARATOR)
                        .filter(|id| !id.is_empty())
                        .map(str::to_string),
                );
                Ok(())
            });
        Box::pin(future::ready(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::io::Write;

    fn test_host() -> SnapshotHost {
        SnapshotHost::from_elements(vec![
            SnapshotElement::new("wall-1", "IfcWallStandardCase")
                .with_type_object("Basic Wall:Exterior")
                .with_property("Qto_WallBaseQuantities.NetVolume", 12.5)
                .with_property("Volume", "3.25")
                .with_property("Mark", "W1")
                .with_null_property("Length"),
            SnapshotElement::new("slab-1", "IfcSlab").with_property("Area", "n/a"),
        ])
    }

    #[test]
    fn test_enumerate_elements() {
        let host = test_host();
        let elements = block_on(host.all_elements(ElementScope::Geometry)).unwrap();
        assert_eq!(elements, vec![ElementHandle(0), ElementHandle(1)]);
        assert_eq!(host.handle_of("slab-1"), Some(ElementHandle(1)));
        assert_eq!(host.handle_of("roof-1"), None);
    }

    #[test]
    fn test_typed_property_reads() {
        let host = test_host();
        let wall = ElementHandle(0);

        let ty = block_on(host.property(wall, IFC_TYPE_PROPERTY, ValueType::String)).unwrap();
        assert_eq!(ty, Some(PropertyValue::Text("IfcWallStandardCase".into())));

        let volume = block_on(host.property(
            wall,
            "Qto_WallBaseQuantities.NetVolume",
            ValueType::Double,
        ))
        .unwrap();
        assert_eq!(volume, Some(PropertyValue::Double(12.5)));

        // Numeric text is parsed for double requests
        let volume = block_on(host.property(wall, "Volume", ValueType::Double)).unwrap();
        assert_eq!(volume, Some(PropertyValue::Double(3.25)));

        // Numbers are rendered for string requests
        let volume = block_on(host.string_property(wall, "Qto_WallBaseQuantities.NetVolume"));
        assert_eq!(volume.unwrap(), "12.5");

        // Explicit null and missing keys are both absent
        assert_eq!(
            block_on(host.property(wall, "Length", ValueType::Double)).unwrap(),
            None
        );
        assert_eq!(
            block_on(host.property(wall, "Width", ValueType::Double)).unwrap(),
            None
        );

        // Unparsable text stays text
        let area = block_on(host.property(ElementHandle(1), "Area", ValueType::Double)).unwrap();
        assert_eq!(area, Some(PropertyValue::Text("n/a".into())));

        // Missing type object reads as empty
        let object = block_on(host.string_property(ElementHandle(1), IFC_TYPE_OBJECT_PROPERTY));
        assert_eq!(object.unwrap(), "");
    }

    #[test]
    fn test_unknown_element() {
        let host = test_host();
        let err = block_on(host.element_id(ElementHandle(9))).unwrap_err();
        assert_eq!(err, HostError::ElementNotFound(ElementHandle(9)));
    }

    #[test]
    fn test_viewer_state() {
        let host = test_host();
        assert!(host.visible().is_none());

        block_on(host.show_elements_only(&[ElementHandle(1)])).unwrap();
        let set = block_on(host.create_selection_set("Slab with undefined Area")).unwrap();
        block_on(host.add_to_selection_set(set, "slab-1;wall-1")).unwrap();
        // Same name twice gives two sets
        block_on(host.create_selection_set("Slab with undefined Area")).unwrap();

        let state = host.state();
        assert_eq!(state.visible, Some(vec!["slab-1".to_string()]));
        assert_eq!(state.selection_sets.len(), 2);
        assert_eq!(state.selection_sets[0].ids, vec!["slab-1", "wall-1"]);
        assert!(state.selection_sets[1].ids.is_empty());

        let err = block_on(host.add_to_selection_set(SelectionSetHandle(7), "x")).unwrap_err();
        assert_eq!(err, HostError::SelectionSetNotFound(SelectionSetHandle(7)));
    }

    #[test]
    fn test_journal_and_counts() {
        let host = test_host();
        let wall = ElementHandle(0);
        block_on(host.property(wall, "Volume", ValueType::Double)).unwrap();
        block_on(host.property(wall, "Volume", ValueType::Double)).unwrap();
        block_on(host.element_id(wall)).unwrap();

        assert_eq!(host.property_queries(wall, "Volume"), 2);
        assert_eq!(host.call_count(HostCallKind::Property), 2);
        assert_eq!(host.calls()[2], HostCall::ElementId { element: wall });

        host.clear_journal();
        assert!(host.calls().is_empty());
        assert_eq!(host.call_count(HostCallKind::Property), 0);
    }

    #[test]
    fn test_failure_injection() {
        let host = test_host();
        host.fail_after(HostCallKind::CreateSelectionSet, 1);

        assert!(block_on(host.create_selection_set("first")).is_ok());
        let err = block_on(host.create_selection_set("second")).unwrap_err();
        assert!(matches!(err, HostError::Rejected { ref call, .. } if call == "create_selection_set"));
        assert_eq!(host.selection_sets().len(), 1);

        host.clear_failures();
        assert!(block_on(host.create_selection_set("third")).is_ok());

        host.fail_on(HostCallKind::AllElements);
        assert!(block_on(host.all_elements(ElementScope::Geometry)).is_err());
    }

    #[test]
    fn test_load_and_write_state() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"elements": [{"id": "a", "ifcType": "IfcBeam"}]}"#)
            .unwrap();
        let host = SnapshotHost::load(file.path()).unwrap();

        block_on(host.show_elements_only(&[ElementHandle(0)])).unwrap();
        let set = block_on(host.create_selection_set("Beam with undefined Length")).unwrap();
        block_on(host.add_to_selection_set(set, "a")).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("state.json");
        host.write_state(&out).unwrap();

        let written: HostState =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written, host.state());
        assert_eq!(written.selection_sets[0].name, "Beam with undefined Length");
    }
}
