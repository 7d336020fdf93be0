// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON model snapshot format

use crate::{Result, SnapshotError};
use qto_check_model::{ElementScope, PropertyValue};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One element of a model snapshot
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotElement {
    /// Stable identifier (usually the IFC GlobalId)
    pub id: String,
    /// IFC class, e.g. `IfcWallStandardCase`
    #[serde(rename = "ifcType", default, skip_serializing_if = "Option::is_none")]
    pub ifc_type: Option<String>,
    /// Object type, e.g. `Basic Wall:Interior - 100mm`
    #[serde(
        rename = "ifcTypeObject",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ifc_type_object: Option<String>,
    /// Enumeration domain the element belongs to
    #[serde(default)]
    pub domain: ElementScope,
    /// Property values keyed by name; `null` means present but undefined
    #[serde(default)]
    pub properties: FxHashMap<String, Option<PropertyValue>>,
}

impl SnapshotElement {
    /// Create a geometry element with the given id and IFC class
    pub fn new(id: impl Into<String>, ifc_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ifc_type: Some(ifc_type.into()),
            ifc_type_object: None,
            domain: ElementScope::Geometry,
            properties: FxHashMap::default(),
        }
    }

    /// Set the object type
    pub fn with_type_object(mut self, type_object: impl Into<String>) -> Self {
        self.ifc_type_object = Some(type_object.into());
        self
    }

    /// Set a property value
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), Some(value.into()));
        self
    }

    /// Set a property to an explicit null
    pub fn with_null_property(mut self, name: impl Into<String>) -> Self {
        self.properties.insert(name.into(), None);
        self
    }
}

/// A model snapshot: the element population a host would expose
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub elements: Vec<SnapshotElement>,
}

impl ModelSnapshot {
    /// Parse a snapshot from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a snapshot file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SnapshotError::io(path, e))?;
        let snapshot = Self::from_json(&content)?;
        log::debug!(
            "Loaded snapshot {} with {} elements",
            path.display(),
            snapshot.elements.len()
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SNAPSHOT: &str = r#"{
        "elements": [
            {
                "id": "2O2Fr$t4X7Zf8NOew3FLOH",
                "ifcType": "IfcWallStandardCase",
                "ifcTypeObject": "Basic Wall:Interior",
                "properties": {
                    "Qto_WallBaseQuantities.NetVolume": 12.5,
                    "Volume": null,
                    "Comment": "checked"
                }
            },
            { "id": "3cUkl32yn9qRSPvBJVyWYp" }
        ]
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let snapshot = ModelSnapshot::from_json(TEST_SNAPSHOT).unwrap();
        assert_eq!(snapshot.elements.len(), 2);

        let wall = &snapshot.elements[0];
        assert_eq!(wall.ifc_type.as_deref(), Some("IfcWallStandardCase"));
        assert_eq!(wall.domain, ElementScope::Geometry);
        assert_eq!(
            wall.properties["Qto_WallBaseQuantities.NetVolume"],
            Some(PropertyValue::Double(12.5))
        );
        assert_eq!(wall.properties["Volume"], None);
        assert_eq!(
            wall.properties["Comment"],
            Some(PropertyValue::Text("checked".into()))
        );

        let bare = &snapshot.elements[1];
        assert!(bare.ifc_type.is_none());
        assert!(bare.properties.is_empty());
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let err = ModelSnapshot::from_json(r#"{"elements": [{"ifcType": "IfcWall"}]}"#);
        assert!(matches!(err, Err(SnapshotError::Json(_))));
    }
}
