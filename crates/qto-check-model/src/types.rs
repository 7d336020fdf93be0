// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types crossing the host boundary

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator the host expects between element identifiers in bulk calls
pub const ELEMENT_ID_SEPARATOR: char = ';';

/// Opaque element handle
///
/// Produced by the host when enumerating elements. The engine never builds
/// or alters handles; it only passes them back to the host.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default)]
pub struct ElementHandle(pub u64);

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ElementHandle {
    fn from(raw: u64) -> Self {
        ElementHandle(raw)
    }
}

/// Opaque handle to a host-managed selection set
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default)]
pub struct SelectionSetHandle(pub u64);

impl fmt::Display for SelectionSetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "set#{}", self.0)
    }
}

/// Domain an element enumeration is scoped to
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ElementScope {
    /// Elements carrying geometry
    #[default]
    Geometry,
}

impl ElementScope {
    /// Wire name of the scope
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementScope::Geometry => "geometry",
        }
    }
}

impl fmt::Display for ElementScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested type of a property value
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ValueType {
    /// `xs:string`
    #[serde(rename = "xs:string")]
    String,
    /// `xs:double`
    #[serde(rename = "xs:double")]
    Double,
}

impl ValueType {
    /// XML schema datatype name used by host APIs
    pub fn xsd_name(&self) -> &'static str {
        match self {
            ValueType::String => "xs:string",
            ValueType::Double => "xs:double",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.xsd_name())
    }
}

/// A property value as returned by the host
///
/// Hosts answer double requests with [`PropertyValue::Double`] when they can;
/// some hand back the raw text instead, which is why text can still be asked
/// for a number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Double(f64),
    Text(String),
}

impl PropertyValue {
    /// Get as text (numbers are not formatted)
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            PropertyValue::Double(_) => None,
        }
    }

    /// Get as number, parsing text if necessary
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Double(v) => Some(*v),
            PropertyValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Render the value for display and logging
    pub fn display(&self) -> String {
        match self {
            PropertyValue::Double(v) => v.to_string(),
            PropertyValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Double(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}
