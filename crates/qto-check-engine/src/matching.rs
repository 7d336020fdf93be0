// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Matching elements to a category by type name

use qto_check_model::{
    ElementHandle, ModelHost, Result, IFC_TYPE_OBJECT_PROPERTY, IFC_TYPE_PROPERTY,
};

/// Case-folded type strings of an element
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementTypeInfo {
    pub ifc_type: String,
    pub ifc_type_object: String,
}

impl ElementTypeInfo {
    /// Build from raw type strings, folding case
    pub fn new(ifc_type: &str, ifc_type_object: &str) -> Self {
        Self {
            ifc_type: ifc_type.to_lowercase(),
            ifc_type_object: ifc_type_object.to_lowercase(),
        }
    }

    /// Read both type strings of an element from the host
    ///
    /// Missing values read as empty strings.
    pub async fn fetch(host: &dyn ModelHost, element: ElementHandle) -> Result<Self> {
        let ifc_type = host.string_property(element, IFC_TYPE_PROPERTY).await?;
        let ifc_type_object = host.string_property(element, IFC_TYPE_OBJECT_PROPERTY).await?;
        Ok(Self::new(&ifc_type, &ifc_type_object))
    }
}

/// Case-insensitive substring matcher for a category name
///
/// `"wall"` matches `IfcWallStandardCase`, `IfcCurtainWall` and an object type
/// of `Drywall Partition` alike.
#[derive(Clone, Debug)]
pub struct CategoryMatcher {
    needle: String,
}

impl CategoryMatcher {
    /// Create a matcher for a category name
    pub fn new(category: &str) -> Self {
        Self {
            needle: category.to_lowercase(),
        }
    }

    /// Whether either type string contains the category name
    pub fn matches(&self, info: &ElementTypeInfo) -> bool {
        info.ifc_type.contains(&self.needle) || info.ifc_type_object.contains(&self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_substring() {
        let matcher = CategoryMatcher::new("Wall");
        assert!(matcher.matches(&ElementTypeInfo::new("IfcWallStandardCase", "")));
        assert!(matcher.matches(&ElementTypeInfo::new("IFCCURTAINWALL", "")));
        assert!(matcher.matches(&ElementTypeInfo::new("", "Drywall Partition")));
        assert!(!matcher.matches(&ElementTypeInfo::new("IfcSlab", "Floor:Generic")));
    }

    #[test]
    fn test_either_string_matches() {
        let matcher = CategoryMatcher::new("beam");
        assert!(matcher.matches(&ElementTypeInfo::new("IfcMember", "Steel Beam HEA200")));
        assert!(matcher.matches(&ElementTypeInfo::new("IfcBeam", "Generic")));
        assert!(!matcher.matches(&ElementTypeInfo::default()));
    }
}
