// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Catalog of expected base quantities per element category

use crate::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// One expected numeric quantity of a category
///
/// `keys` are alternative property names, probed in order until one of them
/// yields a value (e.g. `Qto_WallBaseQuantities.NetVolume` then `Volume`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuantitySpec {
    /// Alternative property keys, in probing order
    pub keys: Vec<String>,
    /// Label used verbatim in result group names
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl QuantitySpec {
    /// Create a new quantity spec
    pub fn new<I, S>(keys: I, display_name: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            display_name: display_name.into(),
        }
    }
}

/// A named category and its expected quantities
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Category name, matched case-insensitively against element types
    pub name: String,
    /// Quantities to check, in catalog order
    pub quantities: Vec<QuantitySpec>,
}

/// Non-fatal catalog findings
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogWarning {
    /// Category lists no quantities; its check can never report issues
    NoQuantities { category: String },
    /// A quantity has no keys to probe; it always resolves to undefined
    NoKeys { category: String, index: usize },
    /// A quantity has an empty display name
    EmptyDisplayName { category: String, index: usize },
    /// The same key appears twice in one quantity
    DuplicateKey {
        category: String,
        index: usize,
        key: String,
    },
}

impl fmt::Display for CatalogWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogWarning::NoQuantities { category } => {
                write!(f, "{category}: no quantities listed")
            }
            CatalogWarning::NoKeys { category, index } => {
                write!(f, "{category}[{index}]: no keys to probe")
            }
            CatalogWarning::EmptyDisplayName { category, index } => {
                write!(f, "{category}[{index}]: empty displayName")
            }
            CatalogWarning::DuplicateKey {
                category,
                index,
                key,
            } => write!(f, "{category}[{index}]: key {key:?} listed twice"),
        }
    }
}

/// Expected base quantities, keyed by category name
///
/// Source order is preserved so callers can offer one check per category in
/// the order the catalog file lists them.
///
/// The file format is a JSON object mapping category names to arrays of
/// quantity specs:
///
/// ```json
/// {
///   "Wall": [
///     { "keys": ["Qto_WallBaseQuantities.NetVolume", "Volume"], "displayName": "Volume" }
///   ]
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a category
    pub fn insert(&mut self, name: impl Into<String>, quantities: Vec<QuantitySpec>) {
        let name = name.into();
        match self.categories.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.quantities = quantities,
            None => self.categories.push(Category { name, quantities }),
        }
    }

    /// Parse a catalog from JSON text
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(content)?;
        let mut catalog = Catalog::new();
        for (name, value) in raw {
            let quantities: Vec<QuantitySpec> = serde_json::from_value(value)?;
            catalog.insert(name, quantities);
        }
        Ok(catalog)
    }

    /// Load a catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&content)?;
        log::debug!(
            "Loaded catalog {} with {} categories",
            path.display(),
            catalog.len()
        );
        Ok(catalog)
    }

    /// Load a catalog file, falling back to an empty catalog on failure
    ///
    /// The failure is logged; an empty catalog simply offers no checks.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(catalog) => catalog,
            Err(err) => {
                log::error!("Could not load base quantities catalog: {err}");
                Self::default()
            }
        }
    }

    /// Category names in catalog order
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// Quantities of a category (exact name)
    pub fn get(&self, name: &str) -> Option<&[QuantitySpec]> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.quantities.as_slice())
    }

    /// Find a category by name, ignoring case
    ///
    /// An exact match wins over a case-insensitive one.
    pub fn find(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .or_else(|| {
                let folded = name.to_lowercase();
                self.categories
                    .iter()
                    .find(|c| c.name.to_lowercase() == folded)
            })
    }

    /// Iterate over categories in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the catalog has no categories
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Collect non-fatal findings about the catalog content
    pub fn lint(&self) -> Vec<CatalogWarning> {
        let mut warnings = Vec::new();
        for category in &self.categories {
            if category.quantities.is_empty() {
                warnings.push(CatalogWarning::NoQuantities {
                    category: category.name.clone(),
                });
            }
            for (index, spec) in category.quantities.iter().enumerate() {
                if spec.keys.is_empty() {
                    warnings.push(CatalogWarning::NoKeys {
                        category: category.name.clone(),
                        index,
                    });
                }
                if spec.display_name.is_empty() {
                    warnings.push(CatalogWarning::EmptyDisplayName {
                        category: category.name.clone(),
                        index,
                    });
                }
                for (i, key) in spec.keys.iter().enumerate() {
                    if spec.keys[..i].contains(key) {
                        warnings.push(CatalogWarning::DuplicateKey {
                            category: category.name.clone(),
                            index,
                            key: key.clone(),
                        });
                    }
                }
            }
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TEST_CATALOG: &str = r#"{
        "Wall": [
            { "keys": ["Qto_WallBaseQuantities.NetVolume", "Volume"], "displayName": "Volume" },
            { "keys": ["Qto_WallBaseQuantities.NetSideArea"], "displayName": "NetSideArea" }
        ],
        "Slab": [
            { "keys": ["Qto_SlabBaseQuantities.NetArea", "Area"], "displayName": "Area" }
        ],
        "Beam": []
    }"#;

    #[test]
    fn test_from_json_preserves_order() {
        let catalog = Catalog::from_json(TEST_CATALOG).unwrap();
        let names: Vec<_> = catalog.category_names().collect();
        assert_eq!(names, vec!["Wall", "Slab", "Beam"]);

        let wall = catalog.get("Wall").unwrap();
        assert_eq!(wall.len(), 2);
        assert_eq!(
            wall[0].keys,
            vec!["Qto_WallBaseQuantities.NetVolume", "Volume"]
        );
        assert_eq!(wall[0].display_name, "Volume");
        assert!(catalog.get("Beam").unwrap().is_empty());
    }

    #[test]
    fn test_find_ignores_case() {
        let catalog = Catalog::from_json(TEST_CATALOG).unwrap();
        assert_eq!(catalog.find("slab").unwrap().name, "Slab");
        assert!(catalog.get("slab").is_none());
        assert!(catalog.find("Roof").is_none());
    }

    #[test]
    fn test_malformed_catalog() {
        assert!(matches!(
            Catalog::from_json("[1, 2]"),
            Err(CatalogError::Json(_))
        ));
        assert!(Catalog::from_json(r#"{"Wall": [{"keys": "Volume"}]}"#).is_err());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TEST_CATALOG.as_bytes()).unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_load_or_empty_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("Basequantities.json");

        assert!(matches!(
            Catalog::load(&missing),
            Err(CatalogError::Io { .. })
        ));
        let catalog = Catalog::load_or_empty(&missing);
        assert!(catalog.is_empty());
        assert_eq!(catalog.category_names().count(), 0);
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut catalog = Catalog::new();
        catalog.insert("Wall", vec![QuantitySpec::new(["Volume"], "Volume")]);
        catalog.insert("Wall", vec![QuantitySpec::new(["Area"], "Area")]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("Wall").unwrap()[0].display_name, "Area");
    }

    #[test]
    fn test_lint() {
        let catalog = Catalog::from_json(
            r#"{
                "Wall": [
                    { "keys": [], "displayName": "Volume" },
                    { "keys": ["Area", "Area"], "displayName": "" }
                ],
                "Beam": []
            }"#,
        )
        .unwrap();

        let warnings = catalog.lint();
        assert_eq!(
            warnings,
            vec![
                CatalogWarning::NoKeys {
                    category: "Wall".into(),
                    index: 0
                },
                CatalogWarning::EmptyDisplayName {
                    category: "Wall".into(),
                    index: 1
                },
                CatalogWarning::DuplicateKey {
                    category: "Wall".into(),
                    index: 1,
                    key: "Area".into()
                },
                CatalogWarning::NoQuantities {
                    category: "Beam".into()
                },
            ]
        );
        assert_eq!(warnings[0].to_string(), "Wall[0]: no keys to probe");
    }
}
