// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host capability trait
//!
//! The host application owns the model and the viewer state. Everything the
//! check engine does to the outside world goes through [`ModelHost`].

use crate::{ElementHandle, ElementScope, PropertyValue, Result, SelectionSetHandle, ValueType};
use futures::future::BoxFuture;

/// Property name holding the IFC class of an element (e.g. `IfcWallStandardCase`)
pub const IFC_TYPE_PROPERTY: &str = "ifcType";

/// Property name holding the object type of an element (e.g. `Basic Wall:Interior`)
pub const IFC_TYPE_OBJECT_PROPERTY: &str = "ifcTypeObject";

/// Model access and viewer control provided by a BIM host
///
/// Every call is asynchronous. Callers are expected to await one call before
/// issuing the next: hosts are stateful and observe visibility and selection
/// changes in the order they arrive.
///
/// The trait is object safe so hosts can be injected as `Arc<dyn ModelHost>`.
///
/// # Example
///
/// ```ignore
/// use qto_check_model::{ModelHost, ElementScope, ValueType};
///
/// async fn count_walls(host: &dyn ModelHost) -> qto_check_model::Result<usize> {
///     let mut walls = 0;
///     for element in host.all_elements(ElementScope::Geometry).await? {
///         let ty = host.property(element, "ifcType", ValueType::String).await?;
///         if ty.as_ref().and_then(|v| v.as_text()) == Some("IfcWall") {
///             walls += 1;
///         }
///     }
///     Ok(walls)
/// }
/// ```
pub trait ModelHost: Send + Sync {
    /// Enumerate every element in the given scope, in host order
    fn all_elements(&self, scope: ElementScope) -> BoxFuture<'_, Result<Vec<ElementHandle>>>;

    /// Read a typed property of an element
    ///
    /// # Returns
    /// `Ok(None)` when the element has no defined value for `name`
    fn property<'a>(
        &'a self,
        element: ElementHandle,
        name: &'a str,
        value_type: ValueType,
    ) -> BoxFuture<'a, Result<Option<PropertyValue>>>;

    /// Restrict the visible elements to exactly `elements`
    fn show_elements_only<'a>(&'a self, elements: &'a [ElementHandle]) -> BoxFuture<'a, Result<()>>;

    /// Stable identifier string of an element, used in selection sets
    fn element_id(&self, element: ElementHandle) -> BoxFuture<'_, Result<String>>;

    /// Create a new named selection set
    ///
    /// Hosts are not required to reject duplicate names; creating the same
    /// name twice yields two sets.
    fn create_selection_set<'a>(&'a self, name: &'a str)
        -> BoxFuture<'a, Result<SelectionSetHandle>>;

    /// Add identifiers to a selection set
    ///
    /// # Arguments
    /// * `set` - Handle returned by [`ModelHost::create_selection_set`]
    /// * `joined_ids` - Element identifiers joined with [`ELEMENT_ID_SEPARATOR`](crate::ELEMENT_ID_SEPARATOR)
    fn add_to_selection_set<'a>(
        &'a self,
        set: SelectionSetHandle,
        joined_ids: &'a str,
    ) -> BoxFuture<'a, Result<()>>;

    /// Read a string property, treating a missing value as empty
    fn string_property<'a>(
        &'a self,
        element: ElementHandle,
        name: &'a str,
    ) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let value = self.property(element, name, ValueType::String).await?;
            Ok(value.map(|v| v.display()).unwrap_or_default())
        })
    }
}
