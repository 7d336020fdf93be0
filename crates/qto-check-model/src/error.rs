// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for host calls and catalog loading

use crate::{ElementHandle, SelectionSetHandle};
use thiserror::Error;

/// Result type alias for host operations
pub type Result<T> = std::result::Result<T, HostError>;

/// Errors raised by a [`ModelHost`](crate::ModelHost) implementation
///
/// The engine never recovers from these locally; they abort the running
/// check and reach the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    /// The host does not know the element handle
    #[error("Element {0} not found")]
    ElementNotFound(ElementHandle),

    /// The host does not know the selection set handle
    #[error("Selection set {0} not found")]
    SelectionSetNotFound(SelectionSetHandle),

    /// The host refused or failed a specific call
    #[error("Host rejected {call}: {message}")]
    Rejected { call: String, message: String },
}

impl HostError {
    /// Create a new rejection error
    pub fn rejected(call: impl Into<String>, msg: impl Into<String>) -> Self {
        HostError::Rejected {
            call: call.into(),
            message: msg.into(),
        }
    }
}

/// Errors that can occur while loading a quantity catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Catalog content is not valid JSON or does not have the expected shape
    #[error("Invalid catalog: {0}")]
    Json(#[from] serde_json::Error),
}
