// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! QTO-Check Host - In-memory model host
//!
//! This crate implements the [`ModelHost`](qto_check_model::ModelHost) trait
//! over a JSON model snapshot. It stands in for a live BIM viewer: element
//! enumeration and typed property reads come from the snapshot, while
//! visibility changes and selection sets are kept in memory and can be
//! inspected or written out afterwards.
//!
//! # Features
//!
//! - **JSON snapshots** - elements with `ifcType`, `ifcTypeObject` and free-form properties
//! - **Call journal** - every host call is recorded in issue order
//! - **Failure injection** - make a class of calls fail to exercise error paths
//!
//! # Example
//!
//! ```ignore
//! use qto_check_host::SnapshotHost;
//! use std::sync::Arc;
//!
//! let host = Arc::new(SnapshotHost::load("model.json")?);
//! // ... run checks against `host` ...
//! for set in host.selection_sets() {
//!     println!("{}: {} elements", set.name, set.ids.len());
//! }
//! ```

mod error;
mod host;
mod journal;
mod snapshot;

pub use error::{Result, SnapshotError};
pub use host::{HostState, SelectionSet, SnapshotHost};
pub use journal::{HostCall, HostCallKind};
pub use snapshot::{ModelSnapshot, SnapshotElement};
