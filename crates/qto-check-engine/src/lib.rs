// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! QTO-Check Engine - Base quantity checks against a BIM host
//!
//! Given a category name (e.g. `"Wall"`) and the base quantities expected for
//! it, the engine finds the matching elements through a
//! [`ModelHost`](qto_check_model::ModelHost), resolves every quantity with key
//! fallback and collects elements whose value is zero, negative or undefined
//! into named selection sets on the host.
//!
//! # Example
//!
//! ```ignore
//! use qto_check_engine::{CheckEngine, CheckOutcome};
//! use qto_check_model::Catalog;
//! use std::sync::Arc;
//!
//! let catalog = Catalog::load("Basequantities.json")?;
//! let engine = CheckEngine::new(Arc::new(host));
//!
//! for category in catalog.iter() {
//!     let outcome = engine.run_check(&category.name, &category.quantities).await?;
//!     println!("{}: {}", category.name, outcome);
//! }
//! ```

mod classify;
mod engine;
mod error;
mod groups;
mod matching;
mod options;
mod outcome;

pub use classify::{classify, QuantityOutcome, QuantityStatus, ResolvedValue};
pub use engine::{evaluate_quantity, CheckEngine};
pub use error::{CheckError, Result};
pub use groups::{group_name, ResultGroup, ResultGroups};
pub use matching::{CategoryMatcher, ElementTypeInfo};
pub use options::{CancellationToken, CheckOptions};
pub use outcome::{CheckOutcome, CheckReport};
