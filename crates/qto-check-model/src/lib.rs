// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! QTO-Check Model - Host capability traits and shared types for base quantity checks
//!
//! This crate provides the abstractions the check engine needs from a BIM host
//! application. The host owns the model; the engine only enumerates elements,
//! reads typed properties and asks the host to show elements and create
//! selection sets. Keeping that surface behind a trait lets the engine run
//! against a live viewer integration or an in-memory snapshot alike.
//!
//! # Architecture
//!
//! - [`ModelHost`] - The capability trait a host integration implements
//! - [`Catalog`] / [`QuantitySpec`] - Expected base quantities per category
//! - [`ElementHandle`], [`PropertyValue`], [`ValueType`] - Data crossing the host boundary
//!
//! # Example
//!
//! ```ignore
//! use qto_check_model::{Catalog, ModelHost, ElementScope};
//!
//! let catalog = Catalog::load("Basequantities.json")?;
//! for name in catalog.category_names() {
//!     println!("Check {} Base Quantities", name);
//! }
//!
//! let elements = host.all_elements(ElementScope::Geometry).await?;
//! ```

pub mod catalog;
pub mod error;
pub mod host;
pub mod types;

// Re-export all public types
pub use catalog::*;
pub use error::*;
pub use host::*;
pub use types::*;
