// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! QTO-Check CLI
//!
//! Offers one check per catalog category and runs them against a model
//! snapshot, printing the result of each check.

pub mod app;
pub mod args;

pub use app::{check_label, outcome_message, run, RunSummary};
pub use args::Cli;
