// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Base Quantities Checker - flag elements with zero, negative or undefined quantities.
#[derive(Debug, Parser)]
#[command(name = "qto-check")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base quantities catalog (JSON)
    #[arg(short, long, env = "QTO_CATALOG", default_value = "Basequantities.json")]
    pub catalog: PathBuf,

    /// Model snapshot to check (JSON)
    #[arg(short, long, env = "QTO_MODEL", required_unless_present = "list")]
    pub model: Option<PathBuf>,

    /// Category to check; repeat for several (default: every catalog category)
    #[arg(short = 'C', long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// List the checks the catalog offers and exit
    #[arg(long)]
    pub list: bool,

    /// Abort a single check after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Write the resulting visibility and selection sets to this file (JSON)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print one JSON report per check instead of messages
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Per-check deadline
    pub fn deadline(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}
