// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Runs the requested checks and prints one message per check

use crate::Cli;
use anyhow::{Context, Result};
use qto_check_engine::{CheckEngine, CheckOptions, CheckOutcome};
use qto_check_host::SnapshotHost;
use qto_check_model::{Catalog, Category};
use std::io::Write;
use std::sync::Arc;

/// Counts of what happened during a CLI run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub checks: usize,
    pub with_issues: usize,
    pub failed: usize,
}

impl RunSummary {
    /// Process exit code: non-zero when a check failed
    pub fn exit_code(&self) -> u8 {
        if self.failed > 0 {
            1
        } else {
            0
        }
    }
}

/// Label of the check offered for a category
pub fn check_label(category: &str) -> String {
    format!("Check {category} Base Quantities")
}

/// User-facing message for a check outcome
pub fn outcome_message(category: &str, outcome: CheckOutcome) -> String {
    match outcome {
        CheckOutcome::NoElements => format!("{category} not present in the model."),
        CheckOutcome::AllOk => format!("All {category} elements are OK."),
        CheckOutcome::IssuesFound => format!(
            "{category} elements with zero, negative, or undefined values added to their respective selection sets."
        ),
    }
}

/// Load the catalog and run the checks selected by `cli`, writing messages to `out`
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<RunSummary> {
    let catalog = Catalog::load_or_empty(&cli.catalog);
    for warning in catalog.lint() {
        tracing::warn!("catalog: {warning}");
    }

    if cli.list {
        for name in catalog.category_names() {
            writeln!(out, "{}", check_label(name))?;
        }
        return Ok(RunSummary::default());
    }

    let model = cli
        .model
        .as_ref()
        .context("no model snapshot given (use --model)")?;
    let host = Arc::new(
        SnapshotHost::load(model)
            .with_context(|| format!("failed to load model snapshot {}", model.display()))?,
    );

    let mut options = CheckOptions::default();
    if let Some(deadline) = cli.deadline() {
        options = options.with_deadline(deadline);
    }
    let engine = CheckEngine::new(host.clone()).with_options(options);

    let mut summary = RunSummary::default();
    for selected in select_categories(&catalog, &cli.categories) {
        let category = match selected {
            Ok(category) => category,
            Err(name) => {
                writeln!(out, "Unknown category {name}")?;
                summary.failed += 1;
                continue;
            }
        };

        summary.checks += 1;
        tracing::debug!("running {}", check_label(&category.name));
        let result =
            futures::executor::block_on(engine.run_check_report(&category.name, &category.quantities));
        match result {
            Ok(report) => {
                if report.outcome == CheckOutcome::IssuesFound {
                    summary.with_issues += 1;
                }
                if cli.json {
                    writeln!(out, "{}", serde_json::to_string(&report)?)?;
                } else {
                    writeln!(out, "{}", outcome_message(&category.name, report.outcome))?;
                }
            }
            Err(err) => {
                tracing::error!("{} failed: {err}", check_label(&category.name));
                writeln!(out, "Check {} failed: {err}", category.name)?;
                summary.failed += 1;
            }
        }
    }

    if let Some(path) = &cli.output {
        host.write_state(path)
            .with_context(|| format!("failed to write host state to {}", path.display()))?;
    }

    Ok(summary)
}

/// Categories to run: the named ones in the given order, or the whole catalog
fn select_categories<'a>(
    catalog: &'a Catalog,
    names: &'a [String],
) -> Vec<std::result::Result<&'a Category, &'a str>> {
    if names.is_empty() {
        return catalog.iter().map(Ok).collect();
    }
    names
        .iter()
        .map(|name| catalog.find(name).ok_or(name.as_str()))
        .collect()
}
