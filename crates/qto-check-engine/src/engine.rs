// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CheckEngine - runs one category's base quantity check against a host
//!
//! A run has four phases:
//!
//! 1. **Discovery** - enumerate geometry elements and keep those whose
//!    `ifcType` or `ifcTypeObject` contains the category name (ignoring case).
//!    No match ends the run with [`CheckOutcome::NoElements`].
//! 2. **Visibility** - ask the host to show only the matched elements.
//! 3. **Evaluation** - for every element and quantity, probe the quantity's
//!    keys in order until one answers, classify the value and file the element
//!    under `"<category> with <status> <displayName>"`.
//! 4. **Summary** - create one selection set per group and bulk-add its ids.
//!
//! Host calls are issued strictly one after another. Any host failure aborts
//! the run; changes already made on the host are kept.

use crate::groups::{group_name, ResultGroups};
use crate::matching::{CategoryMatcher, ElementTypeInfo};
use crate::options::{CheckOptions, RunBudget};
use crate::{CheckError, CheckOutcome, CheckReport, QuantityOutcome, ResolvedValue, Result};

use qto_check_model::{ElementHandle, ElementScope, ModelHost, QuantitySpec, ValueType};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Base quantity check engine
///
/// Holds the injected host and run options, nothing else: every run starts
/// from scratch. Only one run may be in flight per engine; a concurrent call
/// fails with [`CheckError::Busy`] before touching the host.
///
/// # Example
///
/// ```ignore
/// use qto_check_engine::{CheckEngine, CheckOutcome};
///
/// let engine = CheckEngine::new(host);
/// match engine.run_check("Wall", catalog.get("Wall").unwrap()).await? {
///     CheckOutcome::NoElements => println!("Wall not present in the model."),
///     CheckOutcome::AllOk => println!("All Wall elements are OK."),
///     CheckOutcome::IssuesFound => println!("Issues added to selection sets."),
/// }
/// ```
pub struct CheckEngine {
    host: Arc<dyn ModelHost>,
    options: CheckOptions,
    in_flight: AtomicBool,
}

impl CheckEngine {
    /// Create an engine over a host
    pub fn new(host: Arc<dyn ModelHost>) -> Self {
        Self {
            host,
            options: CheckOptions::default(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Set run options (deadline, cancellation)
    pub fn with_options(mut self, options: CheckOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the run options
    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Get the host
    pub fn host(&self) -> &dyn ModelHost {
        self.host.as_ref()
    }

    /// Whether a run is currently in flight
    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Check one category and return the overall outcome
    ///
    /// # Arguments
    /// * `category` - Category name, matched case-insensitively as a substring
    /// * `quantities` - Quantities to check; an empty list never reports issues
    pub async fn run_check(&self, category: &str, quantities: &[QuantitySpec]) -> Result<CheckOutcome> {
        self.run_check_report(category, quantities)
            .await
            .map(|report| report.outcome)
    }

    /// Check one category and return the full report
    pub async fn run_check_report(
        &self,
        category: &str,
        quantities: &[QuantitySpec],
    ) -> Result<CheckReport> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;
        let budget = RunBudget::start(&self.options);
        let host = self.host.as_ref();

        let elements = discover(host, category, &budget).await?;
        if elements.is_empty() {
            log::info!("{category}: no matching elements");
            return Ok(CheckReport::no_elements(category));
        }
        log::debug!("{category}: {} matching elements", elements.len());

        budget.checkpoint()?;
        host.show_elements_only(&elements).await?;

        let mut groups = ResultGroups::new();
        let mut evaluated = 0;
        for &element in &elements {
            budget.checkpoint()?;
            let id = host.element_id(element).await?;

            for spec in quantities {
                let outcome = probe_keys(host, element, spec, &budget).await?;
                evaluated += 1;

                let Some(status) = outcome.status else {
                    continue;
                };
                match &outcome.value {
                    ResolvedValue::Malformed(raw) => log::warn!(
                        "{category}: element {id} has non-numeric {} value {raw:?}",
                        spec.display_name
                    ),
                    ResolvedValue::Number(v) if v.is_nan() => log::warn!(
                        "{category}: element {id} has NaN {} value",
                        spec.display_name
                    ),
                    _ => {}
                }
                groups.push(group_name(category, status, &spec.display_name), id.clone());
            }
        }

        if groups.is_empty() {
            log::info!("{category}: all {} elements OK", elements.len());
            return Ok(CheckReport {
                category: category.to_string(),
                outcome: CheckOutcome::AllOk,
                matched_elements: elements.len(),
                evaluated_quantities: evaluated,
                groups,
                selection_sets: Vec::new(),
            });
        }

        let mut selection_sets = Vec::with_capacity(groups.len());
        for group in &groups {
            if group.ids.is_empty() {
                continue;
            }
            budget.checkpoint()?;
            let set = host.create_selection_set(&group.name).await?;
            budget.checkpoint()?;
            host.add_to_selection_set(set, &group.joined_ids()).await?;
            log::debug!("{}: {} elements", group.name, group.ids.len());
            selection_sets.push(set);
        }

        log::info!(
            "{category}: {} issues in {} groups",
            groups.total_entries(),
            groups.len()
        );
        Ok(CheckReport {
            category: category.to_string(),
            outcome: CheckOutcome::IssuesFound,
            matched_elements: elements.len(),
            evaluated_quantities: evaluated,
            groups,
            selection_sets,
        })
    }
}

/// Evaluate one quantity of one element without run limits
///
/// Keys are probed in order; the first key with a defined value wins and
/// later keys are not queried.
pub async fn evaluate_quantity(
    host: &dyn ModelHost,
    element: ElementHandle,
    spec: &QuantitySpec,
) -> Result<QuantityOutcome> {
    let options = CheckOptions::default();
    probe_keys(host, element, spec, &RunBudget::start(&options)).await
}

/// Elements of the geometry scope whose type strings match `category`, in host order
async fn discover(
    host: &dyn ModelHost,
    category: &str,
    budget: &RunBudget<'_>,
) -> Result<Vec<ElementHandle>> {
    let matcher = CategoryMatcher::new(category);

    budget.checkpoint()?;
    let all = host.all_elements(ElementScope::Geometry).await?;

    let mut matched = Vec::new();
    for element in all {
        budget.checkpoint()?;
        let info = ElementTypeInfo::fetch(host, element).await?;
        if matcher.matches(&info) {
            matched.push(element);
        }
    }
    Ok(matched)
}

async fn probe_keys(
    host: &dyn ModelHost,
    element: ElementHandle,
    spec: &QuantitySpec,
    budget: &RunBudget<'_>,
) -> Result<QuantityOutcome> {
    for key in &spec.keys {
        budget.checkpoint()?;
        if let Some(value) = host.property(element, key, ValueType::Double).await? {
            return Ok(QuantityOutcome::new(
                ResolvedValue::from_property(Some(value)),
                Some(key.clone()),
            ));
        }
    }
    Ok(QuantityOutcome::new(ResolvedValue::Absent, None))
}

/// Marks an engine busy for the lifetime of one run
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CheckError::Busy)?;
        Ok(Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
