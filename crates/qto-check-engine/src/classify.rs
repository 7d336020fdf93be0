// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Quantity value resolution results and their classification

use qto_check_model::PropertyValue;
use serde::Serialize;
use std::fmt;

/// Problem found with a quantity value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityStatus {
    /// Value is exactly zero
    Zero,
    /// Value is below zero
    Negative,
    /// No key yielded a usable value
    Undefined,
}

impl QuantityStatus {
    /// Word used in result group names
    pub fn as_str(&self) -> &'static str {
        match self {
            QuantityStatus::Zero => "zero",
            QuantityStatus::Negative => "negative",
            QuantityStatus::Undefined => "undefined",
        }
    }
}

impl fmt::Display for QuantityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value resolved for one quantity of one element
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedValue {
    /// A key answered with a number
    Number(f64),
    /// No key answered
    Absent,
    /// A key answered with something that is not a number
    Malformed(String),
}

impl ResolvedValue {
    /// Build from a host answer
    ///
    /// NaN is kept as a number here; [`classify`] decides what it means.
    pub fn from_property(value: Option<PropertyValue>) -> Self {
        match value {
            None => ResolvedValue::Absent,
            Some(value) => match value.as_number() {
                Some(number) => ResolvedValue::Number(number),
                None => ResolvedValue::Malformed(value.display()),
            },
        }
    }

    /// The numeric value, if any
    pub fn number(&self) -> Option<f64> {
        match self {
            ResolvedValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

/// Outcome of evaluating one quantity of one element
#[derive(Clone, Debug, PartialEq)]
pub struct QuantityOutcome {
    /// Resolved value
    pub value: ResolvedValue,
    /// Key that answered, if any
    pub key: Option<String>,
    /// Problem found, `None` when the value is fine
    pub status: Option<QuantityStatus>,
}

impl QuantityOutcome {
    /// Classify a resolved value
    pub fn new(value: ResolvedValue, key: Option<String>) -> Self {
        let status = classify(&value);
        Self { value, key, status }
    }

    /// Whether the quantity passed
    pub fn is_ok(&self) -> bool {
        self.status.is_none()
    }
}

/// Classify a resolved quantity value
///
/// Zero is tested first so a literal `0` is never reported as undefined.
/// NaN and non-numeric answers count as undefined.
pub fn classify(value: &ResolvedValue) -> Option<QuantityStatus> {
    match value {
        ResolvedValue::Number(v) if *v == 0.0 => Some(QuantityStatus::Zero),
        ResolvedValue::Number(v) if *v < 0.0 => Some(QuantityStatus::Negative),
        ResolvedValue::Number(v) if v.is_nan() => Some(QuantityStatus::Undefined),
        ResolvedValue::Number(_) => None,
        ResolvedValue::Absent | ResolvedValue::Malformed(_) => Some(QuantityStatus::Undefined),
    }
}
