// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for check runs

use qto_check_model::HostError;
use std::time::Duration;
use thiserror::Error;

/// Check result type
pub type Result<T> = std::result::Result<T, CheckError>;

/// Errors that abort a check run
///
/// Host-side changes made before the error (visibility, selection sets
/// already created) are left in place.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckError {
    /// A host call failed
    #[error("Host call failed: {0}")]
    Host(#[from] HostError),

    /// Another check is still running on this engine
    #[error("A check is already running")]
    Busy,

    /// The run was cancelled through its cancellation token
    #[error("Check cancelled")]
    Cancelled,

    /// The run did not finish within its deadline
    #[error("Check exceeded its deadline of {0:?}")]
    DeadlineExceeded(Duration),
}

impl CheckError {
    /// Whether the error came from the host rather than the engine
    pub fn is_host_error(&self) -> bool {
        matches!(self, CheckError::Host(_))
    }
}
