// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Run options: deadline and cancellation

use crate::{CheckError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared flag to cancel a running check
///
/// Clones share the flag. Cancellation is observed before the next host call.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Options applied to every check run of an engine
#[derive(Clone, Debug, Default)]
pub struct CheckOptions {
    /// Maximum wall time of one run
    pub deadline: Option<Duration>,
    /// Token that aborts runs when cancelled
    pub cancel: Option<CancellationToken>,
}

impl CheckOptions {
    /// Set the per-run deadline
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Deadline and cancellation state of one run
///
/// Checked before every host call; the two type reads of one element share
/// a check. A host call that never returns is not
/// interrupted; the run stops at the next checkpoint.
#[derive(Debug)]
pub(crate) struct RunBudget<'a> {
    started: Instant,
    options: &'a CheckOptions,
}

impl<'a> RunBudget<'a> {
    pub(crate) fn start(options: &'a CheckOptions) -> Self {
        Self {
            started: Instant::now(),
            options,
        }
    }

    pub(crate) fn checkpoint(&self) -> Result<()> {
        if let Some(token) = &self.options.cancel {
            if token.is_cancelled() {
                return Err(CheckError::Cancelled);
            }
        }
        if let Some(deadline) = self.options.deadline {
            if self.started.elapsed() > deadline {
                return Err(CheckError::DeadlineExceeded(deadline));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_shared() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_budget_without_limits() {
        let options = CheckOptions::default();
        assert!(RunBudget::start(&options).checkpoint().is_ok());
    }

    #[test]
    fn test_budget_cancelled() {
        let token = CancellationToken::new();
        let options = CheckOptions::default().with_cancellation(token.clone());
        let budget = RunBudget::start(&options);
        assert!(budget.checkpoint().is_ok());
        token.cancel();
        assert_eq!(budget.checkpoint(), Err(CheckError::Cancelled));
    }

    #[test]
    fn test_budget_deadline() {
        let options = CheckOptions::default().with_deadline(Duration::ZERO);
        let budget = RunBudget::start(&options);
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(
            budget.checkpoint(),
            Err(CheckError::DeadlineExceeded(Duration::ZERO))
        );
    }
}
