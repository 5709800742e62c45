//! # stratus-actor
//!
//! Orchestration layer between the CLI commands and the Cloud Controller
//! client. Each operation composes one or more [`CloudClient`] calls into a
//! workflow with well-defined failure semantics.
//!
//! Two rules hold everywhere:
//!
//! * Warnings accumulate in call order across every call an operation
//!   makes, including the failing one, and are always returned to the
//!   caller even when the operation fails.
//! * Name resolution is by server-side equality filter; when several
//!   resources match, the first in the response wins.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::time::Duration;

use stratus_api::client::CallOutcome;
use stratus_api::{ClientError, CloudClient, Warnings};

pub mod application;
pub mod error;
pub mod organization;
pub mod poller;
pub mod process;
pub mod scale;
pub mod security_group;
pub mod space;

pub use error::ActionError;
pub use scale::{ScaleOutcome, ScaleRequest, WorkflowUi};
pub use security_group::SecurityGroupBinding;

/// Outcome of an actor operation: every warning gathered along the way,
/// plus the result.
pub type ActionResult<T> = (Warnings, Result<T, ActionError>);

/// How long the startup poller waits before giving up on an application.
pub const DEFAULT_STARTUP_TIMEOUT: Duration = Duration::from_secs(300);

/// Delay between startup poller rounds.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// The orchestration actor. Generic over the client so tests can drive it
/// with a scripted implementation.
#[derive(Debug)]
pub struct Actor<C> {
    client: C,
    startup_timeout: Duration,
    poll_interval: Duration,
}

impl<C: CloudClient> Actor<C> {
    /// Creates an actor with the default poller timing.
    pub fn new(client: C) -> Self {
        Self::with_timeouts(client, DEFAULT_STARTUP_TIMEOUT, DEFAULT_POLL_INTERVAL)
    }

    /// Creates an actor with explicit poller timing.
    pub fn with_timeouts(client: C, startup_timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            client,
            startup_timeout,
            poll_interval,
        }
    }

    /// The underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }
}

/// Appends a call's warnings to the running tally and unwraps its result.
pub(crate) fn absorb<T>(
    warnings: &mut Warnings,
    outcome: CallOutcome<T>,
) -> Result<T, ClientError> {
    let (mut call_warnings, result) = outcome;
    warnings.append(&mut call_warnings);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_appends_warnings_in_call_order() {
        let mut warnings: Warnings = vec!["warning-1".into()];
        let outcome: CallOutcome<u32> = (vec!["warning-2".into(), "warning-3".into()], Ok(7));
        let result = absorb(&mut warnings, outcome);
        assert_eq!(result, Ok(7));
        assert_eq!(warnings, vec!["warning-1", "warning-2", "warning-3"]);
    }

    #[test]
    fn absorb_keeps_warnings_from_failed_calls() {
        let mut warnings = Warnings::new();
        let outcome: CallOutcome<u32> = (
            vec!["warning-1".into()],
            Err(ClientError::ResourceNotFound),
        );
        let result = absorb(&mut warnings, outcome);
        assert_eq!(result, Err(ClientError::ResourceNotFound));
        assert_eq!(warnings, vec!["warning-1"]);
    }
}
