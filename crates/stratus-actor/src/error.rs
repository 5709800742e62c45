//! Errors produced by actor operations.

use stratus_api::ClientError;
use thiserror::Error;

/// An actor operation failure.
///
/// Warnings gathered before the failure are returned alongside the error,
/// never inside it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// A lifecycle value other than `running` or `staging` was supplied.
    /// Raised before any remote call is made.
    #[error("Invalid lifecycle: {lifecycle}")]
    InvalidLifecycle {
        /// The rejected value, verbatim.
        lifecycle: String,
    },

    /// No security group with the given name.
    #[error("Security group '{name}' not found.")]
    SecurityGroupNotFound {
        /// Requested name.
        name: String,
    },

    /// No organization with the given name.
    #[error("Organization '{name}' not found.")]
    OrganizationNotFound {
        /// Requested name.
        name: String,
    },

    /// No space with the given name or guid.
    #[error("Space '{0}' not found.")]
    SpaceNotFound(String),

    /// No application with the given name in the targeted space.
    #[error("App '{name}' not found.")]
    ApplicationNotFound {
        /// Requested name.
        name: String,
    },

    /// An application with the given name already exists in the space.
    #[error("App '{name}' already exists.")]
    ApplicationAlreadyExists {
        /// Requested name.
        name: String,
    },

    /// The application has no process of the given type.
    #[error("Process {process_type} not found")]
    ProcessNotFound {
        /// Requested process type.
        process_type: String,
    },

    /// The security group exists but is not bound to the space for the
    /// requested lifecycle phase.
    #[error("Security group {name} not bound to this space for lifecycle phase '{lifecycle}'.")]
    SecurityGroupNotBound {
        /// Security group name.
        name: String,
        /// The lifecycle phase the unbind was requested for.
        lifecycle: String,
    },

    /// The application did not reach a running state within the startup
    /// timeout.
    #[error("Timed out waiting for application '{app_name}' to start.")]
    StartupTimeout {
        /// Application name.
        app_name: String,
    },

    /// An underlying API call failed with no operation-specific meaning.
    #[error(transparent)]
    Client(#[from] ClientError),
}
