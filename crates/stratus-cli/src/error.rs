//! CLI error types.

use stratus_actor::ActionError;
use stratus_api::ClientError;
use thiserror::Error;

/// Errors the CLI reports to the user.
#[derive(Debug, Error)]
pub enum CliError {
    /// No API endpoint configured or supplied.
    #[error("No API endpoint set. Use 'stratus api' to set an endpoint.")]
    NoApiEndpoint,

    /// No stored credentials.
    #[error("Not logged in. Use 'stratus login' to log in.")]
    NotLoggedIn,

    /// No organization targeted.
    #[error("No org targeted, use 'stratus target -o ORG' to target an org.")]
    NoOrganizationTargeted,

    /// No space targeted.
    #[error("No space targeted, use 'stratus target -s SPACE' to target a space.")]
    NoSpaceTargeted,

    /// The config file exists but could not be read or parsed.
    #[error("Error reading config: {0}")]
    Config(String),

    /// An actor operation failed.
    #[error(transparent)]
    Action(#[from] ActionError),

    /// Client construction or a raw call failed.
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl CliError {
    /// An extra TIP line shown after the error, when one helps.
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Action(ActionError::StartupTimeout { .. }) => {
                Some("TIP: Check 'stratus logs' for staging or startup failures.")
            }
            Self::Action(ActionError::InvalidLifecycle { .. }) => {
                Some("TIP: Lifecycle must be 'running' or 'staging'.")
            }
            _ => None,
        }
    }
}
