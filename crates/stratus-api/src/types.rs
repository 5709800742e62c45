//! Resource types returned by the Cloud Controller.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered warning strings attached to API responses.
///
/// Insertion order is call order. Warnings are never deduplicated; a
/// workflow that fetches the same resource twice reports its warnings
/// twice.
pub type Warnings = Vec<String>;

/// An application security group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityGroup {
    /// Stable identifier assigned by the platform.
    pub guid: String,
    /// User-facing name, unique within a filtered lookup's result set.
    pub name: String,
}

/// An organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Stable identifier assigned by the platform.
    pub guid: String,
    /// User-facing name.
    pub name: String,
}

/// A space. Always belongs to exactly one organization, referenced by guid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    /// Stable identifier assigned by the platform.
    pub guid: String,
    /// User-facing name, unique within its organization.
    pub name: String,
    /// Guid of the owning organization.
    #[serde(default)]
    pub organization_guid: String,
}

/// An application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Stable identifier assigned by the platform.
    pub guid: String,
    /// User-facing name, unique within its space.
    pub name: String,
}

/// Lifecycle phase under which a security group applies to a space.
///
/// The wire format and all user input use the lowercase names; anything
/// that does not parse is rejected before a remote call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    /// Applies to running application instances.
    Running,
    /// Applies while an application is staging.
    Staging,
}

impl Lifecycle {
    /// Parses a lifecycle value. Returns `None` for anything other than
    /// `running` or `staging`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "running" => Some(Self::Running),
            "staging" => Some(Self::Staging),
            _ => None,
        }
    }

    /// The wire name of this lifecycle.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Staging => "staging",
        }
    }

    /// The other lifecycle phase.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Running => Self::Staging,
            Self::Staging => Self::Running,
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A process of an application, as reported by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Stable identifier assigned by the platform.
    pub guid: String,
    /// Process type, e.g. `web` or `worker`.
    #[serde(rename = "type")]
    pub process_type: String,
    /// Desired instance count.
    pub instances: u32,
    /// Memory limit per instance in megabytes.
    pub memory_in_mb: u64,
    /// Disk limit per instance in megabytes.
    pub disk_in_mb: u64,
}

/// A partial scale mutation for a process.
///
/// Each field is an explicit optional: only fields the caller supplied are
/// serialized into the request. Zero is a valid requested value and never
/// means "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessScale {
    /// Process type to scale.
    #[serde(rename = "type")]
    pub process_type: String,
    /// Requested instance count, if supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instances: Option<u32>,
    /// Requested memory limit in megabytes, if supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_in_mb: Option<u64>,
    /// Requested disk limit in megabytes, if supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_in_mb: Option<u64>,
}

impl ProcessScale {
    /// True when the caller supplied no field at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.instances.is_none() && self.memory_in_mb.is_none() && self.disk_in_mb.is_none()
    }

    /// True when applying this mutation requires an application restart.
    ///
    /// Changing memory or disk restarts the app; changing the instance
    /// count alone does not.
    #[must_use]
    pub const fn requires_restart(&self) -> bool {
        self.memory_in_mb.is_some() || self.disk_in_mb.is_some()
    }
}

/// A single instance of a process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInstance {
    /// Zero-based instance index.
    pub index: u32,
    /// Current instance state.
    pub state: InstanceState,
}

/// State of a process instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InstanceState {
    /// Instance is starting up.
    Starting,
    /// Instance is running.
    Running,
    /// Instance crashed.
    Crashed,
    /// Instance is stopped.
    Down,
}
