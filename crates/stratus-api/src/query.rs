//! Equality filters for list endpoints.

use std::fmt;

/// A field a list endpoint can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    /// Resource name.
    Name,
    /// Owning organization guid.
    OrganizationGuid,
    /// Owning space guid.
    SpaceGuid,
}

impl FilterField {
    /// Query-string key for this field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::OrganizationGuid => "organization_guid",
            Self::SpaceGuid => "space_guid",
        }
    }
}

/// A single equality filter. Multiple filters on one request are ANDed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Field to filter on.
    pub field: FilterField,
    /// Value the field must equal.
    pub value: String,
}

impl Filter {
    /// Filter on resource name.
    #[must_use]
    pub fn name(value: impl Into<String>) -> Self {
        Self {
            field: FilterField::Name,
            value: value.into(),
        }
    }

    /// Filter on owning organization guid.
    #[must_use]
    pub fn organization_guid(value: impl Into<String>) -> Self {
        Self {
            field: FilterField::OrganizationGuid,
            value: value.into(),
        }
    }

    /// Filter on owning space guid.
    #[must_use]
    pub fn space_guid(value: impl Into<String>) -> Self {
        Self {
            field: FilterField::SpaceGuid,
            value: value.into(),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field.as_str(), self.value)
    }
}
