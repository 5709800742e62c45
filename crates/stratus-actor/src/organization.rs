//! Organization lookups.

use stratus_api::{CloudClient, Filter, Organization};
use tracing::debug;

use crate::{absorb, ActionError, ActionResult, Actor};

impl<C: CloudClient> Actor<C> {
    /// Resolves an organization by name. When several match the filter,
    /// the first in the response wins.
    pub async fn organization_by_name(&self, name: &str) -> ActionResult<Organization> {
        let mut warnings = Vec::new();
        let result = absorb(
            &mut warnings,
            self.client()
                .get_organizations(&[Filter::name(name)])
                .await,
        );
        let organizations = match result {
            Ok(organizations) => organizations,
            Err(e) => return (warnings, Err(e.into())),
        };

        match organizations.into_iter().next() {
            Some(organization) => (warnings, Ok(organization)),
            None => {
                debug!(name, "organization not found");
                (
                    warnings,
                    Err(ActionError::OrganizationNotFound {
                        name: name.to_owned(),
                    }),
                )
            }
        }
    }
}
