//! Space lookups.

use stratus_api::{CloudClient, Filter, Space};
use tracing::debug;

use crate::{absorb, ActionError, ActionResult, Actor};

impl<C: CloudClient> Actor<C> {
    /// Resolves a space by name within an organization. When several match
    /// the filters, the first in the response wins.
    pub async fn space_by_name_and_organization(
        &self,
        name: &str,
        organization_guid: &str,
    ) -> ActionResult<Space> {
        let mut warnings = Vec::new();
        let result = absorb(
            &mut warnings,
            self.client()
                .get_spaces(&[
                    Filter::name(name),
                    Filter::organization_guid(organization_guid),
                ])
                .await,
        );
        let spaces = match result {
            Ok(spaces) => spaces,
            Err(e) => return (warnings, Err(e.into())),
        };

        match spaces.into_iter().next() {
            Some(space) => (warnings, Ok(space)),
            None => {
                debug!(name, organization_guid, "space not found");
                (warnings, Err(ActionError::SpaceNotFound(name.to_owned())))
            }
        }
    }
}
