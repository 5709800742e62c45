//! Security group binding workflows.
//!
//! Binding is scoped to a space and a lifecycle phase. Unbinding is
//! deliberately forgiving: a group that is not bound anywhere unbinds as a
//! silent no-op, while a group bound only under the opposite lifecycle
//! phase is reported as a targeted error so the caller can retry with the
//! right phase.

use stratus_api::{
    ClientError, CloudClient, Filter, Lifecycle, Organization, SecurityGroup, Space,
};
use tracing::debug;

use crate::{absorb, ActionError, ActionResult, Actor};

/// One row of the security group listing: a group together with one space
/// it is bound to, that space's organization, and the lifecycle phase of
/// the binding. A group bound to no space at all produces a single row
/// with the three optionals empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityGroupBinding {
    /// The security group.
    pub security_group: SecurityGroup,
    /// Organization owning the bound space.
    pub organization: Option<Organization>,
    /// The bound space.
    pub space: Option<Space>,
    /// Lifecycle phase of the binding.
    pub lifecycle: Option<Lifecycle>,
}

impl<C: CloudClient> Actor<C> {
    /// Resolves a security group by name. When several match the filter,
    /// the first in the response wins.
    pub async fn security_group_by_name(&self, name: &str) -> ActionResult<SecurityGroup> {
        let mut warnings = Vec::new();
        let result = absorb(
            &mut warnings,
            self.client()
                .get_security_groups(&[Filter::name(name)])
                .await,
        );
        let groups = match result {
            Ok(groups) => groups,
            Err(e) => return (warnings, Err(e.into())),
        };

        match groups.into_iter().next() {
            Some(group) => (warnings, Ok(group)),
            None => {
                debug!(name, "security group not found");
                (
                    warnings,
                    Err(ActionError::SecurityGroupNotFound {
                        name: name.to_owned(),
                    }),
                )
            }
        }
    }

    /// Binds a security group to a space for the given lifecycle phase.
    ///
    /// The lifecycle value is validated before any remote call is made.
    pub async fn bind_security_group_to_space(
        &self,
        security_group_guid: &str,
        space_guid: &str,
        lifecycle: &str,
    ) -> ActionResult<()> {
        let Some(parsed) = Lifecycle::parse(lifecycle) else {
            return (Vec::new(), Err(invalid_lifecycle(lifecycle)));
        };

        let mut warnings = Vec::new();
        let outcome = match parsed {
            Lifecycle::Running => {
                self.client()
                    .associate_space_with_running_security_group(security_group_guid, space_guid)
                    .await
            }
            Lifecycle::Staging => {
                self.client()
                    .associate_space_with_staging_security_group(security_group_guid, space_guid)
                    .await
            }
        };
        let result = absorb(&mut warnings, outcome);
        (warnings, result.map_err(Into::into))
    }

    /// Unbinds a security group from a space for the given lifecycle
    /// phase, resolving the group by name.
    ///
    /// The binding under the requested phase is checked first. If it does
    /// not exist, the opposite phase is consulted: a binding there means
    /// the caller asked for the wrong phase and gets
    /// [`ActionError::SecurityGroupNotBound`]; no binding anywhere is a
    /// silent success without any mutation.
    pub async fn unbind_security_group_by_name_and_space(
        &self,
        name: &str,
        space_guid: &str,
        lifecycle: &str,
    ) -> ActionResult<()> {
        let Some(parsed) = Lifecycle::parse(lifecycle) else {
            return (Vec::new(), Err(invalid_lifecycle(lifecycle)));
        };

        let (mut warnings, resolved) = self.security_group_by_name(name).await;
        let group = match resolved {
            Ok(group) => group,
            Err(e) => return (warnings, Err(e)),
        };

        let bound = match absorb(
            &mut warnings,
            self.space_security_groups_named(space_guid, name, parsed).await,
        ) {
            Ok(bound) => bound,
            Err(e) => return (warnings, Err(e.into())),
        };
        if bound {
            let outcome = match parsed {
                Lifecycle::Running => {
                    self.client()
                        .remove_space_from_running_security_group(&group.guid, space_guid)
                        .await
                }
                Lifecycle::Staging => {
                    self.client()
                        .remove_space_from_staging_security_group(&group.guid, space_guid)
                        .await
                }
            };
            let result = absorb(&mut warnings, outcome);
            return (warnings, result.map_err(Into::into));
        }

        let bound_opposite = match absorb(
            &mut warnings,
            self.space_security_groups_named(space_guid, name, parsed.opposite())
                .await,
        ) {
            Ok(bound) => bound,
            Err(e) => return (warnings, Err(e.into())),
        };
        if bound_opposite {
            return (
                warnings,
                Err(ActionError::SecurityGroupNotBound {
                    name: name.to_owned(),
                    lifecycle: parsed.as_str().to_owned(),
                }),
            );
        }

        debug!(name, space_guid, "security group bound nowhere, unbind is a no-op");
        (warnings, Ok(()))
    }

    /// Unbinds a security group, resolving the organization and space by
    /// name first.
    pub async fn unbind_security_group_by_name_organization_name_and_space_name(
        &self,
        name: &str,
        organization_name: &str,
        space_name: &str,
        lifecycle: &str,
    ) -> ActionResult<()> {
        if Lifecycle::parse(lifecycle).is_none() {
            return (Vec::new(), Err(invalid_lifecycle(lifecycle)));
        }

        let (mut warnings, resolved) = self.organization_by_name(organization_name).await;
        let organization = match resolved {
            Ok(organization) => organization,
            Err(e) => return (warnings, Err(e)),
        };

        let (mut space_warnings, resolved) = self
            .space_by_name_and_organization(space_name, &organization.guid)
            .await;
        warnings.append(&mut space_warnings);
        let space = match resolved {
            Ok(space) => space,
            Err(e) => return (warnings, Err(e)),
        };

        let (mut unbind_warnings, result) = self
            .unbind_security_group_by_name_and_space(name, &space.guid, lifecycle)
            .await;
        warnings.append(&mut unbind_warnings);
        (warnings, result)
    }

    /// Lists security groups bound to a space for the running phase.
    pub async fn space_running_security_groups(
        &self,
        space_guid: &str,
    ) -> ActionResult<Vec<SecurityGroup>> {
        let mut warnings = Vec::new();
        let result = absorb(
            &mut warnings,
            self.client()
                .get_space_running_security_groups(space_guid, &[])
                .await,
        );
        (warnings, map_space_lookup(result, space_guid))
    }

    /// Lists security groups bound to a space for the staging phase.
    pub async fn space_staging_security_groups(
        &self,
        space_guid: &str,
    ) -> ActionResult<Vec<SecurityGroup>> {
        let mut warnings = Vec::new();
        let result = absorb(
            &mut warnings,
            self.client()
                .get_space_staging_security_groups(space_guid, &[])
                .await,
        );
        (warnings, map_space_lookup(result, space_guid))
    }

    /// Lists every security group together with the spaces it is bound
    /// to.
    ///
    /// Rows appear in the order the platform returns them: groups in
    /// listing order, and within a group every running binding before any
    /// staging binding. Each bound space costs one organization fetch;
    /// nothing is cached, so a space's organization warnings repeat for
    /// every row that touches it. A group bound nowhere contributes one
    /// row with no space.
    pub async fn security_groups_with_organization_space_and_lifecycle(
        &self,
    ) -> ActionResult<Vec<SecurityGroupBinding>> {
        let mut warnings = Vec::new();
        let groups = match absorb(&mut warnings, self.client().get_security_groups(&[]).await) {
            Ok(groups) => groups,
            Err(e) => return (warnings, Err(e.into())),
        };

        let mut rows = Vec::new();
        for group in groups {
            let rows_before = rows.len();

            let spaces = match absorb(
                &mut warnings,
                self.client()
                    .get_running_spaces_by_security_group(&group.guid)
                    .await,
            ) {
                Ok(spaces) => spaces,
                Err(e) => return (warnings, Err(e.into())),
            };
            for space in spaces {
                match self
                    .binding_row(&mut warnings, &group, space, Lifecycle::Running)
                    .await
                {
                    Ok(row) => rows.push(row),
                    Err(e) => return (warnings, Err(e)),
                }
            }

            let spaces = match absorb(
                &mut warnings,
                self.client()
                    .get_staging_spaces_by_security_group(&group.guid)
                    .await,
            ) {
                Ok(spaces) => spaces,
                Err(e) => return (warnings, Err(e.into())),
            };
            for space in spaces {
                match self
                    .binding_row(&mut warnings, &group, space, Lifecycle::Staging)
                    .await
                {
                    Ok(row) => rows.push(row),
                    Err(e) => return (warnings, Err(e)),
                }
            }

            if rows.len() == rows_before {
                rows.push(SecurityGroupBinding {
                    security_group: group,
                    organization: None,
                    space: None,
                    lifecycle: None,
                });
            }
        }

        (warnings, Ok(rows))
    }

    async fn binding_row(
        &self,
        warnings: &mut Vec<String>,
        group: &SecurityGroup,
        space: Space,
        lifecycle: Lifecycle,
    ) -> Result<SecurityGroupBinding, ActionError> {
        let organization = absorb(
            warnings,
            self.client().get_organization(&space.organization_guid).await,
        )?;
        Ok(SecurityGroupBinding {
            security_group: group.clone(),
            organization: Some(organization),
            space: Some(space),
            lifecycle: Some(lifecycle),
        })
    }

    /// Checks whether a group of the given name is bound to the space
    /// under one lifecycle phase, using a name-filtered space-scoped
    /// listing.
    async fn space_security_groups_named(
        &self,
        space_guid: &str,
        name: &str,
        lifecycle: Lifecycle,
    ) -> (Vec<String>, Result<bool, ClientError>) {
        let filters = [Filter::name(name)];
        let (warnings, result) = match lifecycle {
            Lifecycle::Running => {
                self.client()
                    .get_space_running_security_groups(space_guid, &filters)
                    .await
            }
            Lifecycle::Staging => {
                self.client()
                    .get_space_staging_security_groups(space_guid, &filters)
                    .await
            }
        };
        (
            warnings,
            result.map(|groups| groups.iter().any(|g| g.name == name)),
        )
    }
}

fn invalid_lifecycle(lifecycle: &str) -> ActionError {
    ActionError::InvalidLifecycle {
        lifecycle: lifecycle.to_owned(),
    }
}

fn map_space_lookup<T>(
    result: Result<T, ClientError>,
    space_guid: &str,
) -> Result<T, ActionError> {
    result.map_err(|e| match e {
        ClientError::ResourceNotFound => ActionError::SpaceNotFound(space_guid.to_owned()),
        other => other.into(),
    })
}
