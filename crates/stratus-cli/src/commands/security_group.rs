//! The security group commands: bind, unbind, and the bindings listing.

use std::io::{BufRead, Write};

use stratus_actor::{Actor, SecurityGroupBinding};
use stratus_api::CloudClient;

use crate::cli::{BindSecurityGroupArgs, UnbindSecurityGroupArgs};
use crate::config::Config;
use crate::error::CliError;
use crate::ui::Ui;

const RESTART_TIP: &str =
    "TIP: Changes will not apply to existing running applications until they are restarted.";

/// Binds a security group to a space under one lifecycle phase.
#[derive(Debug)]
pub struct BindSecurityGroupCommand {
    args: BindSecurityGroupArgs,
}

impl BindSecurityGroupCommand {
    /// Builds the command from parsed arguments.
    #[must_use]
    pub fn new(args: BindSecurityGroupArgs) -> Self {
        Self { args }
    }

    /// Resolves the group, organization, and space by name, then binds.
    pub async fn execute<C, R, O, E>(
        &self,
        actor: &Actor<C>,
        config: &Config,
        ui: &mut Ui<R, O, E>,
    ) -> Result<(), CliError>
    where
        C: CloudClient,
        R: BufRead,
        O: Write,
        E: Write,
    {
        let user = config.current_user()?;

        ui.text(&format!(
            "Assigning security group {} to space {} in org {} as {}...",
            self.args.security_group, self.args.space, self.args.organization, user
        ));

        let (warnings, result) = actor.security_group_by_name(&self.args.security_group).await;
        ui.warnings(&warnings);
        let group = result?;

        let (warnings, result) = actor.organization_by_name(&self.args.organization).await;
        ui.warnings(&warnings);
        let organization = result?;

        let (warnings, result) = actor
            .space_by_name_and_organization(&self.args.space, &organization.guid)
            .await;
        ui.warnings(&warnings);
        let space = result?;

        let (warnings, result) = actor
            .bind_security_group_to_space(&group.guid, &space.guid, &self.args.lifecycle)
            .await;
        ui.warnings(&warnings);
        result?;

        ui.ok();
        ui.text(RESTART_TIP);
        Ok(())
    }
}

/// Unbinds a security group from a space under one lifecycle phase.
#[derive(Debug)]
pub struct UnbindSecurityGroupCommand {
    args: UnbindSecurityGroupArgs,
}

impl UnbindSecurityGroupCommand {
    /// Builds the command from parsed arguments.
    #[must_use]
    pub fn new(args: UnbindSecurityGroupArgs) -> Self {
        Self { args }
    }

    /// Unbinds from the named space, or from the targeted space when no
    /// organization and space were given.
    pub async fn execute<C, R, O, E>(
        &self,
        actor: &Actor<C>,
        config: &Config,
        ui: &mut Ui<R, O, E>,
    ) -> Result<(), CliError>
    where
        C: CloudClient,
        R: BufRead,
        O: Write,
        E: Write,
    {
        let user = config.current_user()?;

        let (warnings, result) = match (&self.args.organization, &self.args.space) {
            (Some(organization), Some(space)) => {
                ui.text(&format!(
                    "Unbinding security group {} from org {} / space {} for lifecycle phase '{}' as {}...",
                    self.args.security_group, organization, space, self.args.lifecycle, user
                ));
                actor
                    .unbind_security_group_by_name_organization_name_and_space_name(
                        &self.args.security_group,
                        organization,
                        space,
                        &self.args.lifecycle,
                    )
                    .await
            }
            _ => {
                let organization = config.targeted_organization()?;
                let space = config.targeted_space()?;
                ui.text(&format!(
                    "Unbinding security group {} from org {} / space {} for lifecycle phase '{}' as {}...",
                    self.args.security_group,
                    organization.name,
                    space.name,
                    self.args.lifecycle,
                    user
                ));
                actor
                    .unbind_security_group_by_name_and_space(
                        &self.args.security_group,
                        &space.guid,
                        &self.args.lifecycle,
                    )
                    .await
            }
        };
        ui.warnings(&warnings);
        result?;

        ui.ok();
        ui.text(RESTART_TIP);
        Ok(())
    }
}

/// Lists every security group and the spaces it is bound to, under both
/// lifecycle phases.
#[derive(Debug, Default)]
pub struct SecurityGroupsCommand;

impl SecurityGroupsCommand {
    /// Builds the command.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Fetches and renders the bindings table.
    pub async fn execute<C, R, O, E>(
        &self,
        actor: &Actor<C>,
        config: &Config,
        ui: &mut Ui<R, O, E>,
    ) -> Result<(), CliError>
    where
        C: CloudClient,
        R: BufRead,
        O: Write,
        E: Write,
    {
        let user = config.current_user()?;

        ui.text(&format!("Getting security groups as {user}..."));

        let (warnings, result) = actor
            .security_groups_with_organization_space_and_lifecycle()
            .await;
        ui.warnings(&warnings);
        let bindings = result?;

        ui.ok();
        render_bindings(ui, &bindings);
        Ok(())
    }
}

fn render_bindings<R, O, E>(ui: &mut Ui<R, O, E>, bindings: &[SecurityGroupBinding])
where
    R: BufRead,
    O: Write,
    E: Write,
{
    let header = [
        "name".to_owned(),
        "organization".to_owned(),
        "space".to_owned(),
        "lifecycle".to_owned(),
    ];
    let rows: Vec<[String; 4]> = bindings
        .iter()
        .map(|b| {
            [
                b.security_group.name.clone(),
                b.organization.as_ref().map(|o| o.name.clone()).unwrap_or_default(),
                b.space.as_ref().map(|s| s.name.clone()).unwrap_or_default(),
                b.lifecycle.map(|l| l.to_string()).unwrap_or_default(),
            ]
        })
        .collect();

    let mut widths = header.iter().map(String::len).collect::<Vec<_>>();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let render = |row: &[String; 4]| {
        let mut line = String::new();
        for (cell, &width) in row.iter().zip(&widths) {
            line.push_str(&format!("{cell:<width$}   "));
        }
        line.trim_end().to_owned()
    };

    ui.text(&render(&header));
    for row in &rows {
        ui.text(&render(row));
    }
}

#[cfg(test)]
mod tests {
    use stratus_api::mock::{Call, MockClient};
    use stratus_api::{Filter, Organization, SecurityGroup, Space};

    use crate::config::TargetedResource;
    use crate::ui::test_support::{streams, test_ui};

    use super::*;

    fn targeted_config() -> Config {
        Config {
            user: Some("some-user".into()),
            organization: Some(TargetedResource {
                guid: "targeted-org-guid".into(),
                name: "targeted-org".into(),
            }),
            space: Some(TargetedResource {
                guid: "targeted-space-guid".into(),
                name: "targeted-space".into(),
            }),
            ..Config::default()
        }
    }

    fn group(guid: &str, name: &str) -> SecurityGroup {
        SecurityGroup {
            guid: guid.into(),
            name: name.into(),
        }
    }

    #[tokio::test]
    async fn bind_resolves_names_then_binds() {
        let mock = MockClient::new();
        mock.queue_security_groups(&["sg-warning"], Ok(vec![group("sg-guid", "sg")]));
        mock.queue_organizations(
            &["org-warning"],
            Ok(vec![Organization {
                guid: "org-guid".into(),
                name: "some-org".into(),
            }]),
        );
        mock.queue_spaces(
            &["space-warning"],
            Ok(vec![Space {
                guid: "space-guid".into(),
                name: "some-space".into(),
                organization_guid: "org-guid".into(),
            }]),
        );
        mock.queue_associate_staging(&["bind-warning"], Ok(()));
        let actor = Actor::new(mock);
        let mut ui = test_ui("");

        let result = BindSecurityGroupCommand::new(BindSecurityGroupArgs {
            security_group: "sg".into(),
            organization: "some-org".into(),
            space: "some-space".into(),
            lifecycle: "staging".into(),
        })
        .execute(&actor, &targeted_config(), &mut ui)
        .await;
        assert!(result.is_ok());

        let (out, err) = streams(ui);
        assert!(out.contains(
            "Assigning security group sg to space some-space in org some-org as some-user..."
        ));
        assert!(out.contains("OK"));
        assert!(out.contains(RESTART_TIP));
        for warning in ["sg-warning", "org-warning", "space-warning", "bind-warning"] {
            assert!(err.contains(warning), "missing {warning}");
        }
        assert!(actor
            .client()
            .calls()
            .contains(&Call::AssociateSpaceWithStagingSecurityGroup {
                security_group_guid: "sg-guid".into(),
                space_guid: "space-guid".into(),
            }));
    }

    #[tokio::test]
    async fn unbind_uses_targeted_space_when_no_names_given() {
        let mock = MockClient::new();
        mock.queue_security_groups(&[], Ok(vec![group("sg-guid", "sg")]));
        mock.queue_space_running_security_groups(&[], Ok(vec![group("sg-guid", "sg")]));
        mock.queue_remove_running(&[], Ok(()));
        let actor = Actor::new(mock);
        let mut ui = test_ui("");

        let result = UnbindSecurityGroupCommand::new(UnbindSecurityGroupArgs {
            security_group: "sg".into(),
            organization: None,
            space: None,
            lifecycle: "running".into(),
        })
        .execute(&actor, &targeted_config(), &mut ui)
        .await;
        assert!(result.is_ok());

        let (out, _) = streams(ui);
        assert!(out.contains(
            "Unbinding security group sg from org targeted-org / space targeted-space for lifecycle phase 'running' as some-user..."
        ));
        assert!(out.contains("OK"));
        assert!(actor
            .client()
            .calls()
            .contains(&Call::GetSpaceRunningSecurityGroups {
                space_guid: "targeted-space-guid".into(),
                filters: vec![Filter::name("sg")],
            }));
    }

    #[tokio::test]
    async fn unbind_with_names_resolves_them() {
        let mock = MockClient::new();
        mock.queue_organizations(
            &[],
            Ok(vec![Organization {
                guid: "other-org-guid".into(),
                name: "other-org".into(),
            }]),
        );
        mock.queue_spaces(
            &[],
            Ok(vec![Space {
                guid: "other-space-guid".into(),
                name: "other-space".into(),
                organization_guid: "other-org-guid".into(),
            }]),
        );
        mock.queue_security_groups(&[], Ok(vec![group("sg-guid", "sg")]));
        mock.queue_space_running_security_groups(&[], Ok(vec![group("sg-guid", "sg")]));
        mock.queue_remove_running(&[], Ok(()));
        let actor = Actor::new(mock);
        let mut ui = test_ui("");

        let result = UnbindSecurityGroupCommand::new(UnbindSecurityGroupArgs {
            security_group: "sg".into(),
            organization: Some("other-org".into()),
            space: Some("other-space".into()),
            lifecycle: "running".into(),
        })
        .execute(&actor, &targeted_config(), &mut ui)
        .await;
        assert!(result.is_ok());
        assert!(actor
            .client()
            .calls()
            .contains(&Call::RemoveSpaceFromRunningSecurityGroup {
                security_group_guid: "sg-guid".into(),
                space_guid: "other-space-guid".into(),
            }));
    }

    #[tokio::test]
    async fn listing_renders_a_table_with_empty_cells_for_unbound_groups() {
        let mock = MockClient::new();
        mock.queue_security_groups(
            &["list-warning"],
            Ok(vec![group("sg-guid-1", "sg-1"), group("sg-guid-2", "sg-2")]),
        );
        mock.queue_running_spaces(
            &[],
            Ok(vec![Space {
                guid: "space-guid".into(),
                name: "some-space".into(),
                organization_guid: "org-guid".into(),
            }]),
        );
        mock.queue_running_spaces(&[], Ok(vec![]));
        mock.queue_staging_spaces(&[], Ok(vec![]));
        mock.queue_organization(
            &[],
            Ok(Organization {
                guid: "org-guid".into(),
                name: "some-org".into(),
            }),
        );
        let actor = Actor::new(mock);
        let mut ui = test_ui("");

        let result = SecurityGroupsCommand::new()
            .execute(&actor, &targeted_config(), &mut ui)
            .await;
        assert!(result.is_ok());
        assert_eq!(
            actor
                .client()
                .count_calls(|c| matches!(c, Call::GetStagingSpacesBySecurityGroup { .. })),
            2
        );

        let (out, err) = streams(ui);
        assert!(out.contains("Getting security groups as some-user..."));
        assert!(out.contains("name"));
        assert!(out.contains("organization"));
        assert!(out.contains("sg-1"));
        assert!(out.contains("some-org"));
        assert!(out.contains("some-space"));
        assert!(out.contains("running"));
        assert!(out.contains("sg-2"));
        assert!(err.contains("list-warning"));
    }

    #[tokio::test]
    async fn listing_failure_surfaces_the_error() {
        let mock = MockClient::new();
        mock.queue_security_groups(
            &["list-warning"],
            Err(stratus_api::ClientError::Unauthorized),
        );
        let actor = Actor::new(mock);
        let mut ui = test_ui("");

        let result = SecurityGroupsCommand::new()
            .execute(&actor, &targeted_config(), &mut ui)
            .await;
        assert!(result.is_err());

        let (out, err) = streams(ui);
        assert!(err.contains("list-warning"));
        assert!(!out.contains("OK\n"));
    }
}
