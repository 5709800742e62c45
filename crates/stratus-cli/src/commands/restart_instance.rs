//! The `restart-app-instance` command.

use std::io::{BufRead, Write};

use stratus_actor::Actor;
use stratus_api::CloudClient;

use crate::cli::RestartAppInstanceArgs;
use crate::config::Config;
use crate::error::CliError;
use crate::ui::Ui;

/// Terminates one instance of a process so the platform recreates it.
#[derive(Debug)]
pub struct RestartAppInstanceCommand {
    args: RestartAppInstanceArgs,
}

impl RestartAppInstanceCommand {
    /// Builds the command from parsed arguments.
    #[must_use]
    pub fn new(args: RestartAppInstanceArgs) -> Self {
        Self { args }
    }

    /// Restarts the instance in the targeted space.
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
        let organization = config.targeted_organization()?;
        let space = config.targeted_space()?;
        let user = config.current_user()?;

        ui.text(&format!(
            "Restarting instance {} of process {} of app {} in org {} / space {} as {}...",
            self.args.index,
            self.args.process_type,
            self.args.name,
            organization.name,
            space.name,
            user
        ));

        let (warnings, result) = actor
            .delete_instance_by_application_name_space_process_type_and_index(
                &self.args.name,
                &space.guid,
                &self.args.process_type,
                self.args.index,
            )
            .await;
        ui.warnings(&warnings);
        result?;

        ui.ok();
        Ok(())
    }
}
