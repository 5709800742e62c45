//! The `scale` command.

use std::io::{BufRead, Write};

use stratus_actor::{Actor, ScaleRequest};
use stratus_api::{CloudClient, ProcessScale};

use crate::cli::ScaleArgs;
use crate::config::Config;
use crate::error::CliError;
use crate::ui::Ui;

/// Shows or changes the scale of one process of an application.
#[derive(Debug)]
pub struct ScaleCommand {
    args: ScaleArgs,
}

impl ScaleCommand {
    /// Builds the command from parsed arguments.
    #[must_use]
    pub fn new(args: ScaleArgs) -> Self {
        Self { args }
    }

    /// Runs the scale workflow against the targeted space.
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

        let request = ScaleRequest {
            app_name: self.args.name.clone(),
            space_guid: space.guid.clone(),
            organization_name: organization.name.clone(),
            space_name: space.name.clone(),
            username: user.to_owned(),
            scale: ProcessScale {
                process_type: self.args.process_type.clone(),
                instances: self.args.instances,
                memory_in_mb: self.args.memory,
                disk_in_mb: self.args.disk,
            },
            force: self.args.force,
        };

        actor.show_or_scale(ui, &request).await?;
        Ok(())
    }
}
