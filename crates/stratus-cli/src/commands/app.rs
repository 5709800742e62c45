//! The `create-app` and `delete` commands.

use std::io::{BufRead, Write};

use stratus_actor::{ActionError, Actor};
use stratus_api::CloudClient;

use crate::config::Config;
use crate::error::CliError;
use crate::ui::Ui;

/// Creates an application in the targeted space.
#[derive(Debug)]
pub struct CreateAppCommand {
    name: String,
}

impl CreateAppCommand {
    /// Builds the command for one application name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Creates the application. A name collision is reported as a warning
    /// and the command still succeeds, so scripted pushes are idempotent.
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
            "Creating app {} in org {} / space {} as {}...",
            self.name, organization.name, space.name, user
        ));

        let (warnings, result) = actor
            .create_application_by_name_and_space(&self.name, &space.guid)
            .await;
        ui.warnings(&warnings);
        match result {
            Ok(_) => {}
            Err(ActionError::ApplicationAlreadyExists { name }) => {
                ui.warnings(&[format!("App {name} already exists")]);
            }
            Err(e) => return Err(e.into()),
        }

        ui.ok();
        Ok(())
    }
}

/// Deletes an application from the targeted space.
#[derive(Debug)]
pub struct DeleteCommand {
    name: String,
    force: bool,
}

impl DeleteCommand {
    /// Builds the command for one application name.
    #[must_use]
    pub fn new(name: impl Into<String>, force: bool) -> Self {
        Self {
            name: name.into(),
            force,
        }
    }

    /// Deletes the application after confirmation. Deleting an app that
    /// does not exist succeeds with a notice.
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

        if !self.force {
            let confirmed =
                ui.confirm(&format!("Really delete the app {}? [yN]:", self.name));
            if !confirmed {
                ui.text("Delete cancelled");
                return Ok(());
            }
        }

        ui.text(&format!(
            "Deleting app {} in org {} / space {} as {}...",
            self.name, organization.name, space.name, user
        ));

        let (warnings, result) = actor
            .delete_application_by_name_and_space(&self.name, &space.guid)
            .await;
        ui.warnings(&warnings);
        match result {
            Ok(()) => {}
            Err(ActionError::ApplicationNotFound { name }) => {
                ui.text(&format!("App {name} does not exist."));
            }
            Err(e) => return Err(e.into()),
        }

        ui.ok();
        Ok(())
    }
}
