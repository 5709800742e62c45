//! Process lookups and single-instance restarts.

use stratus_api::{ClientError, CloudClient, Process};
use tracing::debug;

use crate::{absorb, ActionError, ActionResult, Actor};

impl<C: CloudClient> Actor<C> {
    /// Finds one process of an application by type.
    pub async fn process_by_application_and_type(
        &self,
        app_guid: &str,
        process_type: &str,
    ) -> ActionResult<Process> {
        let mut warnings = Vec::new();
        let result = absorb(
            &mut warnings,
            self.client().get_application_processes(app_guid).await,
        );
        let processes = match result {
            Ok(processes) => processes,
            Err(e) => return (warnings, Err(e.into())),
        };

        match processes.into_iter().find(|p| p.process_type == process_type) {
            Some(process) => (warnings, Ok(process)),
            None => {
                debug!(app_guid, process_type, "process not found");
                (
                    warnings,
                    Err(ActionError::ProcessNotFound {
                        process_type: process_type.to_owned(),
                    }),
                )
            }
        }
    }

    /// Terminates one instance of an application's process so the platform
    /// recreates it. The application is resolved by name within the space.
    pub async fn delete_instance_by_application_name_space_process_type_and_index(
        &self,
        app_name: &str,
        space_guid: &str,
        process_type: &str,
        index: u32,
    ) -> ActionResult<()> {
        let (mut warnings, resolved) = self
            .application_by_name_and_space(app_name, space_guid)
            .await;
        let application = match resolved {
            Ok(application) => application,
            Err(e) => return (warnings, Err(e)),
        };

        let result = absorb(
            &mut warnings,
            self.client()
                .delete_process_instance(&application.guid, process_type, index)
                .await,
        );
        match result {
            Ok(()) => (warnings, Ok(())),
            Err(ClientError::ResourceNotFound) => (
                warnings,
                Err(ActionError::ProcessNotFound {
                    process_type: process_type.to_owned(),
                }),
            ),
            Err(e) => (warnings, Err(e.into())),
        }
    }
}
