//! Startup polling.
//!
//! After a restart the platform brings instances up asynchronously. The
//! poller watches the application's processes until every process that
//! wants instances has at least one running, the startup timeout passes,
//! or a call fails. Warnings stream to the caller in per-round batches
//! over a channel so they can be displayed while polling continues.

use stratus_api::{CloudClient, InstanceState, Warnings};
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::{absorb, ActionError, Actor};

impl<C: CloudClient> Actor<C> {
    /// Polls until the application is up.
    ///
    /// Each round fetches the process list and the instances of every
    /// process with a nonzero desired instance count, then sends that
    /// round's warnings as one batch. The round's batch is sent before
    /// the outcome is decided, so a failing round still delivers its
    /// warnings. Dropping the receiver does not abort polling.
    pub async fn poll_start(
        &self,
        app_guid: &str,
        app_name: &str,
        warnings_tx: &UnboundedSender<Warnings>,
    ) -> Result<(), ActionError> {
        let deadline = Instant::now() + self.startup_timeout;
        loop {
            let mut round = Warnings::new();

            let processes = match absorb(
                &mut round,
                self.client().get_application_processes(app_guid).await,
            ) {
                Ok(processes) => processes,
                Err(e) => {
                    let _ = warnings_tx.send(round);
                    return Err(e.into());
                }
            };

            let mut all_ready = true;
            for process in processes.iter().filter(|p| p.instances > 0) {
                let instances = match absorb(
                    &mut round,
                    self.client().get_process_instances(&process.guid).await,
                ) {
                    Ok(instances) => instances,
                    Err(e) => {
                        let _ = warnings_tx.send(round);
                        return Err(e.into());
                    }
                };
                if !instances.iter().any(|i| i.state == InstanceState::Running) {
                    all_ready = false;
                }
            }

            let _ = warnings_tx.send(round);
            if all_ready {
                debug!(app_guid, "all processes report a running instance");
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(ActionError::StartupTimeout {
                    app_name: app_name.to_owned(),
                });
            }
            sleep(self.poll_interval).await;
        }
    }
}
