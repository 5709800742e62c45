//! The scale workflow.
//!
//! Scaling either shows the current scale (no properties requested),
//! applies an instance-count change in place, or applies a memory/disk
//! change behind a confirmation prompt followed by a full restart with
//! startup polling. Output and warnings go through a [`WorkflowUi`] as
//! the workflow progresses, so polling warnings appear while the wait is
//! still in progress.

use stratus_api::{CloudClient, ProcessScale};
use tokio::sync::mpsc;

use crate::{absorb, ActionError, ActionResult, Actor};

/// Terminal interaction surface the workflow drives.
pub trait WorkflowUi {
    /// Writes one line of user-facing text.
    fn display_text(&mut self, text: &str);

    /// Writes warnings to the warning stream.
    fn display_warnings(&mut self, warnings: &[String]);

    /// Asks a yes/no question, defaulting to no. A failed read counts
    /// as no.
    fn prompt_yes_no(&mut self, prompt: &str) -> bool;
}

/// Everything the scale workflow needs to know, resolved by the caller.
#[derive(Debug, Clone)]
pub struct ScaleRequest {
    /// Application name within the targeted space.
    pub app_name: String,
    /// Guid of the targeted space.
    pub space_guid: String,
    /// Name of the targeted organization, for display only.
    pub organization_name: String,
    /// Name of the targeted space, for display only.
    pub space_name: String,
    /// Acting user, for display only.
    pub username: String,
    /// The requested mutation. An empty mutation means show, not scale.
    pub scale: ProcessScale,
    /// Skip the restart confirmation prompt.
    pub force: bool,
}

/// How the scale workflow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleOutcome {
    /// No properties were requested; current scale was displayed.
    Shown,
    /// The user declined the restart prompt. Nothing was mutated.
    Cancelled,
    /// The mutation was applied (and the app restarted if needed).
    Completed,
}

impl<C: CloudClient> Actor<C> {
    /// Applies a partial scale mutation to one process of an application.
    pub async fn scale_process_by_application(
        &self,
        app_guid: &str,
        scale: &ProcessScale,
    ) -> ActionResult<()> {
        let mut warnings = Vec::new();
        let result = absorb(&mut warnings, self.client().scale_process(app_guid, scale).await);
        (warnings, result.map_err(Into::into))
    }

    /// Runs the scale workflow end to end.
    ///
    /// Warnings are displayed as each underlying call returns; they are
    /// not collected into the return value.
    pub async fn show_or_scale(
        &self,
        ui: &mut impl WorkflowUi,
        request: &ScaleRequest,
    ) -> Result<ScaleOutcome, ActionError> {
        let (warnings, resolved) = self
            .application_by_name_and_space(&request.app_name, &request.space_guid)
            .await;
        ui.display_warnings(&warnings);
        let app = resolved?;

        let process_type = request.scale.process_type.clone();
        let in_context = format!(
            "of app {} in org {} / space {} as {}...",
            request.app_name, request.organization_name, request.space_name, request.username
        );

        if request.scale.is_empty() {
            ui.display_text(&format!(
                "Showing current scale of process {process_type} {in_context}"
            ));
            self.display_current_scale(ui, &app.guid, &process_type).await?;
            return Ok(ScaleOutcome::Shown);
        }

        ui.display_text(&format!("Scaling process {process_type} {in_context}"));

        let restart = request.scale.requires_restart();
        if restart && !request.force {
            let confirmed = ui.prompt_yes_no(&format!(
                "This will cause the app to restart. Are you sure you want to scale {}? [yN]:",
                request.app_name
            ));
            if !confirmed {
                ui.display_text("Scaling cancelled");
                self.display_current_scale(ui, &app.guid, &process_type).await?;
                return Ok(ScaleOutcome::Cancelled);
            }
        }

        let (warnings, result) = self
            .scale_process_by_application(&app.guid, &request.scale)
            .await;
        ui.display_warnings(&warnings);
        result?;

        if restart {
            ui.display_text(&format!(
                "Stopping app {} in org {} / space {} as {}...",
                request.app_name, request.organization_name, request.space_name, request.username
            ));
            let (warnings, result) = self.stop_application(&app.guid).await;
            ui.display_warnings(&warnings);
            result?;

            ui.display_text(&format!(
                "Starting app {} in org {} / space {} as {}...",
                request.app_name, request.organization_name, request.space_name, request.username
            ));
            let (warnings, result) = self.start_application(&app.guid).await;
            ui.display_warnings(&warnings);
            result?;

            // Poll and drain concurrently so warning batches show up
            // while the wait is still running. Dropping the sender when
            // polling finishes closes the channel, so the drain side
            // always sees every batch before the outcome is decided.
            let (tx, mut rx) = mpsc::unbounded_channel();
            let poll = async {
                let result = self.poll_start(&app.guid, &request.app_name, &tx).await;
                drop(tx);
                result
            };
            let drain = async {
                while let Some(batch) = rx.recv().await {
                    ui.display_warnings(&batch);
                }
            };
            let (poll_result, ()) = tokio::join!(poll, drain);
            poll_result?;
        }

        self.display_current_scale(ui, &app.guid, &process_type).await?;
        Ok(ScaleOutcome::Completed)
    }

    async fn display_current_scale(
        &self,
        ui: &mut impl WorkflowUi,
        app_guid: &str,
        process_type: &str,
    ) -> Result<(), ActionError> {
        let (warnings, result) = self
            .process_by_application_and_type(app_guid, process_type)
            .await;
        ui.display_warnings(&warnings);
        let process = result?;

        ui.display_text(&format!("memory:    {}", format_megabytes(process.memory_in_mb)));
        ui.display_text(&format!("disk:      {}", format_megabytes(process.disk_in_mb)));
        ui.display_text(&format!("instances: {}", process.instances));
        Ok(())
    }
}

/// Renders a megabyte quantity the way operators write them: whole
/// gigabytes as `1G`, everything else as `32M`.
fn format_megabytes(megabytes: u64) -> String {
    if megabytes > 0 && megabytes % 1024 == 0 {
        format!("{}G", megabytes / 1024)
    } else {
        format!("{megabytes}M")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::time::Duration;

    use stratus_api::mock::{Call, MockClient};
    use stratus_api::{Application, InstanceState, Process, ProcessInstance};

    use super::*;

    #[derive(Default)]
    struct TestUi {
        out: Vec<String>,
        warnings: Vec<String>,
        answers: VecDeque<bool>,
        prompts: Vec<String>,
    }

    impl WorkflowUi for TestUi {
        fn display_text(&mut self, text: &str) {
            self.out.push(text.to_owned());
        }

        fn display_warnings(&mut self, warnings: &[String]) {
            self.warnings.extend_from_slice(warnings);
        }

        fn prompt_yes_no(&mut self, prompt: &str) -> bool {
            self.prompts.push(prompt.to_owned());
            self.answers.pop_front().unwrap_or(false)
        }
    }

    fn request(scale: ProcessScale, force: bool) -> ScaleRequest {
        ScaleRequest {
            app_name: "some-app".into(),
            space_guid: "some-space-guid".into(),
            organization_name: "some-org".into(),
            space_name: "some-space".into(),
            username: "some-user".into(),
            scale,
            force,
        }
    }

    fn mock_with_app() -> MockClient {
        let mock = MockClient::new();
        mock.queue_applications(
            &["get-app-warning"],
            Ok(vec![Application {
                guid: "some-app-guid".into(),
                name: "some-app".into(),
            }]),
        );
        mock
    }

    fn queue_current_scale(mock: &MockClient, instances: u32, memory: u64, disk: u64) {
        mock.queue_application_processes(
            &["get-instances-warning"],
            Ok(vec![Process {
                guid: "web-process-guid".into(),
                process_type: "web".into(),
                instances,
                memory_in_mb: memory,
                disk_in_mb: disk,
            }]),
        );
    }

    fn web_scale() -> ProcessScale {
        ProcessScale {
            process_type: "web".into(),
            ..ProcessScale::default()
        }
    }

    #[tokio::test]
    async fn empty_request_shows_current_scale_without_mutating() {
        let mock = mock_with_app();
        queue_current_scale(&mock, 3, 32, 1024);
        let actor = Actor::new(mock);
        let mut ui = TestUi::default();

        let outcome = actor.show_or_scale(&mut ui, &request(web_scale(), false)).await;
        assert_eq!(outcome, Ok(ScaleOutcome::Shown));

        assert_eq!(
            ui.out,
            vec![
                "Showing current scale of process web of app some-app in org some-org / space some-space as some-user...",
                "memory:    32M",
                "disk:      1G",
                "instances: 3",
            ]
        );
        assert_eq!(ui.warnings, vec!["get-app-warning", "get-instances-warning"]);
        assert!(ui.prompts.is_empty());
        assert_eq!(
            actor
                .client()
                .count_calls(|c| matches!(c, Call::ScaleProcess { .. })),
            0
        );
    }

    #[tokio::test]
    async fn instance_change_scales_without_restart_or_prompt() {
        let mock = mock_with_app();
        mock.queue_scale_process(&["scale-warning"], Ok(()));
        queue_current_scale(&mock, 3, 32, 1024);
        let actor = Actor::new(mock);
        let mut ui = TestUi::default();

        let scale = ProcessScale {
            instances: Some(3),
            ..web_scale()
        };
        let outcome = actor.show_or_scale(&mut ui, &request(scale.clone(), false)).await;
        assert_eq!(outcome, Ok(ScaleOutcome::Completed));

        assert!(ui.prompts.is_empty());
        assert!(ui.out.iter().any(|l| l.starts_with("Scaling process web")));
        assert!(!ui.out.iter().any(|l| l.starts_with("Stopping")));
        assert!(!ui.out.iter().any(|l| l.starts_with("Starting")));
        assert_eq!(
            ui.warnings,
            vec!["get-app-warning", "scale-warning", "get-instances-warning"]
        );
        assert_eq!(
            actor
                .client()
                .count_calls(|c| matches!(c, Call::ScaleProcess { .. })),
            1
        );
        assert!(actor.client().calls().contains(&Call::ScaleProcess {
            app_guid: "some-app-guid".into(),
            scale,
        }));
        assert_eq!(
            actor
                .client()
                .count_calls(|c| matches!(
                    c,
                    Call::StopApplication { .. } | Call::StartApplication { .. }
                )),
            0
        );
    }

    #[tokio::test]
    async fn declined_prompt_cancels_and_still_shows_current_scale() {
        let mock = mock_with_app();
        queue_current_scale(&mock, 2, 50, 1024);
        let actor = Actor::new(mock);
        let mut ui = TestUi::default();

        let scale = ProcessScale {
            memory_in_mb: Some(100),
            ..web_scale()
        };
        let outcome = actor.show_or_scale(&mut ui, &request(scale, false)).await;
        assert_eq!(outcome, Ok(ScaleOutcome::Cancelled));

        assert_eq!(
            ui.prompts,
            vec!["This will cause the app to restart. Are you sure you want to scale some-app? [yN]:"]
        );
        assert_eq!(
            ui.out,
            vec![
                "Scaling process web of app some-app in org some-org / space some-space as some-user...",
                "Scaling cancelled",
                "memory:    50M",
                "disk:      1G",
                "instances: 2",
            ]
        );
        assert_eq!(
            actor
                .client()
                .count_calls(|c| matches!(c, Call::ScaleProcess { .. })),
            0
        );
    }

    #[tokio::test]
    async fn confirmed_restart_runs_scale_stop_start_poll_then_shows_scale() {
        let mock = mock_with_app();
        mock.queue_scale_process(&["scale-warning"], Ok(()));
        mock.queue_stop_application(&["stop-warning"], Ok(Application::default()));
        mock.queue_start_application(&["start-warning"], Ok(Application::default()));
        queue_current_scale(&mock, 2, 100, 1024);
        mock.queue_process_instances(
            &["poll-warning-1", "poll-warning-2"],
            Ok(vec![ProcessInstance {
                index: 0,
                state: InstanceState::Running,
            }]),
        );
        let actor = Actor::new(mock);
        let mut ui = TestUi::default();
        ui.answers.push_back(true);

        let scale = ProcessScale {
            instances: Some(2),
            memory_in_mb: Some(100),
            disk_in_mb: Some(50),
            ..web_scale()
        };
        let outcome = actor.show_or_scale(&mut ui, &request(scale, false)).await;
        assert_eq!(outcome, Ok(ScaleOutcome::Completed));

        assert!(ui.out.iter().any(|l| l.starts_with(
            "Stopping app some-app in org some-org / space some-space as some-user"
        )));
        assert!(ui.out.iter().any(|l| l.starts_with(
            "Starting app some-app in org some-org / space some-space as some-user"
        )));
        assert_eq!(
            ui.warnings,
            vec![
                "get-app-warning",
                "scale-warning",
                "stop-warning",
                "start-warning",
                "get-instances-warning",
                "poll-warning-1",
                "poll-warning-2",
                "get-instances-warning",
            ]
        );
        assert_eq!(
            actor
                .client()
                .count_calls(|c| matches!(c, Call::StopApplication { .. })),
            1
        );
        assert_eq!(
            actor
                .client()
                .count_calls(|c| matches!(c, Call::StartApplication { .. })),
            1
        );
    }

    #[tokio::test]
    async fn force_skips_the_prompt() {
        let mock = mock_with_app();
        mock.queue_scale_process(&[], Ok(()));
        mock.queue_stop_application(&[], Ok(Application::default()));
        mock.queue_start_application(&[], Ok(Application::default()));
        queue_current_scale(&mock, 2, 100, 1024);
        mock.queue_process_instances(
            &[],
            Ok(vec![ProcessInstance {
                index: 0,
                state: InstanceState::Running,
            }]),
        );
        let actor = Actor::new(mock);
        let mut ui = TestUi::default();

        let scale = ProcessScale {
            memory_in_mb: Some(100),
            ..web_scale()
        };
        let outcome = actor.show_or_scale(&mut ui, &request(scale, true)).await;
        assert_eq!(outcome, Ok(ScaleOutcome::Completed));
        assert!(ui.prompts.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn poll_timeout_surfaces_as_startup_timeout() {
        let mock = mock_with_app();
        mock.queue_scale_process(&[], Ok(()));
        mock.queue_stop_application(&[], Ok(Application::default()));
        mock.queue_start_application(&[], Ok(Application::default()));
        queue_current_scale(&mock, 1, 100, 1024);
        mock.queue_process_instances(
            &[],
            Ok(vec![ProcessInstance {
                index: 0,
                state: InstanceState::Starting,
            }]),
        );
        let actor = Actor::with_timeouts(
            mock,
            Duration::from_secs(2),
            Duration::from_secs(1),
        );
        let mut ui = TestUi::default();

        let scale = ProcessScale {
            memory_in_mb: Some(100),
            ..web_scale()
        };
        let outcome = actor.show_or_scale(&mut ui, &request(scale, true)).await;
        assert_eq!(
            outcome,
            Err(ActionError::StartupTimeout {
                app_name: "some-app".into(),
            })
        );
    }

    #[test]
    fn megabyte_formatting() {
        assert_eq!(format_megabytes(32), "32M");
        assert_eq!(format_megabytes(1024), "1G");
        assert_eq!(format_megabytes(2048), "2G");
        assert_eq!(format_megabytes(1536), "1536M");
        assert_eq!(format_megabytes(0), "0M");
    }
}
