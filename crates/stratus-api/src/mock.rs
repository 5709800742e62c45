//! In-memory [`CloudClient`] for tests.
//!
//! Responses are queued per endpoint and consumed in FIFO order; once a
//! queue is down to its final entry that entry repeats, so polling loops
//! can observe a stable terminal state. Every call is recorded in order
//! with its arguments.
//!
//! Only available with the `mock` feature.

use std::sync::{Mutex, PoisonError};

use crate::client::{CallOutcome, CloudClient};
use crate::error::ClientError;
use crate::query::Filter;
use crate::types::{
    Application, Organization, Process, ProcessInstance, ProcessScale, SecurityGroup, Space,
    Warnings,
};

/// One recorded call with the arguments it was made with.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Call {
    GetSecurityGroups { filters: Vec<Filter> },
    GetRunningSpacesBySecurityGroup { guid: String },
    GetStagingSpacesBySecurityGroup { guid: String },
    GetSpaceRunningSecurityGroups { space_guid: String, filters: Vec<Filter> },
    GetSpaceStagingSecurityGroups { space_guid: String, filters: Vec<Filter> },
    AssociateSpaceWithRunningSecurityGroup { security_group_guid: String, space_guid: String },
    AssociateSpaceWithStagingSecurityGroup { security_group_guid: String, space_guid: String },
    RemoveSpaceFromRunningSecurityGroup { security_group_guid: String, space_guid: String },
    RemoveSpaceFromStagingSecurityGroup { security_group_guid: String, space_guid: String },
    GetOrganization { guid: String },
    GetOrganizations { filters: Vec<Filter> },
    GetSpaces { filters: Vec<Filter> },
    GetApplications { filters: Vec<Filter> },
    CreateApplication { name: String, space_guid: String },
    DeleteApplication { guid: String },
    StartApplication { guid: String },
    StopApplication { guid: String },
    GetApplicationProcesses { app_guid: String },
    ScaleProcess { app_guid: String, scale: ProcessScale },
    GetProcessInstances { process_guid: String },
    DeleteProcessInstance { app_guid: String, process_type: String, index: u32 },
}

/// FIFO response queue that repeats its last entry once drained.
#[derive(Debug)]
struct Queue<T> {
    responses: Vec<CallOutcome<T>>,
    cursor: usize,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self {
            responses: Vec::new(),
            cursor: 0,
        }
    }
}

impl<T: Clone> Queue<T> {
    fn push(&mut self, warnings: Warnings, result: Result<T, ClientError>) {
        self.responses.push((warnings, result));
    }

    fn take(&mut self, endpoint: &str) -> CallOutcome<T> {
        if self.responses.is_empty() {
            return (
                Warnings::new(),
                Err(ClientError::Transport(format!(
                    "mock: no response queued for {endpoint}"
                ))),
            );
        }
        let outcome = self.responses[self.cursor].clone();
        if self.cursor + 1 < self.responses.len() {
            self.cursor += 1;
        }
        outcome
    }
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<Call>,
    security_groups: Queue<Vec<SecurityGroup>>,
    running_spaces: Queue<Vec<Space>>,
    staging_spaces: Queue<Vec<Space>>,
    space_running_security_groups: Queue<Vec<SecurityGroup>>,
    space_staging_security_groups: Queue<Vec<SecurityGroup>>,
    associate_running: Queue<()>,
    associate_staging: Queue<()>,
    remove_running: Queue<()>,
    remove_staging: Queue<()>,
    organization: Queue<Organization>,
    organizations: Queue<Vec<Organization>>,
    spaces: Queue<Vec<Space>>,
    applications: Queue<Vec<Application>>,
    create_application: Queue<Application>,
    delete_application: Queue<()>,
    start_application: Queue<Application>,
    stop_application: Queue<Application>,
    application_processes: Queue<Vec<Process>>,
    scale_process: Queue<()>,
    process_instances: Queue<Vec<ProcessInstance>>,
    delete_process_instance: Queue<()>,
}

/// A scripted client for driving actor and command tests.
#[derive(Debug, Default)]
pub struct MockClient {
    state: Mutex<State>,
}

fn warnings_of(warnings: &[&str]) -> Warnings {
    warnings.iter().map(ToString::to_string).collect()
}

macro_rules! queue_method {
    ($(#[$doc:meta])* $name:ident, $field:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $name(&self, warnings: &[&str], result: Result<$ty, ClientError>) {
            self.locked().$field.push(warnings_of(warnings), result);
        }
    };
}

impl MockClient {
    /// Creates a mock with nothing queued. Any call made before a
    /// response is queued for its endpoint fails with a transport error.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All calls made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.locked().calls.clone()
    }

    /// Number of recorded calls matching the predicate.
    #[must_use]
    pub fn count_calls(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.locked().calls.iter().filter(|c| matches(c)).count()
    }

    queue_method!(
        /// Queues a response for `get_security_groups`.
        queue_security_groups, security_groups, Vec<SecurityGroup>);
    queue_method!(
        /// Queues a response for `get_running_spaces_by_security_group`.
        queue_running_spaces, running_spaces, Vec<Space>);
    queue_method!(
        /// Queues a response for `get_staging_spaces_by_security_group`.
        queue_staging_spaces, staging_spaces, Vec<Space>);
    queue_method!(
        /// Queues a response for `get_space_running_security_groups`.
        queue_space_running_security_groups, space_running_security_groups, Vec<SecurityGroup>);
    queue_method!(
        /// Queues a response for `get_space_staging_security_groups`.
        queue_space_staging_security_groups, space_staging_security_groups, Vec<SecurityGroup>);
    queue_method!(
        /// Queues a response for `associate_space_with_running_security_group`.
        queue_associate_running, associate_running, ());
    queue_method!(
        /// Queues a response for `associate_space_with_staging_security_group`.
        queue_associate_staging, associate_staging, ());
    queue_method!(
        /// Queues a response for `remove_space_from_running_security_group`.
        queue_remove_running, remove_running, ());
    queue_method!(
        /// Queues a response for `remove_space_from_staging_security_group`.
        queue_remove_staging, remove_staging, ());
    queue_method!(
        /// Queues a response for `get_organization`.
        queue_organization, organization, Organization);
    queue_method!(
        /// Queues a response for `get_organizations`.
        queue_organizations, organizations, Vec<Organization>);
    queue_method!(
        /// Queues a response for `get_spaces`.
        queue_spaces, spaces, Vec<Space>);
    queue_method!(
        /// Queues a response for `get_applications`.
        queue_applications, applications, Vec<Application>);
    queue_method!(
        /// Queues a response for `create_application`.
        queue_create_application, create_application, Application);
    queue_method!(
        /// Queues a response for `delete_application`.
        queue_delete_application, delete_application, ());
    queue_method!(
        /// Queues a response for `start_application`.
        queue_start_application, start_application, Application);
    queue_method!(
        /// Queues a response for `stop_application`.
        queue_stop_application, stop_application, Application);
    queue_method!(
        /// Queues a response for `get_application_processes`.
        queue_application_processes, application_processes, Vec<Process>);
    queue_method!(
        /// Queues a response for `scale_process`.
        queue_scale_process, scale_process, ());
    queue_method!(
        /// Queues a response for `get_process_instances`.
        queue_process_instances, process_instances, Vec<ProcessInstance>);
    queue_method!(
        /// Queues a response for `delete_process_instance`.
        queue_delete_process_instance, delete_process_instance, ());
}

impl CloudClient for MockClient {
    async fn get_security_groups(&self, filters: &[Filter]) -> CallOutcome<Vec<SecurityGroup>> {
        let mut state = self.locked();
        state.calls.push(Call::GetSecurityGroups {
            filters: filters.to_vec(),
        });
        state.security_groups.take("get_security_groups")
    }

    async fn get_running_spaces_by_security_group(&self, guid: &str) -> CallOutcome<Vec<Space>> {
        let mut state = self.locked();
        state.calls.push(Call::GetRunningSpacesBySecurityGroup {
            guid: guid.to_owned(),
        });
        state
            .running_spaces
            .take("get_running_spaces_by_security_group")
    }

    async fn get_staging_spaces_by_security_group(&self, guid: &str) -> CallOutcome<Vec<Space>> {
        let mut state = self.locked();
        state.calls.push(Call::GetStagingSpacesBySecurityGroup {
            guid: guid.to_owned(),
        });
        state
            .staging_spaces
            .take("get_staging_spaces_by_security_group")
    }

    async fn get_space_running_security_groups(
        &self,
        space_guid: &str,
        filters: &[Filter],
    ) -> CallOutcome<Vec<SecurityGroup>> {
        let mut state = self.locked();
        state.calls.push(Call::GetSpaceRunningSecurityGroups {
            space_guid: space_guid.to_owned(),
            filters: filters.to_vec(),
        });
        state
            .space_running_security_groups
            .take("get_space_running_security_groups")
    }

    async fn get_space_staging_security_groups(
        &self,
        space_guid: &str,
        filters: &[Filter],
    ) -> CallOutcome<Vec<SecurityGroup>> {
        let mut state = self.locked();
        state.calls.push(Call::GetSpaceStagingSecurityGroups {
            space_guid: space_guid.to_owned(),
            filters: filters.to_vec(),
        });
        state
            .space_staging_security_groups
            .take("get_space_staging_security_groups")
    }

    async fn associate_space_with_running_security_group(
        &self,
        security_group_guid: &str,
        space_guid: &str,
    ) -> CallOutcome<()> {
        let mut state = self.locked();
        state
            .calls
            .push(Call::AssociateSpaceWithRunningSecurityGroup {
                security_group_guid: security_group_guid.to_owned(),
                space_guid: space_guid.to_owned(),
            });
        state
            .associate_running
            .take("associate_space_with_running_security_group")
    }

    async fn associate_space_with_staging_security_group(
        &self,
        security_group_guid: &str,
        space_guid: &str,
    ) -> CallOutcome<()> {
        let mut state = self.locked();
        state
            .calls
            .push(Call::AssociateSpaceWithStagingSecurityGroup {
                security_group_guid: security_group_guid.to_owned(),
                space_guid: space_guid.to_owned(),
            });
        state
            .associate_staging
            .take("associate_space_with_staging_security_group")
    }

    async fn remove_space_from_running_security_group(
        &self,
        security_group_guid: &str,
        space_guid: &str,
    ) -> CallOutcome<()> {
        let mut state = self.locked();
        state.calls.push(Call::RemoveSpaceFromRunningSecurityGroup {
            security_group_guid: security_group_guid.to_owned(),
            space_guid: space_guid.to_owned(),
        });
        state
            .remove_running
            .take("remove_space_from_running_security_group")
    }

    async fn remove_space_from_staging_security_group(
        &self,
        security_group_guid: &str,
        space_guid: &str,
    ) -> CallOutcome<()> {
        let mut state = self.locked();
        state.calls.push(Call::RemoveSpaceFromStagingSecurityGroup {
            security_group_guid: security_group_guid.to_owned(),
            space_guid: space_guid.to_owned(),
        });
        state
            .remove_staging
            .take("remove_space_from_staging_security_group")
    }

    async fn get_organization(&self, guid: &str) -> CallOutcome<Organization> {
        let mut state = self.locked();
        state.calls.push(Call::GetOrganization {
            guid: guid.to_owned(),
        });
        state.organization.take("get_organization")
    }

    async fn get_organizations(&self, filters: &[Filter]) -> CallOutcome<Vec<Organization>> {
        let mut state = self.locked();
        state.calls.push(Call::GetOrganizations {
            filters: filters.to_vec(),
        });
        state.organizations.take("get_organizations")
    }

    async fn get_spaces(&self, filters: &[Filter]) -> CallOutcome<Vec<Space>> {
        let mut state = self.locked();
        state.calls.push(Call::GetSpaces {
            filters: filters.to_vec(),
        });
        state.spaces.take("get_spaces")
    }

    async fn get_applications(&self, filters: &[Filter]) -> CallOutcome<Vec<Application>> {
        let mut state = self.locked();
        state.calls.push(Call::GetApplications {
            filters: filters.to_vec(),
        });
        state.applications.take("get_applications")
    }

    async fn create_application(&self, name: &str, space_guid: &str) -> CallOutcome<Application> {
        let mut state = self.locked();
        state.calls.push(Call::CreateApplication {
            name: name.to_owned(),
            space_guid: space_guid.to_owned(),
        });
        state.create_application.take("create_application")
    }

    async fn delete_application(&self, guid: &str) -> CallOutcome<()> {
        let mut state = self.locked();
        state.calls.push(Call::DeleteApplication {
            guid: guid.to_owned(),
        });
        state.delete_application.take("delete_application")
    }

    async fn start_application(&self, guid: &str) -> CallOutcome<Application> {
        let mut state = self.locked();
        state.calls.push(Call::StartApplication {
            guid: guid.to_owned(),
        });
        state.start_application.take("start_application")
    }

    async fn stop_application(&self, guid: &str) -> CallOutcome<Application> {
        let mut state = self.locked();
        state.calls.push(Call::StopApplication {
            guid: guid.to_owned(),
        });
        state.stop_application.take("stop_application")
    }

    async fn get_application_processes(&self, app_guid: &str) -> CallOutcome<Vec<Process>> {
        let mut state = self.locked();
        state.calls.push(Call::GetApplicationProcesses {
            app_guid: app_guid.to_owned(),
        });
        state.application_processes.take("get_application_processes")
    }

    async fn scale_process(&self, app_guid: &str, scale: &ProcessScale) -> CallOutcome<()> {
        let mut state = self.locked();
        state.calls.push(Call::ScaleProcess {
            app_guid: app_guid.to_owned(),
            scale: scale.clone(),
        });
        state.scale_process.take("scale_process")
    }

    async fn get_process_instances(
        &self,
        process_guid: &str,
    ) -> CallOutcome<Vec<ProcessInstance>> {
        let mut state = self.locked();
        state.calls.push(Call::GetProcessInstances {
            process_guid: process_guid.to_owned(),
        });
        state.process_instances.take("get_process_instances")
    }

    async fn delete_process_instance(
        &self,
        app_guid: &str,
        process_type: &str,
        index: u32,
    ) -> CallOutcome<()> {
        let mut state = self.locked();
        state.calls.push(Call::DeleteProcessInstance {
            app_guid: app_guid.to_owned(),
            process_type: process_type.to_owned(),
            index,
        });
        state.delete_process_instance.take("delete_process_instance")
    }
}
