//! The Cloud Controller boundary trait.

use crate::error::ClientError;
use crate::query::Filter;
use crate::types::{
    Application, Organization, Process, ProcessInstance, ProcessScale, SecurityGroup, Space,
    Warnings,
};

/// Outcome of a single API call.
///
/// Warnings always travel with the result: a failed call still returns the
/// warnings the platform attached to its error response.
pub type CallOutcome<T> = (Warnings, Result<T, ClientError>);

/// A client for the Stratus Cloud Controller.
///
/// Each method performs exactly one REST operation: no aggregation, no
/// retries, no cross-call state. The actor layer composes these into
/// workflows.
#[allow(async_fn_in_trait)]
pub trait CloudClient {
    /// Lists security groups matching the given filters.
    async fn get_security_groups(&self, filters: &[Filter]) -> CallOutcome<Vec<SecurityGroup>>;

    /// Lists spaces a security group is bound to for the running lifecycle.
    async fn get_running_spaces_by_security_group(&self, guid: &str) -> CallOutcome<Vec<Space>>;

    /// Lists spaces a security group is bound to for the staging lifecycle.
    async fn get_staging_spaces_by_security_group(&self, guid: &str) -> CallOutcome<Vec<Space>>;

    /// Lists security groups bound to a space for the running lifecycle.
    async fn get_space_running_security_groups(
        &self,
        space_guid: &str,
        filters: &[Filter],
    ) -> CallOutcome<Vec<SecurityGroup>>;

    /// Lists security groups bound to a space for the staging lifecycle.
    async fn get_space_staging_security_groups(
        &self,
        space_guid: &str,
        filters: &[Filter],
    ) -> CallOutcome<Vec<SecurityGroup>>;

    /// Binds a security group to a space for the running lifecycle.
    async fn associate_space_with_running_security_group(
        &self,
        security_group_guid: &str,
        space_guid: &str,
    ) -> CallOutcome<()>;

    /// Binds a security group to a space for the staging lifecycle.
    async fn associate_space_with_staging_security_group(
        &self,
        security_group_guid: &str,
        space_guid: &str,
    ) -> CallOutcome<()>;

    /// Unbinds a security group from a space for the running lifecycle.
    async fn remove_space_from_running_security_group(
        &self,
        security_group_guid: &str,
        space_guid: &str,
    ) -> CallOutcome<()>;

    /// Unbinds a security group from a space for the staging lifecycle.
    async fn remove_space_from_staging_security_group(
        &self,
        security_group_guid: &str,
        space_guid: &str,
    ) -> CallOutcome<()>;

    /// Fetches a single organization by guid.
    async fn get_organization(&self, guid: &str) -> CallOutcome<Organization>;

    /// Lists organizations matching the given filters.
    async fn get_organizations(&self, filters: &[Filter]) -> CallOutcome<Vec<Organization>>;

    /// Lists spaces matching the given filters.
    async fn get_spaces(&self, filters: &[Filter]) -> CallOutcome<Vec<Space>>;

    /// Lists applications matching the given filters.
    async fn get_applications(&self, filters: &[Filter]) -> CallOutcome<Vec<Application>>;

    /// Creates an application in a space.
    async fn create_application(&self, name: &str, space_guid: &str) -> CallOutcome<Application>;

    /// Deletes an application.
    async fn delete_application(&self, guid: &str) -> CallOutcome<()>;

    /// Requests that an application start.
    async fn start_application(&self, guid: &str) -> CallOutcome<Application>;

    /// Requests that an application stop.
    async fn stop_application(&self, guid: &str) -> CallOutcome<Application>;

    /// Lists the processes of an application.
    async fn get_application_processes(&self, app_guid: &str) -> CallOutcome<Vec<Process>>;

    /// Applies a partial scale mutation to one process of an application.
    async fn scale_process(&self, app_guid: &str, scale: &ProcessScale) -> CallOutcome<()>;

    /// Lists the instances of a process.
    async fn get_process_instances(
        &self,
        process_guid: &str,
    ) -> CallOutcome<Vec<ProcessInstance>>;

    /// Terminates a single process instance so the platform recreates it.
    async fn delete_process_instance(
        &self,
        app_guid: &str,
        process_type: &str,
        index: u32,
    ) -> CallOutcome<()>;
}
