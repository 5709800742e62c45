//! Reqwest-backed implementation of [`CloudClient`].
//!
//! The Cloud Controller wraps every JSON response in an envelope carrying
//! an optional `warnings` array. List endpoints return `resources`, single
//! resources `resource`, mutations just the warnings. Error responses are
//! `{ "description": ..., "warnings": [...] }`; their warnings are
//! returned to the caller alongside the error.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, trace};
use url::Url;

use crate::client::{CallOutcome, CloudClient};
use crate::error::ClientError;
use crate::query::Filter;
use crate::types::{
    Application, Organization, Process, ProcessInstance, ProcessScale, SecurityGroup, Space,
    Warnings,
};

/// Default connect timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default per-request timeout.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Stratus Cloud Controller.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    base: String,
    token: Option<String>,
}

impl HttpClient {
    /// Creates a client for the given API endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an `http://` or `https://`
    /// URL, or if the underlying client cannot be constructed.
    pub fn new(endpoint: &str, token: Option<String>) -> Result<Self, ClientError> {
        let parsed =
            Url::parse(endpoint).map_err(|e| ClientError::Endpoint(format!("{endpoint}: {e}")))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ClientError::Endpoint(format!(
                "{endpoint}: must start with http:// or https://"
            )));
        }

        let inner = reqwest::Client::builder()
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            inner,
            base: endpoint.trim_end_matches('/').to_owned(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Sends a request and splits the response into a JSON value or an
    /// error with whatever warnings the error body carried.
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        filters: &[Filter],
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, (Warnings, ClientError)> {
        debug!(%method, path, "Cloud Controller request");

        let mut request = self.inner.request(method, self.url(path));
        if !filters.is_empty() {
            let pairs: Vec<(&str, &str)> = filters
                .iter()
                .map(|f| (f.field.as_str(), f.value.as_str()))
                .collect();
            request = request.query(&pairs);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| (Warnings::new(), ClientError::Transport(e.to_string())))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| (Warnings::new(), ClientError::Transport(e.to_string())))?;
        trace!(%status, body = %text, "Cloud Controller response");

        let value: serde_json::Value = if text.trim().is_empty() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str(&text)
                .map_err(|e| (Warnings::new(), ClientError::Decode(e.to_string())))?
        };

        if status.is_success() {
            return Ok(value);
        }

        let error_body: ErrorBody = serde_json::from_value(value).unwrap_or_default();
        Err((error_body.warnings, map_status(status, error_body.description)))
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        filters: &[Filter],
    ) -> CallOutcome<Vec<T>> {
        match self.dispatch(Method::GET, path, filters, None).await {
            Ok(value) => decode::<ListEnvelope<T>>(value)
                .map_or_else(failed, |e| (e.warnings, Ok(e.resources))),
            Err((warnings, err)) => (warnings, Err(err)),
        }
    }

    async fn get_resource<T: DeserializeOwned>(&self, path: &str) -> CallOutcome<T> {
        match self.dispatch(Method::GET, path, &[], None).await {
            Ok(value) => decode::<ResourceEnvelope<T>>(value)
                .map_or_else(failed, |e| (e.warnings, Ok(e.resource))),
            Err((warnings, err)) => (warnings, Err(err)),
        }
    }

    async fn mutate_resource<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> CallOutcome<T> {
        match self.dispatch(method, path, &[], body).await {
            Ok(value) => decode::<ResourceEnvelope<T>>(value)
                .map_or_else(failed, |e| (e.warnings, Ok(e.resource))),
            Err((warnings, err)) => (warnings, Err(err)),
        }
    }

    async fn mutate(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> CallOutcome<()> {
        match self.dispatch(method, path, &[], body).await {
            Ok(value) => {
                decode::<AckEnvelope>(value).map_or_else(failed, |e| (e.warnings, Ok(())))
            }
            Err((warnings, err)) => (warnings, Err(err)),
        }
    }
}

impl CloudClient for HttpClient {
    async fn get_security_groups(&self, filters: &[Filter]) -> CallOutcome<Vec<SecurityGroup>> {
        self.get_list("/v1/security_groups", filters).await
    }

    async fn get_running_spaces_by_security_group(&self, guid: &str) -> CallOutcome<Vec<Space>> {
        self.get_list(&format!("/v1/security_groups/{guid}/running_spaces"), &[])
            .await
    }

    async fn get_staging_spaces_by_security_group(&self, guid: &str) -> CallOutcome<Vec<Space>> {
        self.get_list(&format!("/v1/security_groups/{guid}/staging_spaces"), &[])
            .await
    }

    async fn get_space_running_security_groups(
        &self,
        space_guid: &str,
        filters: &[Filter],
    ) -> CallOutcome<Vec<SecurityGroup>> {
        self.get_list(
            &format!("/v1/spaces/{space_guid}/running_security_groups"),
            filters,
        )
        .await
    }

    async fn get_space_staging_security_groups(
        &self,
        space_guid: &str,
        filters: &[Filter],
    ) -> CallOutcome<Vec<SecurityGroup>> {
        self.get_list(
            &format!("/v1/spaces/{space_guid}/staging_security_groups"),
            filters,
        )
        .await
    }

    async fn associate_space_with_running_security_group(
        &self,
        security_group_guid: &str,
        space_guid: &str,
    ) -> CallOutcome<()> {
        self.mutate(
            Method::PUT,
            &format!("/v1/security_groups/{security_group_guid}/running_spaces/{space_guid}"),
            None,
        )
        .await
    }

    async fn associate_space_with_staging_security_group(
        &self,
        security_group_guid: &str,
        space_guid: &str,
    ) -> CallOutcome<()> {
        self.mutate(
            Method::PUT,
            &format!("/v1/security_groups/{security_group_guid}/staging_spaces/{space_guid}"),
            None,
        )
        .await
    }

    async fn remove_space_from_running_security_group(
        &self,
        security_group_guid: &str,
        space_guid: &str,
    ) -> CallOutcome<()> {
        self.mutate(
            Method::DELETE,
            &format!("/v1/security_groups/{security_group_guid}/running_spaces/{space_guid}"),
            None,
        )
        .await
    }

    async fn remove_space_from_staging_security_group(
        &self,
        security_group_guid: &str,
        space_guid: &str,
    ) -> CallOutcome<()> {
        self.mutate(
            Method::DELETE,
            &format!("/v1/security_groups/{security_group_guid}/staging_spaces/{space_guid}"),
            None,
        )
        .await
    }

    async fn get_organization(&self, guid: &str) -> CallOutcome<Organization> {
        self.get_resource(&format!("/v1/organizations/{guid}")).await
    }

    async fn get_organizations(&self, filters: &[Filter]) -> CallOutcome<Vec<Organization>> {
        self.get_list("/v1/organizations", filters).await
    }

    async fn get_spaces(&self, filters: &[Filter]) -> CallOutcome<Vec<Space>> {
        self.get_list("/v1/spaces", filters).await
    }

    async fn get_applications(&self, filters: &[Filter]) -> CallOutcome<Vec<Application>> {
        self.get_list("/v1/apps", filters).await
    }

    async fn create_application(&self, name: &str, space_guid: &str) -> CallOutcome<Application> {
        self.mutate_resource(
            Method::POST,
            "/v1/apps",
            Some(serde_json::json!({ "name": name, "space_guid": space_guid })),
        )
        .await
    }

    async fn delete_application(&self, guid: &str) -> CallOutcome<()> {
        self.mutate(Method::DELETE, &format!("/v1/apps/{guid}"), None)
            .await
    }

    async fn start_application(&self, guid: &str) -> CallOutcome<Application> {
        self.mutate_resource(Method::POST, &format!("/v1/apps/{guid}/actions/start"), None)
            .await
    }

    async fn stop_application(&self, guid: &str) -> CallOutcome<Application> {
        self.mutate_resource(Method::POST, &format!("/v1/apps/{guid}/actions/stop"), None)
            .await
    }

    async fn get_application_processes(&self, app_guid: &str) -> CallOutcome<Vec<Process>> {
        self.get_list(&format!("/v1/apps/{app_guid}/processes"), &[])
            .await
    }

    async fn scale_process(&self, app_guid: &str, scale: &ProcessScale) -> CallOutcome<()> {
        let body = match serde_json::to_value(scale) {
            Ok(body) => body,
            Err(e) => return (Warnings::new(), Err(ClientError::Decode(e.to_string()))),
        };
        self.mutate(
            Method::POST,
            &format!("/v1/apps/{app_guid}/processes/actions/scale"),
            Some(body),
        )
        .await
    }

    async fn get_process_instances(
        &self,
        process_guid: &str,
    ) -> CallOutcome<Vec<ProcessInstance>> {
        self.get_list(&format!("/v1/processes/{process_guid}/instances"), &[])
            .await
    }

    async fn delete_process_instance(
        &self,
        app_guid: &str,
        process_type: &str,
        index: u32,
    ) -> CallOutcome<()> {
        self.mutate(
            Method::DELETE,
            &format!("/v1/apps/{app_guid}/processes/{process_type}/instances/{index}"),
            None,
        )
        .await
    }
}

// Response envelopes

#[derive(Debug, Deserialize)]
struct ListEnvelope<T> {
    #[serde(default)]
    warnings: Warnings,
    #[serde(default = "Vec::new")]
    resources: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ResourceEnvelope<T> {
    #[serde(default)]
    warnings: Warnings,
    resource: T,
}

#[derive(Debug, Deserialize)]
struct AckEnvelope {
    #[serde(default)]
    warnings: Warnings,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    warnings: Warnings,
    #[serde(default)]
    description: String,
}

fn decode<E: DeserializeOwned>(value: serde_json::Value) -> Result<E, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

fn failed<T>(err: ClientError) -> CallOutcome<T> {
    (Warnings::new(), Err(err))
}

fn map_status(status: StatusCode, description: String) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized,
        StatusCode::NOT_FOUND => ClientError::ResourceNotFound,
        StatusCode::UNPROCESSABLE_ENTITY => ClientError::ResourceAlreadyExists { description },
        _ => ClientError::Api {
            status: status.as_u16(),
            description,
        },
    }
}
