//! Application lookups and lifecycle operations.

use stratus_api::{Application, ClientError, CloudClient, Filter};
use tracing::debug;

use crate::{absorb, ActionError, ActionResult, Actor};

impl<C: CloudClient> Actor<C> {
    /// Resolves an application by name within a space. When several match
    /// the filters, the first in the response wins.
    pub async fn application_by_name_and_space(
        &self,
        name: &str,
        space_guid: &str,
    ) -> ActionResult<Application> {
        let mut warnings = Vec::new();
        let result = absorb(
            &mut warnings,
            self.client()
                .get_applications(&[Filter::name(name), Filter::space_guid(space_guid)])
                .await,
        );
        let applications = match result {
            Ok(applications) => applications,
            Err(e) => return (warnings, Err(e.into())),
        };

        match applications.into_iter().next() {
            Some(application) => (warnings, Ok(application)),
            None => {
                debug!(name, space_guid, "application not found");
                (
                    warnings,
                    Err(ActionError::ApplicationNotFound {
                        name: name.to_owned(),
                    }),
                )
            }
        }
    }

    /// Creates an application in a space. A name collision surfaces as
    /// [`ActionError::ApplicationAlreadyExists`].
    pub async fn create_application_by_name_and_space(
        &self,
        name: &str,
        space_guid: &str,
    ) -> ActionResult<Application> {
        let mut warnings = Vec::new();
        let result = absorb(
            &mut warnings,
            self.client().create_application(name, space_guid).await,
        );
        match result {
            Ok(application) => (warnings, Ok(application)),
            Err(ClientError::ResourceAlreadyExists { .. }) => (
                warnings,
                Err(ActionError::ApplicationAlreadyExists {
                    name: name.to_owned(),
                }),
            ),
            Err(e) => (warnings, Err(e.into())),
        }
    }

    /// Deletes an application by name within a space.
    pub async fn delete_application_by_name_and_space(
        &self,
        name: &str,
        space_guid: &str,
    ) -> ActionResult<()> {
        let (mut warnings, resolved) = self.application_by_name_and_space(name, space_guid).await;
        let application = match resolved {
            Ok(application) => application,
            Err(e) => return (warnings, Err(e)),
        };

        let result = absorb(
            &mut warnings,
            self.client().delete_application(&application.guid).await,
        );
        match result {
            Ok(()) => (warnings, Ok(())),
            Err(e) => (warnings, Err(e.into())),
        }
    }

    /// Requests that an application start.
    pub async fn start_application(&self, guid: &str) -> ActionResult<Application> {
        let mut warnings = Vec::new();
        let result = absorb(&mut warnings, self.client().start_application(guid).await);
        (warnings, result.map_err(Into::into))
    }

    /// Requests that an application stop.
    pub async fn stop_application(&self, guid: &str) -> ActionResult<Application> {
        let mut warnings = Vec::new();
        let result = absorb(&mut warnings, self.client().stop_application(guid).await);
        (warnings, result.map_err(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use stratus_api::mock::{Call, MockClient};

    use super::*;

    #[tokio::test]
    async fn resolves_with_name_and_space_filters() {
        let mock = MockClient::new();
        mock.queue_applications(
            &["get-app-warning"],
            Ok(vec![Application {
                guid: "some-app-guid".into(),
                name: "some-app".into(),
            }]),
        );
        let actor = Actor::new(mock);

        let (warnings, result) = actor
            .application_by_name_and_space("some-app", "some-space-guid")
            .await;
        assert_eq!(warnings, vec!["get-app-warning"]);
        assert_eq!(result.map(|a| a.guid), Ok("some-app-guid".to_owned()));
        assert_eq!(
            actor.client().calls(),
            vec![Call::GetApplications {
                filters: vec![
                    Filter::name("some-app"),
                    Filter::space_guid("some-space-guid"),
                ],
            }]
        );
    }

    #[tokio::test]
    async fn missing_application_is_not_found() {
        let mock = MockClient::new();
        mock.queue_applications(&[], Ok(vec![]));
        let actor = Actor::new(mock);

        let (_, result) = actor
            .application_by_name_and_space("missing-app", "some-space-guid")
            .await;
        assert_eq!(
            result,
            Err(ActionError::ApplicationNotFound {
                name: "missing-app".into(),
            })
        );
    }

    #[tokio::test]
    async fn create_maps_name_collision() {
        let mock = MockClient::new();
        mock.queue_create_application(
            &["create-warning"],
            Err(ClientError::ResourceAlreadyExists {
                description: "name must be unique in space".into(),
            }),
        );
        let actor = Actor::new(mock);

        let (warnings, result) = actor
            .create_application_by_name_and_space("some-app", "some-space-guid")
            .await;
        assert_eq!(warnings, vec!["create-warning"]);
        assert_eq!(
            result,
            Err(ActionError::ApplicationAlreadyExists {
                name: "some-app".into(),
            })
        );
    }

    #[tokio::test]
    async fn create_passes_arguments_through() {
        let mock = MockClient::new();
        mock.queue_create_application(
            &[],
            Ok(Application {
                guid: "some-app-guid".into(),
                name: "some-app".into(),
            }),
        );
        let actor = Actor::new(mock);

        let (_, result) = actor
            .create_application_by_name_and_space("some-app", "some-space-guid")
            .await;
        assert!(result.is_ok());
        assert_eq!(
            actor.client().calls(),
            vec![Call::CreateApplication {
                name: "some-app".into(),
                space_guid: "some-space-guid".into(),
            }]
        );
    }

    #[tokio::test]
    async fn delete_resolves_then_deletes_and_concatenates_warnings() {
        let mock = MockClient::new();
        mock.queue_applications(
            &["get-app-warning"],
            Ok(vec![Application {
                guid: "some-app-guid".into(),
                name: "some-app".into(),
            }]),
        );
        mock.queue_delete_application(&["delete-warning"], Ok(()));
        let actor = Actor::new(mock);

        let (warnings, result) = actor
            .delete_application_by_name_and_space("some-app", "some-space-guid")
            .await;
        assert_eq!(warnings, vec!["get-app-warning", "delete-warning"]);
        assert_eq!(result, Ok(()));
        assert_eq!(
            actor.client().calls().last(),
            Some(&Call::DeleteApplication {
                guid: "some-app-guid".into(),
            })
        );
    }

    #[tokio::test]
    async fn delete_of_missing_application_makes_no_delete_call() {
        let mock = MockClient::new();
        mock.queue_applications(&[], Ok(vec![]));
        let actor = Actor::new(mock);

        let (_, result) = actor
            .delete_application_by_name_and_space("missing-app", "some-space-guid")
            .await;
        assert!(matches!(
            result,
            Err(ActionError::ApplicationNotFound { .. })
        ));
        assert_eq!(
            actor
                .client()
                .count_calls(|c| matches!(c, Call::DeleteApplication { .. })),
            0
        );
    }
}
