//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_get`] or [`expect_action`] to assert behavior.

use crate::actor_framework::{
    Created, Entity, FrameworkError, RequestError, ResourceClient, ResourceRequest,
};
use tokio::sync::{mpsc, oneshot};

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// Instead of spinning up a `ResourceActor`, the returned client sends its
/// requests to a channel the test controls. The test inspects each request
/// and answers it (or drops the responder to simulate a storage fault).
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, oneshot::Sender<Result<Created<T>, RequestError<T::Rejection>>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Key, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { key, respond_to }) => Some((key, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<oneshot::Sender<Result<Vec<T>, FrameworkError>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Key,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, RequestError<T::Rejection>>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { key, action, respond_to }) => Some((key, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{User, UserCreate};
    use crate::geo::Coordinates;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<User>(10);

        let create_task = tokio::spawn(async move {
            let params = UserCreate {
                name: "Test".to_string(),
                location: "Meerut".to_string(),
                coordinates: Coordinates::new(28.98, 77.70),
            };
            client.create(params).await
        });

        let (params, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(params.name, "Test");
        let user = User {
            id: "user_1".to_string(),
            name: params.name,
            location: params.location,
            coordinates: params.coordinates,
        };
        responder.send(Ok(Created::Inserted(user))).unwrap();

        let created = create_task.await.unwrap().unwrap();
        assert_eq!(created.into_inner().id, "user_1");
    }

    #[tokio::test]
    async fn test_dropped_responder_surfaces_as_framework_error() {
        let (client, mut receiver) = create_mock_client::<User>(10);
        let task = tokio::spawn(async move { client.get("user_1".to_string()).await });

        let (key, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(key, "user_1");
        drop(responder);

        assert_eq!(task.await.unwrap(), Err(FrameworkError::ActorDropped));
    }
}
