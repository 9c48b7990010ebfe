//! # Mock Framework
//!
//! Utilities for testing clients and handlers in isolation.
//!
//! Use [`create_mock_client`] or [`create_mock_cart_client`] to get a client
//! and the receiver its requests arrive on, then answer them with the
//! `expect_*` helpers.

use tokio::sync::{mpsc, oneshot};

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use crate::cart_actor::CartRequest;
use crate::clients::CartClient;

type Reply<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Creates a resource client whose requests land on the returned receiver.
///
/// No `ResourceActor` runs; the test plays the actor, which makes failures
/// and odd replies easy to simulate.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Single-shard cart client whose requests land on the returned receiver.
pub fn create_mock_cart_client(buffer_size: usize) -> (CartClient, mpsc::Receiver<CartRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CartClient::new(vec![sender]), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, Reply<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Reply<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Next cart request, whatever its kind.
pub async fn expect_cart_request(receiver: &mut mpsc::Receiver<CartRequest>) -> Option<CartRequest> {
    receiver.recv().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::CategoryClient;
    use crate::domain::{Category, CategoryCreate, OwnerId};

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver) = create_mock_client::<Category>(10);
        let client = CategoryClient::new(inner);

        let create_task = tokio::spawn(async move {
            client
                .create_category(CategoryCreate { title: "Electronics".into() })
                .await
        });

        let (params, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(params.title, "Electronics");
        let category = Category {
            id: "category_1".into(),
            title: params.title,
            created_at: chrono::Utc::now(),
        };
        responder.send(Ok(category.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(category));
    }

    #[tokio::test]
    async fn test_mock_cart_client_routes_to_single_shard() {
        let (client, mut receiver) = create_mock_cart_client(4);

        let task = tokio::spawn(async move { client.get_cart(OwnerId::new("u1")).await });

        match expect_cart_request(&mut receiver).await {
            Some(CartRequest::GetCart { owner_id, respond_to }) => {
                assert_eq!(owner_id, OwnerId::new("u1"));
                respond_to.send(Ok(None)).unwrap();
            }
            other => panic!("Unexpected request: {:?}", other),
        }
        assert_eq!(task.await.unwrap(), Ok(None));
    }
}
