/// Generates the common `get_`, `list_`, `delete_` and `shutdown` methods of a
/// client wrapping a [`ResourceClient`](crate::actor_framework::ResourceClient).
///
/// `$error` must have a `NotFound(String)` variant and `From<FrameworkError>`.
macro_rules! impl_client_methods {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident, $plural_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](&self, id: String) -> Result<$entity, $error> {
                    tracing::debug!("Sending request");
                    self.inner
                        .get(id.clone())
                        .await
                        .map_err(<$error>::from)?
                        .ok_or_else(|| <$error>::NotFound(id))
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $plural_snake>](&self) -> Result<Vec<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.list(None).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $entity_name_snake>](&self, id: String) -> Result<$entity, $error> {
                    tracing::debug!("Sending request");
                    self.inner.delete(id).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn shutdown(&self) -> Result<(), $error> {
                    tracing::debug!("Sending shutdown request");
                    self.inner.shutdown().await.map_err(<$error>::from)
                }
            }
        }
    };
}

macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}

macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident, $plural_snake:ident) => {
        impl_client_new!($client_name, $entity);
        impl_client_methods!($client_name, $entity, $error, $entity_name_snake, $plural_snake);
    };
}

/// Generates a [`CartClient`](super::CartClient) method: builds the request
/// with a oneshot reply channel, routes it to the owner's shard and waits.
macro_rules! cart_method {
    (fn $method:ident(owner_id: OwnerId $(, $param:ident: $param_type:ty)*) -> $return_type:ty as CartRequest::$variant:ident) => {
        impl CartClient {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, owner_id: OwnerId $(, $param: $param_type)*) -> Result<$return_type, CartError> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.shard_for(&owner_id)?
                    .send(CartRequest::$variant {
                        owner_id,
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| CartError::ActorCommunication("Actor closed".to_string()))?;

                response
                    .await
                    .map_err(|_| CartError::ActorCommunication("Actor dropped".to_string()))?
            }
        }
    };
}
