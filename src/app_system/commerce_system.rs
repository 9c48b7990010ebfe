use std::sync::Arc;

use tracing::{error, info, instrument};

use super::{SystemConfig, SystemError};
use crate::actor_framework::ResourceActor;
use crate::cart_actor::CartService;
use crate::clients::{CartClient, CategoryClient, CouponClient, OrderClient};
use crate::domain::{next_resource_id, Category, Coupon, Order};
use crate::handlers::{CartHandlers, CategoryHandlers, CouponHandlers, OrderHandlers};
use crate::store::{CartStore, InMemoryCartStore};

/// The main application system that orchestrates all actors.
///
/// Starts the cart shards and resource actors, wires clients together and
/// handles shutdown.
pub struct CommerceSystem {
    pub cart_client: CartClient,
    pub category_client: CategoryClient,
    pub coupon_client: CouponClient,
    pub order_client: OrderClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CommerceSystem {
    /// Create and start every service.
    ///
    /// **Startup Order:**
    /// 1. Cart shards, each sharing `store`
    /// 2. Category and coupon services
    /// 3. Order service, which receives the coupon client
    #[instrument(name = "commerce_system", skip(store))]
    pub fn new(config: &SystemConfig, store: Arc<dyn CartStore>) -> Self {
        let mailbox_size = config.mailbox_size.max(1);
        let mut handles = Vec::new();

        info!("Starting commerce system");

        let shards = (0..config.cart_shards.max(1))
            .map(|shard| {
                let (service, sender) = CartService::new(mailbox_size, shard, store.clone());
                handles.push(tokio::spawn(service.run()));
                sender
            })
            .collect();
        let cart_client = CartClient::new(shards);

        let (category_actor, category_inner) = ResourceActor::<Category>::new(mailbox_size, next_resource_id);
        handles.push(tokio::spawn(category_actor.run()));
        let category_client = CategoryClient::new(category_inner);

        let (coupon_actor, coupon_inner) = ResourceActor::<Coupon>::new(mailbox_size, next_resource_id);
        handles.push(tokio::spawn(coupon_actor.run()));
        let coupon_client = CouponClient::new(coupon_inner);

        let (order_actor, order_inner) = ResourceActor::<Order>::new(mailbox_size, next_resource_id);
        handles.push(tokio::spawn(order_actor.run()));
        let order_client = OrderClient::new(order_inner, coupon_client.clone());

        info!(cart_shards = cart_client.shard_count(), "Commerce system started successfully");

        Self {
            cart_client,
            category_client,
            coupon_client,
            order_client,
            handles,
        }
    }

    /// Convenience constructor backed by a fresh [`InMemoryCartStore`].
    pub fn in_memory(config: &SystemConfig) -> Self {
        Self::new(config, Arc::new(InMemoryCartStore::new()))
    }

    pub fn cart_handlers(&self) -> CartHandlers {
        CartHandlers::new(self.cart_client.clone())
    }

    pub fn category_handlers(&self) -> CategoryHandlers {
        CategoryHandlers::new(self.category_client.clone())
    }

    pub fn coupon_handlers(&self) -> CouponHandlers {
        CouponHandlers::new(self.coupon_client.clone())
    }

    pub fn order_handlers(&self) -> OrderHandlers {
        OrderHandlers::new(self.order_client.clone())
    }

    /// Gracefully shutdown the entire system.
    ///
    /// Orders go first since they depend on coupons. Shutdown send errors are
    /// logged and skipped so one dead service cannot hang the rest.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down commerce system");

        if let Err(e) = self.order_client.shutdown().await {
            error!(error = %e, "Order service shutdown failed");
        }
        if let Err(e) = self.cart_client.shutdown().await {
            error!(error = %e, "Cart service shutdown failed");
        }
        if let Err(e) = self.category_client.shutdown().await {
            error!(error = %e, "Category service shutdown failed");
        }
        if let Err(e) = self.coupon_client.shutdown().await {
            error!(error = %e, "Coupon service shutdown failed");
        }

        let mut failure = None;
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service task failed");
                failure.get_or_insert_with(|| e.to_string());
            }
        }

        match failure {
            Some(reason) => Err(SystemError::TaskFailed(reason)),
            None => {
                info!("Commerce system shutdown complete");
                Ok(())
            }
        }
    }
}
