#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use serde_json::json;

    use crate::actor_framework::Entity;
    use crate::app_system::{CommerceSystem, SystemConfig};
    use crate::cart_actor::{CartError, CartRequest, Decrement};
    use crate::clients::{CouponClient, OrderClient};
    use crate::domain::{
        Cart, Coupon, ItemRef, LineItemId, Order, OrderCreate, OrderItem, OwnerId, PaymentMethod,
        ShippingAddress,
    };
    use crate::coupon_actor::{CouponAction, CouponActionResult};
    use crate::handlers::{CartHandlers, Reply};
    use crate::mock_framework::{
        create_mock_cart_client, create_mock_client, expect_action, expect_cart_request,
        expect_create,
    };
    use crate::order_actor::OrderError;
    use crate::store::{CartStore, InMemoryCartStore, PullAck, StoreError};

    const OBJECT_ID: &str = "643d1f7e8b6f5a73e47232f1";

    fn system() -> CommerceSystem {
        CommerceSystem::in_memory(&SystemConfig::default())
    }

    fn owner() -> OwnerId {
        OwnerId::new("1234567")
    }

    /// Wraps the in-memory store and counts writes.
    #[derive(Default)]
    struct CountingStore {
        inner: InMemoryCartStore,
        writes: AtomicUsize,
    }

    #[async_trait]
    impl CartStore for CountingStore {
        async fn find_by_owner(&self, owner_id: &OwnerId) -> Result<Option<Cart>, StoreError> {
            self.inner.find_by_owner(owner_id).await
        }
        async fn create(&self, cart: Cart) -> Result<Cart, StoreError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.create(cart).await
        }
        async fn save(&self, cart: Cart) -> Result<Cart, StoreError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.save(cart).await
        }
        async fn pull_line_item(&self, owner_id: &OwnerId, line_item_id: &LineItemId) -> Result<PullAck, StoreError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.pull_line_item(owner_id, line_item_id).await
        }
    }

    /// Suspends after every load, so an unserialized load-modify-save of one
    /// owner would interleave with another and drop an update.
    #[derive(Default)]
    struct SlowReadStore {
        inner: InMemoryCartStore,
    }

    #[async_trait]
    impl CartStore for SlowReadStore {
        async fn find_by_owner(&self, owner_id: &OwnerId) -> Result<Option<Cart>, StoreError> {
            let cart = self.inner.find_by_owner(owner_id).await;
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
            cart
        }
        async fn create(&self, cart: Cart) -> Result<Cart, StoreError> {
            self.inner.create(cart).await
        }
        async fn save(&self, cart: Cart) -> Result<Cart, StoreError> {
            self.inner.save(cart).await
        }
        async fn pull_line_item(&self, owner_id: &OwnerId, line_item_id: &LineItemId) -> Result<PullAck, StoreError> {
            self.inner.pull_line_item(owner_id, line_item_id).await
        }
    }

    // -------------------------------------------------------------------------
    // Cart mutation engine through the client
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_add_merges_into_existing_line_item() {
        let system = system();
        let cart = &system.cart_client;

        cart.add_item(owner(), ItemRef::new("x"), 2).await.unwrap();
        let merged = cart.add_item(owner(), ItemRef::new("x"), 3).await.unwrap();
        assert_eq!(merged.quantity, 5);

        let stored = cart.get_cart(owner()).await.unwrap().unwrap();
        assert_eq!(stored.line_items.len(), 1);
        assert_eq!(stored.line_items[0].quantity, 5);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_first_add_creates_cart_with_one_line_item() {
        let system = system();
        let cart = &system.cart_client;

        assert_eq!(cart.get_cart(owner()).await.unwrap(), None);
        cart.add_item(owner(), ItemRef::new(OBJECT_ID), 2).await.unwrap();

        let stored = cart.get_cart(owner()).await.unwrap().unwrap();
        assert_eq!(stored.owner_id, owner());
        assert_eq!(stored.line_items.len(), 1);
        assert_eq!(stored.line_items[0].item_ref, ItemRef::new(OBJECT_ID));
        assert_eq!(stored.line_items[0].quantity, 2);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_add_twice_is_not_idempotent() {
        let system = system();
        let cart = &system.cart_client;

        cart.add_item(owner(), ItemRef::new("x"), 4).await.unwrap();
        cart.add_item(owner(), ItemRef::new("x"), 4).await.unwrap();

        let stored = cart.get_cart(owner()).await.unwrap().unwrap();
        assert_eq!(stored.line_items[0].quantity, 8);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_each_add_writes_exactly_once() {
        let store = Arc::new(CountingStore::default());
        let system = CommerceSystem::new(&SystemConfig::default(), store.clone());

        system.cart_client.add_item(owner(), ItemRef::new("x"), 1).await.unwrap();
        assert_eq!(store.writes.load(Ordering::SeqCst), 1);
        system.cart_client.add_item(owner(), ItemRef::new("y"), 1).await.unwrap();
        assert_eq!(store.writes.load(Ordering::SeqCst), 2);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_decrement_to_zero_removes_line_item() {
        let store = Arc::new(CountingStore::default());
        let system = CommerceSystem::new(&SystemConfig::default(), store.clone());
        let cart = &system.cart_client;

        cart.add_item(owner(), ItemRef::new("x"), 1).await.unwrap();
        cart.add_item(owner(), ItemRef::new("y"), 3).await.unwrap();
        let writes_before = store.writes.load(Ordering::SeqCst);

        let outcome = cart.decrement_item(owner(), ItemRef::new("x")).await.unwrap();
        assert!(matches!(outcome, Decrement::Removed(_)));
        // One save, no follow-up pull.
        assert_eq!(store.writes.load(Ordering::SeqCst), writes_before + 1);

        let stored = cart.get_cart(owner()).await.unwrap().unwrap();
        assert!(stored.find_item(&ItemRef::new("x")).is_none());
        assert!(stored.line_items.iter().all(|item| item.quantity > 0));

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_decrement_above_one_keeps_line_item() {
        let system = system();
        let cart = &system.cart_client;

        cart.add_item(owner(), ItemRef::new("x"), 3).await.unwrap();
        let outcome = cart.decrement_item(owner(), ItemRef::new("x")).await.unwrap();
        assert!(matches!(outcome, Decrement::Reduced(ref item) if item.quantity == 2));

        let stored = cart.get_cart(owner()).await.unwrap().unwrap();
        assert_eq!(stored.find_item(&ItemRef::new("x")).map(|item| item.quantity), Some(2));

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_increment_and_decrement_without_cart() {
        let system = system();
        let cart = &system.cart_client;

        assert_eq!(cart.increment_item(owner(), ItemRef::new("x")).await, Err(CartError::CartNotFound));
        assert_eq!(cart.decrement_item(owner(), ItemRef::new("x")).await, Err(CartError::CartNotFound));

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_increment_and_decrement_unknown_item() {
        let system = system();
        let cart = &system.cart_client;
        cart.add_item(owner(), ItemRef::new("x"), 1).await.unwrap();

        let missing = ItemRef::new("y");
        assert_eq!(
            cart.increment_item(owner(), missing.clone()).await,
            Err(CartError::ItemNotFound(missing.clone()))
        );
        assert_eq!(
            cart.decrement_item(owner(), missing.clone()).await,
            Err(CartError::ItemNotFound(missing))
        );

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_increment_matches_string_form_of_stored_id() {
        let system = system();
        let handlers = system.cart_handlers();

        // Stored from an upper-case spelling, incremented with the canonical string.
        handlers
            .add_to_cart(owner(), json!({ "cartItem": OBJECT_ID.to_uppercase(), "quantity": 1 }))
            .await;
        let reply = handlers
            .increase_cart_item(owner(), json!({ "cartItem": OBJECT_ID }))
            .await;
        assert_eq!(reply, Reply::message(200, "Cart item updated"));

        let stored = system.cart_client.get_cart(owner()).await.unwrap().unwrap();
        assert_eq!(stored.line_items.len(), 1);
        assert_eq!(stored.line_items[0].quantity, 2);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_numeric_and_string_item_refs_are_one_line_item() {
        let system = system();
        let handlers = system.cart_handlers();

        handlers.add_to_cart(owner(), json!({ "cartItem": 42, "quantity": "2" })).await;
        handlers.add_to_cart(owner(), json!({ "cartItem": "42", "quantity": 1 })).await;

        let stored = system.cart_client.get_cart(owner()).await.unwrap().unwrap();
        assert_eq!(stored.line_items.len(), 1);
        assert_eq!(stored.line_items[0].quantity, 3);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_item_returns_acknowledgment() {
        let system = system();
        let cart = &system.cart_client;
        cart.add_item(owner(), ItemRef::new("x"), 1).await.unwrap();
        cart.add_item(owner(), ItemRef::new("y"), 1).await.unwrap();
        let target = cart.get_cart(owner()).await.unwrap().unwrap().line_items[0].id.clone();

        let ack = cart.remove_item(owner(), target.clone()).await.unwrap();
        assert_eq!(
            ack,
            PullAck {
                acknowledged: true,
                matched_count: 1,
                modified_count: 1
            }
        );

        let reply = system.cart_handlers().delete_cart_item(owner(), target).await;
        assert_eq!(reply, Reply::message(404, "Cart item not found"));

        system.shutdown().await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_for_one_owner_are_serialized() {
        let system = CommerceSystem::new(&SystemConfig::default(), Arc::new(SlowReadStore::default()));

        let tasks: Vec<_> = (0..50)
            .map(|_| {
                let cart = system.cart_client.clone();
                tokio::spawn(async move { cart.add_item(owner(), ItemRef::new("x"), 1).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let stored = system.cart_client.get_cart(owner()).await.unwrap().unwrap();
        assert_eq!(stored.line_items.len(), 1);
        assert_eq!(stored.line_items[0].quantity, 50);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_owners_are_isolated_across_shards() {
        let system = system();
        for n in 0..16 {
            let owner = OwnerId::new(format!("user_{n}"));
            system.cart_client.add_item(owner, ItemRef::new("x"), n + 1).await.unwrap();
        }
        for n in 0..16 {
            let owner = OwnerId::new(format!("user_{n}"));
            let cart = system.cart_client.get_cart(owner).await.unwrap().unwrap();
            assert_eq!(cart.line_items[0].quantity, n + 1);
        }
        system.shutdown().await.unwrap();
    }

    // -------------------------------------------------------------------------
    // Cart reply contract
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_cart_handler_replies() {
        let system = system();
        let handlers = system.cart_handlers();

        let reply = handlers.get_cart(owner()).await;
        assert_eq!(reply, Reply::ok(json!(null)));

        let reply = handlers.add_to_cart(owner(), json!({ "cartItem": "x", "quantity": 3 })).await;
        assert_eq!(reply, Reply::message(200, "Added to cart"));

        let reply = handlers.get_cart(owner()).await;
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body["ownerId"], json!("1234567"));
        assert_eq!(reply.body["lineItems"][0]["itemRef"], json!("x"));
        assert_eq!(reply.body["lineItems"][0]["quantity"], json!(3));

        let reply = handlers.decrement_cart_item(owner(), json!({ "cartItem": "nope" })).await;
        assert_eq!(reply, Reply::message(404, "Product not found"));

        let reply = handlers
            .decrement_cart_item(OwnerId::new("stranger"), json!({ "cartItem": "x" }))
            .await;
        assert_eq!(reply, Reply::message(404, "Cart not found"));

        let reply = handlers.add_to_cart(owner(), json!({ "cartItem": "x", "quantity": 0 })).await;
        assert_eq!(reply.status, 400);

        let reply = handlers.add_to_cart(owner(), json!({ "quantity": 1 })).await;
        assert_eq!(reply.status, 400);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_dropped_reply_maps_to_internal_error() {
        let (client, mut receiver) = create_mock_cart_client(4);
        let handlers = CartHandlers::new(client);

        let task = tokio::spawn(async move {
            handlers
                .add_to_cart(owner(), json!({ "cartItem": "x", "quantity": 1 }))
                .await
        });

        match expect_cart_request(&mut receiver).await {
            Some(CartRequest::AddItem { quantity, respond_to, .. }) => {
                assert_eq!(quantity, 1);
                drop(respond_to);
            }
            other => panic!("Unexpected request: {:?}", other),
        }

        assert_eq!(task.await.unwrap(), Reply::internal_error());
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_internal_error() {
        let (client, mut receiver) = create_mock_cart_client(4);
        let handlers = CartHandlers::new(client);

        let task = tokio::spawn(async move { handlers.get_cart(owner()).await });

        if let Some(CartRequest::GetCart { respond_to, .. }) = expect_cart_request(&mut receiver).await {
            let _ = respond_to.send(Err(CartError::Store(StoreError::Unavailable("timeout".into()))));
        }

        let reply = task.await.unwrap();
        assert_eq!(reply.status, 500);
        assert_eq!(reply.body, json!("Internal server error"));
    }

    // -------------------------------------------------------------------------
    // Catalog resources
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_category_crud_replies() {
        let system = system();
        let handlers = system.category_handlers();

        let reply = handlers.create_category(json!({})).await;
        assert_eq!(reply, Reply::message(400, "Title is required"));

        let created = handlers.create_category(json!({ "title": "Electronics" })).await;
        assert_eq!(created.status, 201);
        assert_eq!(created.body["title"], json!("Electronics"));
        let id = created.body["id"].as_str().unwrap().to_string();

        handlers.create_category(json!({ "title": "Books" })).await;
        let listed = handlers.get_categories().await;
        assert_eq!(listed.status, 200);
        assert_eq!(listed.body.as_array().map(Vec::len), Some(2));

        let updated = handlers
            .update_category(id.clone(), json!({ "title": "Updated Electronics" }))
            .await;
        assert_eq!(updated.body["title"], json!("Updated Electronics"));

        let removed = handlers.delete_category(id.clone()).await;
        assert_eq!(removed, Reply::notice(200, "Category removed"));

        assert_eq!(handlers.get_category(id.clone()).await, Reply::message(404, "Category not found"));
        assert_eq!(
            handlers.update_category(id.clone(), json!({ "title": "x" })).await.status,
            404
        );
        assert_eq!(handlers.delete_category(id).await.status, 404);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_coupon_crud_replies() {
        let system = system();
        let handlers = system.coupon_handlers();

        let created = handlers
            .create_coupon(json!({ "name": "Ma giam gia 1", "discount": 15, "expiry": "2024-01-01" }))
            .await;
        assert_eq!(created.status, 201);
        assert_eq!(created.body["discount"], json!(15));
        assert_eq!(created.body["expiry"], json!("2024-01-01"));
        let id = created.body["id"].as_str().unwrap().to_string();

        let rejected = handlers.update_coupon(id.clone(), json!({ "discount": 150 })).await;
        assert_eq!(rejected.status, 400);

        let fetched = handlers.get_coupon(id.clone()).await;
        assert_eq!(fetched.body["discount"], json!(15));

        assert_eq!(handlers.get_coupons().await.body.as_array().map(Vec::len), Some(1));
        assert_eq!(handlers.delete_coupon(id.clone()).await, Reply::notice(200, "Coupon removed"));
        assert_eq!(handlers.get_coupon(id).await, Reply::message(404, "Coupon not found"));

        system.shutdown().await.unwrap();
    }

    // -------------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------------

    fn order_params(coupon_id: Option<String>) -> OrderCreate {
        OrderCreate {
            user_id: OBJECT_ID.to_string(),
            amount: 100.0,
            payment_method: PaymentMethod::CashOnDelivery,
            items: vec![OrderItem {
                item_ref: ItemRef::new("123"),
                quantity: 2,
            }],
            shipping_address: ShippingAddress {
                city: "Hanoi".into(),
                address: "123 Street".into(),
            },
            coupon_id,
        }
    }

    #[tokio::test]
    async fn test_order_creation_with_coupon_flow() {
        let (coupon_inner, mut coupon_rx) = create_mock_client::<Coupon>(10);
        let (order_inner, mut order_rx) = create_mock_client::<Order>(10);
        let order_client = OrderClient::new(order_inner, CouponClient::new(coupon_inner));

        let order_task = tokio::spawn(async move {
            order_client.create_order(order_params(Some("coupon_1".into()))).await
        });

        let (coupon_id, action, responder) = expect_action(&mut coupon_rx).await.expect("Expected Coupon Action");
        assert_eq!(coupon_id, "coupon_1");
        assert!(matches!(action, CouponAction::CheckValid { .. }));
        responder.send(Ok(CouponActionResult::CheckValid(true))).unwrap();

        let (params, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        assert_eq!(params.user_id, OBJECT_ID);
        assert_eq!(params.coupon_id.as_deref(), Some("coupon_1"));
        let order = <Order as Entity>::from_create_params("order_1".to_string(), params).unwrap();
        responder.send(Ok(order)).unwrap();

        let created: Order = order_task.await.unwrap().unwrap();
        assert_eq!(created.id, "order_1");
    }

    #[tokio::test]
    async fn test_order_rejects_expired_and_unknown_coupons() {
        let system = system();
        let expired = system
            .coupon_client
            .create_coupon(crate::domain::CouponCreate {
                name: "old".into(),
                discount: 10,
                expiry: (Utc::now() - Duration::days(2)).date_naive(),
            })
            .await
            .unwrap();

        let err = system
            .order_client
            .create_order(order_params(Some(expired.id.clone())))
            .await
            .unwrap_err();
        assert_eq!(err, OrderError::CouponExpired(expired.id));

        let err = system
            .order_client
            .create_order(order_params(Some("missing".into())))
            .await
            .unwrap_err();
        assert_eq!(err, OrderError::InvalidCoupon("missing".into()));
        assert_eq!(err.status_code(), 404);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_order_handlers_lifecycle() {
        let system = system();
        let handlers = system.order_handlers();

        let created = handlers
            .create_order(json!({
                "userId": OBJECT_ID,
                "amount": 100.0,
                "paymentMethod": "COD",
                "items": [{ "itemRef": "123", "quantity": 2 }],
                "shippingAddress": { "city": "Hanoi", "address": "123 Street" }
            }))
            .await;
        assert_eq!(created.status, 201);
        assert_eq!(created.body["status"], json!("Pending"));
        let id = created.body["id"].as_str().unwrap().to_string();

        let empty = handlers
            .create_order(json!({
                "userId": OBJECT_ID,
                "amount": 0.0,
                "paymentMethod": "Online",
                "items": [],
                "shippingAddress": { "city": "Hanoi", "address": "123 Street" }
            }))
            .await;
        assert_eq!(empty, Reply::message(400, "Order has no items"));

        let listed = handlers.get_orders(OBJECT_ID.to_string()).await;
        assert_eq!(listed.body.as_array().map(Vec::len), Some(1));
        assert_eq!(
            handlers.get_orders("someone_else".into()).await.body,
            json!([])
        );

        let moved = handlers
            .update_order_status(id.clone(), json!({ "orderStatus": "Processing" }))
            .await;
        assert_eq!(moved.body["status"], json!("Processing"));

        let backwards = handlers
            .update_order_status(id.clone(), json!({ "orderStatus": "Pending" }))
            .await;
        assert_eq!(backwards.status, 400);

        assert_eq!(handlers.get_order(id).await.body["status"], json!("Processing"));
        assert_eq!(handlers.get_order("missing".into()).await, Reply::message(404, "Order not found"));

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_line_item_ids_are_unique() {
        let system = system();
        system.cart_client.add_item(owner(), ItemRef::new("a"), 1).await.unwrap();
        system.cart_client.add_item(owner(), ItemRef::new("b"), 1).await.unwrap();
        let cart = system.cart_client.get_cart(owner()).await.unwrap().unwrap();
        let ids: Vec<&LineItemId> = cart.line_items.iter().map(|item| &item.id).collect();
        assert_ne!(ids[0], ids[1]);
        system.shutdown().await.unwrap();
    }
}
