mod domain;
mod clients;
mod handlers;
mod store;

mod app_system;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;

mod actor_framework;
mod cart_actor;
mod category_actor;
mod coupon_actor;
mod order_actor;

use serde_json::json;
use tracing::{error, info, Instrument};

use crate::app_system::{setup_tracing, CommerceSystem, SystemConfig, SystemError};
use crate::domain::OwnerId;

#[tokio::main]
async fn main() -> Result<(), SystemError> {
    let config = SystemConfig::from_env()?;

    // Setup tracing once for the entire application
    setup_tracing(&config.log_filter);

    info!(
        mailbox_size = config.mailbox_size,
        cart_shards = config.cart_shards,
        "Starting application with commerce system"
    );

    // Create the entire system (starts all services)
    let system = CommerceSystem::in_memory(&config);
    let owner = OwnerId::new("643d1f7e8b6f5a73e47232f1");

    let span = tracing::info_span!("cart_session", owner_id = %owner);
    async {
        let carts = system.cart_handlers();

        let reply = carts
            .add_to_cart(owner.clone(), json!({ "cartItem": "643d1f7e8b6f5a73e47232aa", "quantity": 2 }))
            .await;
        info!(status = reply.status, body = %reply.body, "Add to cart");

        let reply = carts
            .increase_cart_item(owner.clone(), json!({ "cartItem": "643D1F7E8B6F5A73E47232AA" }))
            .await;
        info!(status = reply.status, body = %reply.body, "Increase cart item");

        let reply = carts
            .decrement_cart_item(owner.clone(), json!({ "cartItem": "643d1f7e8b6f5a73e47232aa" }))
            .await;
        info!(status = reply.status, body = %reply.body, "Decrement cart item");

        let reply = carts.get_cart(owner.clone()).await;
        info!(status = reply.status, body = %reply.body, "Current cart");
    }
    .instrument(span)
    .await;

    let span = tracing::info_span!("order_processing");
    async {
        let coupons = system.coupon_handlers();
        let orders = system.order_handlers();

        let coupon = coupons
            .create_coupon(json!({ "name": "WELCOME10", "discount": 10, "expiry": "2099-12-31" }))
            .await;
        let coupon_id = coupon.body["id"].clone();

        let reply = orders
            .create_order(json!({
                "userId": owner.as_str(),
                "amount": 180.0,
                "paymentMethod": "COD",
                "items": [{ "itemRef": "643d1f7e8b6f5a73e47232aa", "quantity": 2 }],
                "shippingAddress": { "city": "Hanoi", "address": "123 Street" },
                "couponId": coupon_id
            }))
            .await;

        if reply.status == 201 {
            info!(order = %reply.body, "Order processed successfully");
        } else {
            error!(status = reply.status, body = %reply.body, "Order processing failed");
        }
    }
    .instrument(span)
    .await;

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
