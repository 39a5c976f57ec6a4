//! # Boutique Demo
//!
//! Walks one order through the shop:
//! 1. The admin signs up and adds a product.
//! 2. A customer signs up, saves the product and orders two with a note.
//! 3. The admin moves the order forward while the customer's tracker follows it.

use boutique::auth::SignUp;
use boutique::model::{ImageUpload, OrderStatus, ProductForm};
use boutique::view::{Progress, WishlistView};
use boutique::{Storefront, StorefrontConfig};
use document_actor::tracing::setup_tracing;
use std::error::Error;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = StorefrontConfig::from_env()?;
    setup_tracing(&config.log_filter);

    info!("Starting boutique storefront");
    let shop = Storefront::new(config);

    // Admin console
    let admin_device = shop.auth_client();
    let admin = admin_device
        .sign_up(SignUp {
            name: "Favored".to_string(),
            email: "admin@favored.com".to_string(),
            password: "letmein1".to_string(),
            confirm_password: "letmein1".to_string(),
            ..Default::default()
        })
        .await?;

    let span = tracing::info_span!("inventory");
    let product_id = async {
        info!("Adding product");
        shop.add_product(
            &admin,
            ProductForm {
                name: "Engraved Tumbler".to_string(),
                price: "500".to_string(),
                category: Some("Drinkware".to_string()),
                image: Some(ImageUpload {
                    file_name: "tumbler.png".to_string(),
                    content_type: "image/png".to_string(),
                    bytes: vec![0x89, b'P', b'N', b'G'],
                }),
                ..Default::default()
            },
        )
        .await
    }
    .instrument(span)
    .await?;
    info!(product_id = %product_id, "Product listed");

    // Customer
    let customer_device = shop.auth_client();
    let customer = customer_device
        .sign_up(SignUp {
            name: "Ana Cruz".to_string(),
            email: "ana@example.com".to_string(),
            phone: Some("0917 555 0101".to_string()),
            password: "sunflower".to_string(),
            confirm_password: "sunflower".to_string(),
        })
        .await?;

    let mut hearts = WishlistView::new();
    hearts.toggle(&shop, &customer, product_id).await?;
    info!(saved = hearts.is_saved(product_id), "Wishlist updated");

    let span = tracing::info_span!("checkout");
    let order_id = async {
        info!("Placing order");
        shop.place_order_form(&customer, product_id, "2", "Happy Birthday")
            .await
    }
    .instrument(span)
    .await?;

    let order = shop.my_orders(&customer).await?;
    if let Some(order) = order.first() {
        info!(
            order_id = %order.id,
            total = %shop.config().format_price(order.total_price),
            note = %order.personalization,
            "Order placed"
        );
    }

    let mut tracker = shop.track_order(&customer, order_id).await?;
    if let Some(view) = tracker.next().await {
        info!(status = %view.status(), "Tracking order");
    }

    // Admin works the queue
    let span = tracing::info_span!("fulfilment");
    async {
        for status in [OrderStatus::Preparing, OrderStatus::Ready, OrderStatus::Completed] {
            if let Err(e) = shop.transition_order(&admin, order_id, status).await {
                error!(error = %e, "Transition failed");
                return;
            }
            if let Some(view) = tracker.next().await {
                match view.progress {
                    Progress::Step { index, fill_ratio } => {
                        info!(status = %view.status(), step = index, fill_ratio, "Tracker moved")
                    }
                    Progress::Rejected => info!("Order rejected"),
                }
            }
        }
    }
    .instrument(span)
    .await;

    // Completed orders stay completed
    if let Err(e) = shop
        .transition_order(&admin, order_id, OrderStatus::Rejected)
        .await
    {
        info!(error = %e, "Late rejection refused");
    }

    shop.send_message(&customer, "Thank you, it arrived!").await?;
    for conversation in shop.conversations(&admin).await? {
        info!(customer = %conversation.label, last = %conversation.last_message, "Inbox");
    }

    tracker.close();
    drop(admin_device);
    drop(customer_device);
    shop.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
