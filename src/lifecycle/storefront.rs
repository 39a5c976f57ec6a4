use crate::auth::{AuthClient, Credential, CredentialClient, LocalAuth, Session};
use crate::blob::{product_image_path, BlobStore, MemoryBlobStore};
use crate::clients::{ChatClient, OrderClient, ProductClient, UserClient, WishlistClient};
use crate::config::StorefrontConfig;
use crate::error::StorefrontError;
use crate::model::{
    parse_quantity, ChatMessage, ChatMessageCreate, Conversation, MessageId, Order, OrderCreate,
    OrderId, OrderStatus, Product, ProductCreate, ProductForm, ProductId, ProductUpdate, Sender,
    UserId, UserProfile, UserUpdate, WishlistEntry, WishlistToggle,
};
use crate::view::OrderTracker;
use chrono::Utc;
use document_actor::{ActorClient, ResourceActor, Subscription};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

type Result<T> = std::result::Result<T, StorefrontError>;

/// Starts every collection, wires them together, and exposes the shop's operations.
///
/// Operations take the caller's [`Session`]. Admin operations check the session's role claim
/// before touching any collection; customer operations check that someone is signed in and,
/// where a document has an owner, that it is theirs.
///
/// ```ignore
/// let shop = Storefront::new(StorefrontConfig::default());
/// let device = shop.auth_client();
/// let session = device.sign_in("ana@shop.test", "secret1").await?;
///
/// let order_id = shop.place_order(&session, product_id, 2, "Happy Birthday").await?;
/// let mut tracker = shop.track_order(&session, order_id).await?;
/// let view = tracker.next().await;
///
/// drop(device);
/// shop.shutdown().await?;
/// ```
pub struct Storefront {
    config: StorefrontConfig,
    products: ProductClient,
    orders: OrderClient,
    users: UserClient,
    wishlist: WishlistClient,
    chat: ChatClient,
    auth: Arc<LocalAuth>,
    blobs: Arc<dyn BlobStore>,
    /// Collections only the storefront holds clients for.
    handles: Vec<JoinHandle<()>>,
    /// User and credential collections, also reachable through live `AuthClient`s.
    auth_handles: Vec<JoinHandle<()>>,
}

impl Storefront {
    /// Starts the storefront with an in-memory blob store.
    pub fn new(config: StorefrontConfig) -> Self {
        Self::with_blob_store(config, Arc::new(MemoryBlobStore::new()))
    }

    /// Must be called inside a Tokio runtime.
    pub fn with_blob_store(config: StorefrontConfig, blobs: Arc<dyn BlobStore>) -> Self {
        let buffer = config.channel_buffer;

        // 1. Create actors (no dependencies yet)
        let (user_actor, user_client) = crate::user_actor::new(buffer);
        let (product_actor, product_client) = crate::product_actor::new(buffer);
        let (order_actor, order_client) = crate::order_actor::new(buffer);
        let (wishlist_actor, wishlist_client) = crate::wishlist_actor::new(buffer);
        let (chat_actor, chat_client) = crate::chat_actor::new(buffer);
        let (credential_actor, credential_client) = ResourceActor::<Credential>::new(buffer);

        let users = UserClient::new(user_client);

        // 2. Start actors with injected context
        let auth_handles = vec![
            tokio::spawn(user_actor.run(())),
            tokio::spawn(credential_actor.run(())),
        ];
        let handles = vec![
            tokio::spawn(product_actor.run(())),
            // Orders confirm the customer's profile on creation
            tokio::spawn(order_actor.run(users.clone())),
            tokio::spawn(wishlist_actor.run(())),
            tokio::spawn(chat_actor.run(())),
        ];

        let auth = Arc::new(LocalAuth::new(
            users.clone(),
            CredentialClient::new(credential_client),
            &config.admin_emails,
            config.min_password_len,
        ));

        info!(admins = config.admin_emails.len(), buffer, "Storefront started");
        Self {
            config,
            products: ProductClient::new(product_client),
            orders: OrderClient::new(order_client),
            users,
            wishlist: WishlistClient::new(wishlist_client),
            chat: ChatClient::new(chat_client),
            auth,
            blobs,
            handles,
            auth_handles,
        }
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// A new sign-in handle, e.g. one per browser tab. Starts signed out.
    pub fn auth_client(&self) -> AuthClient {
        AuthClient::new(self.auth.clone())
    }

    // --- Catalog ---

    pub async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.products.catalog().await?)
    }

    pub async fn product(&self, id: ProductId) -> Result<Product> {
        Ok(self.products.require(id).await?)
    }

    /// The live product grid.
    pub async fn subscribe_catalog(&self) -> Result<Subscription<Product>> {
        Ok(self.products.subscribe_catalog().await?)
    }

    pub async fn check_stock(&self, id: ProductId) -> Result<u32> {
        Ok(self.products.check_stock(id).await?)
    }

    /// Adds a product from the admin form.
    ///
    /// The image is uploaded first. If the product cannot be stored afterwards, the uploaded
    /// object is left behind and its path is logged.
    #[instrument(skip(self, session, form), fields(name = %form.name))]
    pub async fn add_product(&self, session: &Session, form: ProductForm) -> Result<ProductId> {
        session.require_admin()?;

        let name = form.name.trim().to_string();
        if name.is_empty() {
            return Err(StorefrontError::Validation("product name is required".into()));
        }
        let price: f64 = form
            .price
            .trim()
            .parse()
            .ok()
            .filter(|p: &f64| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| StorefrontError::Validation(format!("invalid price {:?}", form.price)))?;
        let image = form
            .image
            .filter(|i| !i.bytes.is_empty())
            .ok_or_else(|| StorefrontError::Validation("product image is required".into()))?;

        let path = product_image_path(
            Utc::now().timestamp_millis(),
            rand::random(),
            &image.file_name,
        );
        let image_url = self
            .blobs
            .upload(&path, image.bytes, &image.content_type)
            .await?;

        let created = self
            .products
            .create_product(ProductCreate {
                name,
                price,
                stock: self.config.default_stock,
                image_url,
                description: form.description,
                category: form.category,
            })
            .await;
        match created {
            Ok(id) => {
                info!(product_id = %id, "Product added");
                Ok(id)
            }
            Err(e) => {
                warn!(orphaned_blob = %path, error = %e, "Product insert failed after upload");
                Err(e.into())
            }
        }
    }

    pub async fn edit_product(
        &self,
        session: &Session,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product> {
        session.require_admin()?;
        Ok(self.products.update_product(id, update).await?)
    }

    /// Adds `delta` to a product's stock and returns the new level.
    pub async fn adjust_stock(&self, session: &Session, id: ProductId, delta: i64) -> Result<u32> {
        session.require_admin()?;
        Ok(self.products.adjust_stock(id, delta).await?)
    }

    /// Removes a product. Orders and wishlist entries keep their copies.
    pub async fn remove_product(&self, session: &Session, id: ProductId) -> Result<()> {
        session.require_admin()?;
        self.products.delete(id).await?;
        info!(product_id = %id, "Product removed");
        Ok(())
    }

    // --- Orders ---

    /// Places an order for the signed-in customer at the product's current price.
    #[instrument(skip(self, session, personalization))]
    pub async fn place_order(
        &self,
        session: &Session,
        product_id: ProductId,
        quantity: u32,
        personalization: &str,
    ) -> Result<OrderId> {
        let customer = session.require_user()?;
        if quantity == 0 {
            return Err(StorefrontError::Validation(
                "quantity must be at least 1".into(),
            ));
        }
        let product = self.products.require(product_id).await?;

        Ok(self
            .orders
            .create_order(OrderCreate {
                user_id: customer.user_id(),
                user_email: customer.email().to_string(),
                product_id,
                product_name: product.name,
                unit_price: product.price,
                image_url: product.image_url,
                quantity,
                personalization: personalization.trim().to_string(),
            })
            .await?)
    }

    /// Order form entry point: the quantity arrives as typed.
    pub async fn place_order_form(
        &self,
        session: &Session,
        product_id: ProductId,
        quantity: &str,
        personalization: &str,
    ) -> Result<OrderId> {
        session.require_user()?;
        let quantity = parse_quantity(quantity).map_err(StorefrontError::Validation)?;
        self.place_order(session, product_id, quantity, personalization)
            .await
    }

    /// The signed-in customer's orders, newest first.
    pub async fn my_orders(&self, session: &Session) -> Result<Vec<Order>> {
        let customer = session.require_user()?;
        Ok(self.orders.orders_for(customer.user_id()).await?)
    }

    /// Every order, newest first.
    pub async fn order_queue(&self, session: &Session) -> Result<Vec<Order>> {
        session.require_admin()?;
        Ok(self.orders.queue().await?)
    }

    pub async fn subscribe_order_queue(&self, session: &Session) -> Result<Subscription<Order>> {
        session.require_admin()?;
        Ok(self.orders.subscribe_queue().await?)
    }

    #[instrument(skip(self, session))]
    pub async fn transition_order(
        &self,
        session: &Session,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Order> {
        session.require_admin()?;
        Ok(self.orders.transition(order_id, status).await?)
    }

    /// Follows one order. Customers may only track their own orders.
    pub async fn track_order(&self, session: &Session, order_id: OrderId) -> Result<OrderTracker> {
        let caller = session.require_user()?;
        let order = self.orders.require(order_id).await?;
        if order.user_id != caller.user_id() && !caller.is_admin() {
            return Err(StorefrontError::Unauthorized(format!(
                "{order_id} belongs to another customer"
            )));
        }
        let subscription = self.orders.watch(order_id).await?;
        Ok(OrderTracker::new(order_id, subscription))
    }

    // --- Wishlist ---

    /// Saves or un-saves a product for the signed-in customer.
    pub async fn toggle_wishlist(
        &self,
        session: &Session,
        product_id: ProductId,
    ) -> Result<WishlistToggle> {
        let customer = session.require_user()?;
        let user_id = customer.user_id();
        // An existing entry can be removed even after the product is gone
        if let Some(entry) = self.wishlist.entry_for(user_id, product_id).await? {
            self.wishlist.delete(entry.id).await?;
            return Ok(WishlistToggle::Removed);
        }
        let product = self.products.require(product_id).await?;
        Ok(self.wishlist.toggle(user_id, &product).await?)
    }

    pub async fn wishlist(&self, session: &Session) -> Result<Vec<WishlistEntry>> {
        let customer = session.require_user()?;
        Ok(self.wishlist.entries_for(customer.user_id()).await?)
    }

    // --- Chat ---

    /// A customer writes to the shop.
    pub async fn send_message(&self, session: &Session, text: &str) -> Result<MessageId> {
        let customer = session.require_user()?;
        Ok(self
            .chat
            .send(ChatMessageCreate {
                user_id: customer.user_id(),
                user_email: Some(customer.email().to_string()),
                text: text.to_string(),
                sender: Sender::User,
            })
            .await?)
    }

    /// The admin answers in a customer's conversation. Only registered users have one.
    pub async fn reply(&self, session: &Session, user_id: UserId, text: &str) -> Result<MessageId> {
        session.require_admin()?;
        if self.users.get(user_id).await?.is_none() {
            return Err(crate::user_actor::UserError::NotFound(user_id.to_string()).into());
        }
        Ok(self
            .chat
            .send(ChatMessageCreate {
                user_id,
                user_email: None,
                text: text.to_string(),
                sender: Sender::Admin,
            })
            .await?)
    }

    fn check_conversation_access(session: &Session, user_id: UserId) -> Result<()> {
        let caller = session.require_user()?;
        if caller.user_id() != user_id && !caller.is_admin() {
            return Err(StorefrontError::Unauthorized(
                "conversation belongs to another customer".into(),
            ));
        }
        Ok(())
    }

    pub async fn conversation(&self, session: &Session, user_id: UserId) -> Result<Vec<ChatMessage>> {
        Self::check_conversation_access(session, user_id)?;
        Ok(self.chat.conversation(user_id).await?)
    }

    pub async fn subscribe_conversation(
        &self,
        session: &Session,
        user_id: UserId,
    ) -> Result<Subscription<ChatMessage>> {
        Self::check_conversation_access(session, user_id)?;
        Ok(self.chat.subscribe_conversation(user_id).await?)
    }

    /// The admin's inbox.
    pub async fn conversations(&self, session: &Session) -> Result<Vec<Conversation>> {
        session.require_admin()?;
        Ok(self.chat.conversations().await?)
    }

    // --- Profile ---

    pub async fn profile(&self, session: &Session) -> Result<UserProfile> {
        let user = session.require_user()?;
        let profile = self.users.get(user.user_id()).await?;
        profile.ok_or_else(|| {
            crate::user_actor::UserError::NotFound(user.user_id().to_string()).into()
        })
    }

    pub async fn update_profile(&self, session: &Session, update: UserUpdate) -> Result<UserProfile> {
        let user = session.require_user()?;
        Ok(self.users.update_user(user.user_id(), update).await?)
    }

    // --- Lifecycle ---

    /// Gracefully shuts down every collection.
    ///
    /// Dropping the storefront's clients closes each actor's channel and the actors drain
    /// and exit. The user and credential collections stay reachable through any
    /// [`AuthClient`] still alive; if there are such handles they are stopped with an abort.
    pub async fn shutdown(self) -> Result<()> {
        info!("Shutting down storefront...");
        let Storefront {
            products,
            orders,
            users,
            wishlist,
            chat,
            auth,
            handles,
            auth_handles,
            ..
        } = self;

        // Step 1: close channels by dropping clients
        drop((products, orders, wishlist, chat, users));
        let auth_clients_alive = Arc::strong_count(&auth) > 1;
        drop(auth);

        // Step 2: wait for the actors
        let mut failures = Vec::new();
        for handle in handles {
            if let Err(e) = handle.await {
                failures.push(e.to_string());
            }
        }
        for handle in auth_handles {
            if auth_clients_alive {
                handle.abort();
            }
            match handle.await {
                Err(e) if !e.is_cancelled() => failures.push(e.to_string()),
                _ => {}
            }
        }
        if auth_clients_alive {
            warn!("AuthClient handles outlived the storefront; auth collections aborted");
        }

        if failures.is_empty() {
            info!("Storefront shut down");
            Ok(())
        } else {
            Err(StorefrontError::Shutdown(failures.join("; ")))
        }
    }
}
