//! Typed clients, one per collection.
//!
//! Each wraps a `ResourceClient<T>`, implements [`ActorClient`](document_actor::ActorClient)
//! for the shared `get`/`delete`/`find`/`subscribe` calls, and adds the collection's own
//! operations.

pub mod chat_client;
pub mod order_client;
pub mod product_client;
pub mod user_client;
pub mod wishlist_client;

pub use chat_client::ChatClient;
pub use order_client::OrderClient;
pub use product_client::ProductClient;
pub use user_client::UserClient;
pub use wishlist_client::WishlistClient;
