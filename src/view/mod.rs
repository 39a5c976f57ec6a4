//! # Views
//!
//! State the presentation layer owns and passes into [`Storefront`](crate::lifecycle::Storefront)
//! calls: the selected chat peer, the wishlist hearts, the order being tracked.

pub mod chat;
pub mod tracker;
pub mod wishlist;

pub use chat::AdminChatPanel;
pub use tracker::{OrderTracker, Progress, TrackerView};
pub use wishlist::{PendingToggle, WishlistView};
