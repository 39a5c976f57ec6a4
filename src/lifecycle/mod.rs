//! # Lifecycle
//!
//! Starts the collection actors, injects their dependencies and shuts them down in order.
//! [`Storefront`] is the single entry point the UI layer talks to.

pub mod storefront;

pub use storefront::Storefront;
