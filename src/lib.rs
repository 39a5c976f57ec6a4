//! # Boutique
//!
//! > **A personalized-gift storefront built on resource actors.**
//!
//! Customers browse a catalog, save products to a wishlist, place orders with a
//! personalization note and follow each order's progress live. A single admin role manages
//! inventory, moves orders through their lifecycle and answers customers in a chat pane.
//!
//! ## 🧭 Order Lifecycle
//!
//! ```text
//! Pending ──▶ Preparing ──▶ Ready ──▶ Completed
//!    │            │           │
//!    └────────────┴───────────┴──▶ Rejected
//! ```
//!
//! Only the admin moves an order, one step forward at a time or to `Rejected`. `Completed`
//! and `Rejected` are final. Each order keeps a copy of the product name, price and image
//! from the moment it was placed, so later catalog edits or deletions never change it.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Store (`document_actor`)
//! Each collection is a `ResourceActor<T>` in its own Tokio task with CRUD, filtered and
//! sorted queries, and live subscriptions that push a full snapshot after every change.
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! [`Storefront`](lifecycle::Storefront) starts every collection, injects dependencies and
//! checks the caller's [`Session`](auth::Session) on each operation.
//!
//! ### 3. The Interface ([`clients`])
//! Domain clients such as [`OrderClient`](clients::OrderClient) wrap the generic client with
//! typed errors and the queries each screen needs.
//!
//! ### 4. The Collections ([`order_actor`], [`product_actor`], [`user_actor`],
//! [`wishlist_actor`], [`chat_actor`])
//! `ActorEntity` implementations holding validation and the transition rules.
//!
//! ### 5. Around the Store ([`auth`], [`blob`], [`view`], [`config`])
//! Sign-up and sign-in with role claims, product image uploads, the view state a UI keeps
//! between calls, and environment configuration.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # Run every test in the workspace
//! cargo test --workspace
//! ```

pub mod auth;
pub mod blob;
pub mod chat_actor;
pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod user_actor;
pub mod view;
pub mod wishlist_actor;

pub use auth::{AuthClient, Session};
pub use config::StorefrontConfig;
pub use error::{ErrorKind, StorefrontError};
pub use lifecycle::Storefront;
