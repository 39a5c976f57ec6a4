//! # Tracing Setup
//!
//! Every actor logs with an `entity_type` field (`Order`, `Product`, ...) instead of a module
//! path, so the subscriber is configured to hide targets. Filtering follows `RUST_LOG` when it
//! is set and falls back to the directive passed in otherwise:
//!
//! ```bash
//! RUST_LOG=debug cargo run                 # every request, with payloads
//! RUST_LOG=info,boutique=debug cargo run   # storefront detail only
//! ```
//!
//! A typical `info` run of an order being placed and moved along:
//!
//! ```text
//! INFO Actor started entity_type="Order"
//! INFO place_order: Created entity_type="Order" id=order_1 size=1
//! INFO transition_order: Updated entity_type="Order" id=order_1
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. Safe to call more than once: later calls are no-ops.
pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type replaces module paths
        .compact()
        .try_init();
}
