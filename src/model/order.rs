//! Order documents and the fulfilment state machine.
//!
//! ```text
//! Pending ──▶ Preparing ──▶ Ready ──▶ Completed
//!    │            │           │
//!    └────────────┴───────────┴──────▶ Rejected
//! ```
//!
//! `Completed` and `Rejected` are terminal. Writing the current status again is accepted and
//! changes nothing.

use crate::model::{ProductId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

document_id!(
    /// Order document id.
    OrderId,
    "order"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Older admin consoles wrote `Accepted` for an order that had been seen but not started.
    #[serde(alias = "Accepted")]
    Pending,
    Preparing,
    Ready,
    Completed,
    Rejected,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
        OrderStatus::Rejected,
    ];

    /// States reachable in one step, excluding the current one.
    pub fn allowed_next(self) -> &'static [OrderStatus] {
        use OrderStatus::*;
        match self {
            Pending => &[Preparing, Rejected],
            Preparing => &[Ready, Rejected],
            Ready => &[Completed, Rejected],
            Completed | Rejected => &[],
        }
    }

    pub fn can_transition_to(self, target: OrderStatus) -> bool {
        self == target || self.allowed_next().contains(&target)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_next().is_empty()
    }

    /// Position on the progress bar. `Rejected` is off the bar.
    pub fn step_index(self) -> Option<u8> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::Preparing => Some(1),
            OrderStatus::Ready => Some(2),
            OrderStatus::Completed => Some(3),
            OrderStatus::Rejected => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Completed => "Completed",
            OrderStatus::Rejected => "Rejected",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Pending" | "Accepted" => Ok(OrderStatus::Pending),
            "Preparing" => Ok(OrderStatus::Preparing),
            "Ready" => Ok(OrderStatus::Ready),
            "Completed" => Ok(OrderStatus::Completed),
            "Rejected" => Ok(OrderStatus::Rejected),
            other => Err(format!("unknown order status {other:?}")),
        }
    }
}

/// A placed order.
///
/// Everything except `status` is fixed at creation. `unit_price`, `product_name` and
/// `image_url` are copies of the product as it was when the order was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub user_email: String,
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: f64,
    pub image_url: String,
    pub quantity: u32,
    pub total_price: f64,
    pub personalization: String,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
}

/// Payload for placing an order. Built by the storefront from the signed-in customer and the
/// product's current state.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub user_email: String,
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: f64,
    pub image_url: String,
    pub quantity: u32,
    pub personalization: String,
}

/// The only mutable field of an order.
#[derive(Debug, Clone)]
pub struct OrderUpdate {
    pub status: OrderStatus,
}

/// Parses the quantity field of the order form.
pub fn parse_quantity(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("quantity must be at least 1".into()),
        Ok(q) => Ok(q),
        Err(_) => Err(format!("quantity {raw:?} is not a whole number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_allow_nothing_but_themselves() {
        for terminal in [OrderStatus::Completed, OrderStatus::Rejected] {
            assert!(terminal.is_terminal());
            for target in OrderStatus::ALL {
                assert_eq!(terminal.can_transition_to(target), target == terminal);
            }
        }
    }

    #[test]
    fn forward_steps_and_rejection() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Preparing));
        assert!(Preparing.can_transition_to(Ready));
        assert!(Ready.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Ready.can_transition_to(Rejected));

        assert!(!Pending.can_transition_to(Ready));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Ready.can_transition_to(Preparing));
    }

    #[test]
    fn step_index_is_monotone_along_progression() {
        let path = [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Completed,
        ];
        let steps: Vec<u8> = path.iter().filter_map(|s| s.step_index()).collect();
        assert_eq!(steps, vec![0, 1, 2, 3]);
        assert_eq!(OrderStatus::Rejected.step_index(), None);
    }

    #[test]
    fn legacy_accepted_reads_as_pending() {
        assert_eq!("Accepted".parse::<OrderStatus>(), Ok(OrderStatus::Pending));
        let status: OrderStatus = serde_json::from_str("\"Accepted\"").unwrap();
        assert_eq!(status, OrderStatus::Pending);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"Pending\"");
        assert!("Shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn quantity_field_parsing() {
        assert_eq!(parse_quantity("2"), Ok(2));
        assert_eq!(parse_quantity(" 3 "), Ok(3));
        assert!(parse_quantity("0").is_err());
        assert!(parse_quantity("-1").is_err());
        assert!(parse_quantity("two").is_err());
        assert!(parse_quantity("").is_err());
    }
}
