//! Order progress as a customer sees it.

use crate::model::{Order, OrderId, OrderStatus};
use document_actor::Subscription;

/// Number of steps between `Pending` and `Completed`.
const LAST_STEP: u8 = 3;

/// Where an order sits on the progress bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    /// `index` runs 0 (`Pending`) to 3 (`Completed`); `fill_ratio` is `index / 3`.
    Step { index: u8, fill_ratio: f64 },
    /// Shown as its own badge instead of a bar.
    Rejected,
}

impl Progress {
    pub fn of(status: OrderStatus) -> Self {
        match status.step_index() {
            Some(index) => Progress::Step {
                index,
                fill_ratio: f64::from(index) / f64::from(LAST_STEP),
            },
            None => Progress::Rejected,
        }
    }

    pub fn fill_ratio(&self) -> Option<f64> {
        match self {
            Progress::Step { fill_ratio, .. } => Some(*fill_ratio),
            Progress::Rejected => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackerView {
    pub order: Order,
    pub progress: Progress,
}

impl TrackerView {
    pub fn status(&self) -> OrderStatus {
        self.order.status
    }
}

/// Follows one order through pushed snapshots.
///
/// The view only changes when a snapshot arrives. If an update fails on the admin side, no
/// snapshot is sent and the last view stays on screen.
pub struct OrderTracker {
    order_id: OrderId,
    subscription: Subscription<Order>,
    current: Option<TrackerView>,
}

impl OrderTracker {
    pub(crate) fn new(order_id: OrderId, subscription: Subscription<Order>) -> Self {
        Self {
            order_id,
            subscription,
            current: None,
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// The last view returned by [`next`](Self::next).
    pub fn current(&self) -> Option<&TrackerView> {
        self.current.as_ref()
    }

    /// Waits for the order's status to change and returns the new view. The first call returns
    /// the state at subscription time.
    ///
    /// Returns `None` when the order no longer exists or the store has shut down.
    pub async fn next(&mut self) -> Option<TrackerView> {
        loop {
            let snapshot = self.subscription.next().await?;
            let order = snapshot.into_iter().find(|o| o.id == self.order_id)?;
            if self.current.as_ref().map(|v| v.order.status) == Some(order.status) {
                continue;
            }
            let view = TrackerView {
                progress: Progress::of(order.status),
                order,
            };
            self.current = Some(view.clone());
            return Some(view);
        }
    }

    /// Stops following the order.
    pub fn close(self) {
        self.subscription.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_ratio_is_index_over_three() {
        let steps = [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Completed,
        ];
        let ratios: Vec<f64> = steps
            .iter()
            .filter_map(|s| Progress::of(*s).fill_ratio())
            .collect();
        assert_eq!(ratios, vec![0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0]);
        assert!(ratios.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn rejected_is_a_badge() {
        assert_eq!(Progress::of(OrderStatus::Rejected), Progress::Rejected);
        assert_eq!(Progress::Rejected.fill_ratio(), None);
    }
}
