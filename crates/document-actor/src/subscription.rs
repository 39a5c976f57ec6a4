//! # Live Subscriptions
//!
//! A [`Subscription`] is a standing [`Query`](crate::Query). The actor pushes the full,
//! query-ordered result set once when the subscription is registered and again after every
//! successful mutation of the collection.
//!
//! Each subscription holds only the newest snapshot. A reader that falls behind skips the
//! intermediate states and sees the current one on its next read, so an idle view costs one
//! result set however many writes happen.
//!
//! Releasing a subscription is explicit: call [`Subscription::unsubscribe`] (or drop it) when
//! the consuming view is torn down. The actor notices the closed channel on its next publish
//! and forgets the subscriber, so abandoned views never accumulate listeners.

use tokio::sync::watch;

/// Receiving half of a live query.
#[derive(Debug)]
pub struct Subscription<T> {
    receiver: watch::Receiver<Vec<T>>,
}

impl<T: Clone> Subscription<T> {
    pub(crate) fn new(receiver: watch::Receiver<Vec<T>>) -> Self {
        Self { receiver }
    }

    /// Waits for a snapshot newer than the last one read. Returns `None` once the collection
    /// actor has shut down and every snapshot has been read.
    pub async fn next(&mut self) -> Option<Vec<T>> {
        self.receiver.changed().await.ok()?;
        Some((*self.receiver.borrow_and_update()).clone())
    }

    /// Returns the newest snapshot if one arrived since the last read, without waiting.
    pub fn latest(&mut self) -> Option<Vec<T>> {
        let snapshot = self.receiver.borrow_and_update();
        snapshot.has_changed().then(|| (*snapshot).clone())
    }

    /// Stops delivery and releases the subscription.
    pub fn unsubscribe(self) {
        drop(self.receiver);
    }
}

/// Actor-side record of one subscriber.
pub(crate) struct Subscriber<T> {
    pub(crate) query: crate::Query<T>,
    pub(crate) sender: watch::Sender<Vec<T>>,
}

/// Creates a connected subscriber/subscription pair. Nothing is readable until the first
/// snapshot is sent.
pub(crate) fn channel<T: Clone>(query: crate::Query<T>) -> (Subscriber<T>, Subscription<T>) {
    let (sender, receiver) = watch::channel(Vec::new());
    (Subscriber { query, sender }, Subscription::new(receiver))
}
