//! Relay subscription interface — the seam between the store and whatever
//! speaks the relay wire protocol.
//!
//! A [`RelayClient`] turns a [`SubscriptionFilter`] into a [`Subscription`]:
//! a bounded channel of [`SubscriptionEvent`]s plus a cancellation token.
//! The producing side holds the matching [`SubscriptionSender`]. Dropping the
//! `Subscription` (or calling [`Subscription::unsubscribe`]) trips the token;
//! producers watch it and tear down their relay-side subscription.

use crate::types::{Release, RELEASE_KIND};
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

/// Capacity of the event channel between a relay client and the store.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 512;

/// What to ask the relays for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionFilter {
    pub kind: u16,
    /// Hex public keys of the publishers.
    pub authors: Vec<String>,
    pub limit: usize,
}

impl SubscriptionFilter {
    /// Release-metadata events of a single publisher.
    pub fn releases_of(publisher_key: impl Into<String>, limit: usize) -> Self {
        Self {
            kind: RELEASE_KIND,
            authors: vec![publisher_key.into()],
            limit,
        }
    }
}

/// A notification delivered by a subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum SubscriptionEvent {
    /// A stored or live event. May arrive in any order, possibly duplicated.
    Event(Release),
    /// All relays have sent their stored events. Delivered at most once.
    EndOfStoredEvents,
    /// Terminal failure of this subscription.
    Error(String),
}

/// Source of release subscriptions, implemented by the relay transport.
///
/// `subscribe` must not block: implementations hand back the subscription
/// immediately and deliver events from a background task.
pub trait RelayClient: Send + Sync {
    fn subscribe(&self, filter: SubscriptionFilter) -> Subscription;
}

// ---------------------------------------------------------------------------
// Subscription (consumer side)
// ---------------------------------------------------------------------------

/// Consumer half of a subscription. Cancels the producer when dropped.
#[derive(Debug)]
pub struct Subscription {
    events: mpsc::Receiver<SubscriptionEvent>,
    cancel: CancellationToken,
}

impl Subscription {
    /// Create a linked producer/consumer pair.
    pub fn channel(capacity: usize) -> (SubscriptionSender, Subscription) {
        let (tx, rx) = mpsc::channel(capacity);
        let cancel = CancellationToken::new();
        (
            SubscriptionSender {
                tx,
                cancel: cancel.clone(),
            },
            Subscription { events: rx, cancel },
        )
    }

    /// Next notification, or `None` once the producer has gone away.
    pub async fn recv(&mut self) -> Option<SubscriptionEvent> {
        self.events.recv().await
    }

    /// Stop the subscription. Equivalent to dropping it.
    pub fn unsubscribe(self) {}

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl Stream for Subscription {
    type Item = SubscriptionEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.events.poll_recv(cx)
    }
}

// ---------------------------------------------------------------------------
// SubscriptionSender (producer side)
// ---------------------------------------------------------------------------

/// Producer half of a subscription, held by the relay client.
#[derive(Debug, Clone)]
pub struct SubscriptionSender {
    tx: mpsc::Sender<SubscriptionEvent>,
    cancel: CancellationToken,
}

impl SubscriptionSender {
    /// Deliver a notification. Returns `false` once the consumer is gone.
    pub async fn send(&self, event: SubscriptionEvent) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        self.tx.send(event).await.is_ok()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Resolves when the consumer unsubscribes or drops the subscription.
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.cancel.cancelled()
    }
}
