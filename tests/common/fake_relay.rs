//! FakeRelay — an in-memory [`RelayClient`] for store tests.
//!
//! Every `subscribe` call records its filter and keeps the producer half of
//! the subscription so the test can push events by hand. Alternatively a
//! script can be installed; the next subscription then replays it from a
//! spawned task and closes.

use std::sync::{Arc, Mutex};
use tollgate_core::subscription::DEFAULT_CHANNEL_CAPACITY;
use tollgate_core::{
    RelayClient, Subscription, SubscriptionEvent, SubscriptionFilter, SubscriptionSender,
};

#[derive(Default)]
pub struct FakeRelay {
    filters: Mutex<Vec<SubscriptionFilter>>,
    senders: Mutex<Vec<SubscriptionSender>>,
    script: Mutex<Option<Vec<SubscriptionEvent>>>,
}

impl FakeRelay {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Replay `events` on the next subscription, then close it. Requires a
    /// tokio runtime at subscribe time.
    pub fn script(&self, events: Vec<SubscriptionEvent>) {
        *self.script.lock().unwrap() = Some(events);
    }

    /// Filters passed to `subscribe`, oldest first.
    pub fn filters(&self) -> Vec<SubscriptionFilter> {
        self.filters.lock().unwrap().clone()
    }

    pub fn subscription_count(&self) -> usize {
        self.filters.lock().unwrap().len()
    }

    /// Producer half of the `n`th hand-driven subscription.
    pub fn sender(&self, n: usize) -> SubscriptionSender {
        self.senders.lock().unwrap()[n].clone()
    }

    /// Producer half of the most recent hand-driven subscription.
    pub fn last_sender(&self) -> SubscriptionSender {
        self.senders
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no hand-driven subscription yet")
    }

    /// Drop every retained producer so consumers see the channel close.
    pub fn close_all(&self) {
        self.senders.lock().unwrap().clear();
    }
}

impl RelayClient for FakeRelay {
    fn subscribe(&self, filter: SubscriptionFilter) -> Subscription {
        self.filters.lock().unwrap().push(filter);
        let (tx, subscription) = Subscription::channel(DEFAULT_CHANNEL_CAPACITY);

        match self.script.lock().unwrap().take() {
            Some(events) => {
                tokio::spawn(async move {
                    for event in events {
                        if !tx.send(event).await {
                            break;
                        }
                    }
                });
            }
            None => self.senders.lock().unwrap().push(tx),
        }
        subscription
    }
}
