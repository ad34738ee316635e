//! Live relay client backed by nostr-sdk.
//!
//! [`NostrRelayClient`] keeps one nostr-sdk [`Client`] connected to the
//! configured relays. Every [`RelayClient::subscribe`] call spawns a task
//! that opens a relay subscription, forwards matching events, and collapses
//! the per-relay EOSE/CLOSED replies into a single end-of-stored-events
//! signal. Relays that never answer are given up on after `eose_timeout`.

use crate::{Error, Result};

use nostr_sdk::prelude::*;
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tollgate_core::config::RelaysConfig;
use tollgate_core::subscription::DEFAULT_CHANNEL_CAPACITY;
use tollgate_core::{
    RelayClient, Release, Subscription, SubscriptionEvent, SubscriptionFilter,
    SubscriptionSender, Tag as ReleaseTag,
};

/// Configuration for the relay client.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Relay URLs to connect to.
    pub urls: Vec<String>,

    /// Maximum wait for every relay's end-of-stored-events reply.
    pub eose_timeout: Duration,

    /// Size of the nostr-sdk notification channel buffer.
    pub notification_channel_size: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self::from(&RelaysConfig::default())
    }
}

impl From<&RelaysConfig> for RelayConfig {
    fn from(cfg: &RelaysConfig) -> Self {
        Self {
            urls: cfg.urls.clone(),
            eose_timeout: Duration::from_secs(cfg.eose_timeout_secs),
            notification_channel_size: 4096,
        }
    }
}

/// [`RelayClient`] speaking the Nostr wire protocol.
pub struct NostrRelayClient {
    client: Client,
    config: RelayConfig,
}

impl NostrRelayClient {
    /// Add the configured relays and start connecting to them.
    ///
    /// Connection happens in the background; relays that fail to connect
    /// simply never answer subscriptions.
    pub async fn connect(config: RelayConfig) -> Result<Self> {
        if config.urls.is_empty() {
            return Err(Error::NoRelays);
        }

        let pool_opts = RelayPoolOptions::default()
            .notification_channel_size(config.notification_channel_size);
        let client = Client::builder()
            .opts(ClientOptions::new().pool(pool_opts))
            .build();

        for url in &config.urls {
            if let Err(e) = client.add_relay(url).await {
                tracing::warn!("Failed to add relay {}: {}", url, e);
            } else {
                tracing::debug!("Added relay: {}", url);
            }
        }

        client.connect().await;
        tracing::info!("Connecting to {} relays", config.urls.len());

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Close every relay connection.
    pub async fn disconnect(&self) {
        self.client.disconnect().await;
    }
}

impl RelayClient for NostrRelayClient {
    /// Must be called from within a tokio runtime.
    fn subscribe(&self, filter: SubscriptionFilter) -> Subscription {
        let (tx, subscription) = Subscription::channel(DEFAULT_CHANNEL_CAPACITY);
        let client = self.client.clone();
        let eose_timeout = self.config.eose_timeout;

        tokio::spawn(async move {
            if let Err(e) = stream_releases(&client, filter, eose_timeout, &tx).await {
                tracing::error!("Release subscription failed: {}", e);
                tx.send(SubscriptionEvent::Error(e.to_string())).await;
            }
        });

        subscription
    }
}

/// Convert a nostr-sdk event into a [`Release`].
pub fn to_release(event: &Event) -> Release {
    Release {
        id: event.id.to_hex(),
        pubkey: event.pubkey.to_hex(),
        kind: event.kind.as_u16(),
        created_at: Some(event.created_at.as_secs() as i64),
        tags: event
            .tags
            .iter()
            .map(|tag| ReleaseTag::from(tag.as_slice().to_vec()))
            .collect(),
        content: Some(event.content.clone()).filter(|c| !c.is_empty()),
        sig: Some(event.sig.to_string()),
    }
}

/// Translate the core filter into a nostr-sdk [`Filter`].
pub fn to_nostr_filter(filter: &SubscriptionFilter) -> Result<Filter> {
    let authors = filter
        .authors
        .iter()
        .map(|key| {
            PublicKey::from_hex(key).map_err(|e| Error::InvalidPublicKey {
                key: key.clone(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Filter::new()
        .kind(Kind::from(filter.kind))
        .authors(authors)
        .limit(filter.limit))
}

fn is_subscription(id: &SubscriptionId, ours: &SubscriptionId) -> bool {
    id == ours
}

async fn stream_releases(
    client: &Client,
    filter: SubscriptionFilter,
    eose_timeout: Duration,
    tx: &SubscriptionSender,
) -> Result<()> {
    let nostr_filter = to_nostr_filter(&filter)?;

    // Listen before subscribing so no early reply is missed.
    let mut notifications = client.notifications();

    let output = client.subscribe(nostr_filter, None).await?;
    let sub_id = output.val;
    if output.success.is_empty() {
        let reasons: Vec<String> = output
            .failed
            .iter()
            .map(|(url, reason)| format!("{url}: {reason}"))
            .collect();
        return Err(Error::Rejected(reasons.join(", ")));
    }
    tracing::info!(
        "Subscribed with ID {} on {} relays",
        sub_id,
        output.success.len()
    );

    let mut pending: HashSet<RelayUrl> = output.success;
    let mut eose_sent = false;
    let deadline = tokio::time::sleep(eose_timeout);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = tx.cancelled() => {
                tracing::debug!("Subscription {} cancelled by consumer", sub_id);
                break;
            }

            _ = &mut deadline, if !eose_sent => {
                tracing::warn!(
                    "{} relays did not finish stored events within {:?}",
                    pending.len(),
                    eose_timeout
                );
                eose_sent = true;
                if !tx.send(SubscriptionEvent::EndOfStoredEvents).await {
                    break;
                }
            }

            notification = notifications.recv() => {
                match notification {
                    Ok(RelayPoolNotification::Event { subscription_id, event, .. }) => {
                        if is_subscription(&subscription_id, &sub_id)
                            && !tx.send(SubscriptionEvent::Event(to_release(&event))).await
                        {
                            break;
                        }
                    }
                    Ok(RelayPoolNotification::Message { relay_url, message }) => {
                        match message {
                            RelayMessage::EndOfStoredEvents(id) if is_subscription(&id, &sub_id) => {
                                tracing::debug!("EOSE from {}", relay_url);
                                pending.remove(&relay_url);
                            }
                            RelayMessage::Closed { subscription_id, message: closed_msg }
                                if is_subscription(&subscription_id, &sub_id) =>
                            {
                                tracing::warn!(
                                    "Relay {} closed subscription {}: {}",
                                    relay_url,
                                    sub_id,
                                    closed_msg
                                );
                                pending.remove(&relay_url);
                            }
                            _ => {}
                        }

                        if pending.is_empty() && !eose_sent {
                            eose_sent = true;
                            if !tx.send(SubscriptionEvent::EndOfStoredEvents).await {
                                break;
                            }
                        }
                    }
                    Ok(RelayPoolNotification::Shutdown) => {
                        tracing::info!("Relay pool shutdown notification received");
                        return Err(Error::PoolClosed);
                    }
                    Err(RecvError::Lagged(count)) => {
                        tracing::warn!("Notification receiver lagged, dropped {} messages", count);
                    }
                    Err(RecvError::Closed) => {
                        tracing::info!("Notification channel closed");
                        return Err(Error::PoolClosed);
                    }
                }
            }
        }
    }

    client.unsubscribe(&sub_id).await;
    Ok(())
}
