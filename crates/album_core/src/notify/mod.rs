//! Resource-keyed change notification.
//!
//! # Responsibility
//! - Let writers announce "this resource changed" without a payload.
//! - Let any number of observers subscribe per resource URI.
//!
//! # Invariants
//! - Publishing never blocks on subscribers and never fails the write.
//! - Each publish reaches each live subscription at most once.
//! - Dropped subscriptions are pruned on the next publish to their topic.

use log::{debug, warn};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

/// Correlation token identifying the caller that triggered a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OriginToken(Uuid);

impl OriginToken {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OriginToken {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for OriginToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-supplied context passed alongside a mutating call.
///
/// A subscriber that mutates in response to a notification tags its own
/// writes with an origin, then ignores events carrying that origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationContext {
    origin: Option<OriginToken>,
}

impl MutationContext {
    pub fn with_origin(origin: OriginToken) -> Self {
        Self {
            origin: Some(origin),
        }
    }

    pub fn origin(&self) -> Option<OriginToken> {
        self.origin
    }
}

/// Zero-payload "resource changed" signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub uri: String,
    pub origin: Option<OriginToken>,
}

impl ChangeEvent {
    /// Returns whether the mutation behind this event was tagged with `token`.
    pub fn is_from(&self, token: &OriginToken) -> bool {
        self.origin.as_ref() == Some(token)
    }
}

type Topics = BTreeMap<String, Vec<Sender<ChangeEvent>>>;

/// Shared topic registry. Clones publish to and subscribe on the same topics.
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    topics: Arc<Mutex<Topics>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new observer for `uri`.
    pub fn subscribe(&self, uri: &str) -> Subscription {
        let (sender, receiver) = mpsc::channel();
        let mut topics = self.lock_topics();
        topics.entry(uri.to_string()).or_default().push(sender);
        debug!(
            "event=notify_subscribe module=notify status=ok uri={} observers={}",
            uri,
            topics.get(uri).map_or(0, Vec::len)
        );
        Subscription {
            uri: uri.to_string(),
            receiver,
        }
    }

    /// Publishes one change event for `uri`.
    ///
    /// Returns the number of live subscriptions the event was handed to.
    pub fn notify_change(&self, uri: &str, origin: Option<OriginToken>) -> usize {
        let mut topics = self.lock_topics();
        let Some(senders) = topics.get_mut(uri) else {
            debug!("event=notify_change module=notify status=ok uri={uri} delivered=0");
            return 0;
        };

        let event = ChangeEvent {
            uri: uri.to_string(),
            origin,
        };
        senders.retain(|sender| sender.send(event.clone()).is_ok());
        let delivered = senders.len();
        if senders.is_empty() {
            topics.remove(uri);
        }

        debug!("event=notify_change module=notify status=ok uri={uri} delivered={delivered}");
        delivered
    }

    /// Returns the number of registered observers for `uri`.
    ///
    /// Dropped subscriptions are counted until the next publish prunes them.
    pub fn observer_count(&self, uri: &str) -> usize {
        self.lock_topics().get(uri).map_or(0, Vec::len)
    }

    fn lock_topics(&self) -> std::sync::MutexGuard<'_, Topics> {
        match self.topics.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("event=notify_lock module=notify status=recovered reason=poisoned");
                poisoned.into_inner()
            }
        }
    }
}

/// Receiving end for one observer. Dropping it unsubscribes.
pub struct Subscription {
    uri: String,
    receiver: Receiver<ChangeEvent>,
}

impl Subscription {
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the next pending event without waiting.
    pub fn try_next(&self) -> Option<ChangeEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Waits up to `timeout` for the next event.
    pub fn next_timeout(&self, timeout: Duration) -> Option<ChangeEvent> {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Drains every pending event.
    pub fn drain(&self) -> Vec<ChangeEvent> {
        self.receiver.try_iter().collect()
    }
}
