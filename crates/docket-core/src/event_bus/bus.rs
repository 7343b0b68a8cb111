//! Event bus.
//!
//! Handlers run synchronously on the publishing thread, in subscription
//! order, after the registry lock is released, so a handler may publish
//! or unsubscribe. Async consumers take a broadcast receiver instead.

use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{AppEvent, EventCategory};

/// Broadcast buffer per receiver. Slow receivers see `Lagged` past this.
pub const CHANNEL_CAPACITY: usize = 256;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", &self.0.simple().to_string()[..8])
    }
}

type Handler = Arc<dyn Fn(&AppEvent) + Send + Sync>;

struct Subscription {
    id: SubscriptionId,
    /// Empty means every category.
    categories: Vec<EventCategory>,
    handler: Handler,
}

impl Subscription {
    fn wants(&self, event: &AppEvent) -> bool {
        self.categories.is_empty() || self.categories.contains(&event.category())
    }
}

pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
    subscriptions: RwLock<Vec<Subscription>>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            sender,
            subscriptions: RwLock::new(Vec::new()),
        }
    }

    /// Delivers `event` to matching handlers and to every receiver.
    ///
    /// Returns how many handlers and receivers got it. Zero is normal
    /// when nobody is listening.
    pub fn publish(&self, event: AppEvent) -> usize {
        let handlers: Vec<Handler> = self
            .subscriptions
            .read()
            .iter()
            .filter(|s| s.wants(&event))
            .map(|s| Arc::clone(&s.handler))
            .collect();
        tracing::trace!(
            "publishing {} to {} handler(s)",
            event.description(),
            handlers.len()
        );
        for handler in &handlers {
            handler(&event);
        }
        handlers.len() + self.sender.send(event).unwrap_or(0)
    }

    /// Registers a handler for the given categories; an empty slice
    /// subscribes to everything.
    pub fn subscribe<F>(&self, categories: &[EventCategory], handler: F) -> SubscriptionId
    where
        F: Fn(&AppEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        self.subscriptions.write().push(Subscription {
            id,
            categories: categories.to_vec(),
            handler: Arc::new(handler),
        });
        tracing::debug!("{} subscribed to {:?}", id, categories);
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.write();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        before != subscriptions.len()
    }

    pub fn receiver(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.read().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("receivers", &self.sender.receiver_count())
            .finish()
    }
}

/// The process-wide bus shared by the designer, the refresh loop and the
/// print pipeline.
pub fn event_bus() -> &'static EventBus {
    static EVENT_BUS: OnceLock<EventBus> = OnceLock::new();
    EVENT_BUS.get_or_init(EventBus::new)
}
