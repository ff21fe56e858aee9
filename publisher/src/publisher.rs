use dashmap::DashMap;
use std::sync::{Arc, Weak};
use uuid::Uuid;

use common::traits::Notifiable;
use common::types::Callback;

use crate::PublisherError;

type Listeners = DashMap<Uuid, Callback>;

pub trait Publishable {
    fn register_listener(&self, listener: &mut dyn Notifiable) -> Uuid;
    fn unregister_listener(&self, listener_id: Uuid) -> Result<(), PublisherError>;
    fn unregister_all(&self);
    fn notify_listeners(&self);
}

/// Record of registered listeners that will be notified of changes.
#[derive(Clone, Default)]
pub struct Publisher {
    listeners: Arc<Listeners>,
}

impl Publisher {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(DashMap::new()),
        }
    }

    /// Registers `listener` and returns a handle that can remove it later.
    pub fn subscribe(&self, listener: &mut dyn Notifiable) -> Subscription {
        let id = self.register_listener(listener);
        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    // Returns true if no listeners registered
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    // Returns number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl Publishable for Publisher {
    fn register_listener(&self, listener: &mut dyn Notifiable) -> Uuid {
        let callback = listener.get_callback();
        let listener_id = Uuid::new_v4();
        listener.set_id(listener_id);
        self.listeners.insert(listener_id, callback);
        listener_id
    }

    fn unregister_all(&self) {
        self.listeners.clear();
    }

    /// Returns PublisherError::ListenerNotFound if no registered listener matches `listener_id`
    fn unregister_listener(&self, listener_id: Uuid) -> Result<(), PublisherError> {
        self.listeners
            .remove(&listener_id)
            .map(|_| ())
            .ok_or_else(|| {
                PublisherError::ListenerNotFound(format!(
                    "Listener with id {} not found",
                    listener_id
                ))
            })
    }

    /// Calls every registered listener once, on the caller's thread.
    ///
    /// Listeners run over a snapshot taken before the first call, so they may
    /// register or unregister listeners themselves. A listener removed during
    /// the pass is skipped.
    fn notify_listeners(&self) {
        let listeners: Vec<(Uuid, Callback)> = self
            .listeners
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        for (id, callback) in listeners {
            if self.listeners.contains_key(&id) {
                callback(id);
            }
        }
    }
}

/// Handle returned when subscribing. Dropping it keeps the subscription alive.
#[derive(Clone, Debug)]
pub struct Subscription {
    id: Uuid,
    listeners: Weak<Listeners>,
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Removes the listener. Calling it again, or after the publisher is gone, does nothing.
    pub fn unsubscribe(&self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.remove(&self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.listeners
            .upgrade()
            .is_some_and(|listeners| listeners.contains_key(&self.id))
    }
}
