use std::sync::Arc;
use uuid::Uuid;

use common::traits::Notifiable;
use common::types::Callback;

/// Observer wrapper that can be registered with a [`crate::Publisher`].
///
/// The callback receives only the subscription id; observers read the current
/// value from the state they are subscribed to.
#[derive(Clone)]
pub struct Listener {
    callback: Callback,
    id: Option<Uuid>,
}

impl Listener {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(Uuid) + Send + Sync + 'static,
    {
        Listener {
            callback: Arc::new(callback),
            id: None,
        }
    }

    /// Id assigned by the last publisher this listener was registered with.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }
}

impl Notifiable for Listener {
    fn get_callback(&self) -> Callback {
        self.callback.clone()
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }
}
