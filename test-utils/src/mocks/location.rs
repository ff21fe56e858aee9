use dashmap::DashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use common::traits::{DeliveryContext, LocationPort};
use common::types::{LocationReading, LocationRequest, LocationSink};

type Registration = (LocationSink, Arc<dyn DeliveryContext>);

/// Location provider driven by the test through [`MockLocationPort::deliver`].
#[derive(Default)]
pub struct MockLocationPort {
    subscriptions: DashMap<Uuid, Registration>,
    requests: Mutex<Vec<LocationRequest>>,
}

impl MockLocationPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatches `result` to every active subscription on its delivery context.
    pub fn deliver(&self, result: Option<LocationReading>) {
        let registrations: Vec<Registration> = self
            .subscriptions
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        for (sink, context) in registrations {
            context.dispatch(Box::new(move || sink(result)));
        }
    }

    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn request_calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<LocationRequest> {
        self.requests.lock().unwrap().last().copied()
    }
}

impl LocationPort for MockLocationPort {
    fn request_location_updates(
        &self,
        request: LocationRequest,
        sink: LocationSink,
        context: Arc<dyn DeliveryContext>,
    ) -> Uuid {
        self.requests.lock().unwrap().push(request);
        let id = Uuid::new_v4();
        self.subscriptions.insert(id, (sink, context));
        id
    }

    fn remove_updates(&self, subscription: Uuid) {
        self.subscriptions.remove(&subscription);
    }
}
