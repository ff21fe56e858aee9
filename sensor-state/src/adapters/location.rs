// Bridges location provider results to the GPS state, behind the permission gate.

use log::{debug, info};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use common::traits::{DeliveryContext, LocationPort, PermissionPort};
use common::types::{ListenerState, LocationReading, LocationRequest, LocationSink};
use publisher::ObservableState;

use crate::adapters::permission::PermissionGate;
use crate::helpers::lock;
use crate::models::errors::SensorStateError;

/// Writes every location fix into a `LocationReading` state.
///
/// Results are delivered by the provider on the delivery context handed over at
/// registration. Results without a fix are ignored and the previous reading is
/// kept.
pub struct LocationListener<L, P> {
    port: Arc<L>,
    gate: Arc<PermissionGate<P>>,
    state: ObservableState<LocationReading>,
    context: Arc<dyn DeliveryContext>,
    request: LocationRequest,
    subscription: Mutex<Option<Uuid>>,
}

impl<L, P> LocationListener<L, P>
where
    L: LocationPort,
    P: PermissionPort,
{
    pub fn new(
        port: Arc<L>,
        gate: Arc<PermissionGate<P>>,
        state: ObservableState<LocationReading>,
        context: Arc<dyn DeliveryContext>,
        request: LocationRequest,
    ) -> Self {
        Self {
            port,
            gate,
            state,
            context,
            request,
            subscription: Mutex::new(None),
        }
    }

    /// Requests location updates. Does nothing when already running.
    ///
    /// Returns `PermissionNotGranted` without touching the provider when the
    /// permission is not granted at the time of the call. The provider is called
    /// without holding the subscription lock, so it may deliver a last known fix
    /// before returning.
    pub fn start(&self) -> Result<ListenerState, SensorStateError> {
        if !self.gate.is_granted() {
            return Err(SensorStateError::PermissionNotGranted(
                self.gate.permission().manifest_name().to_string(),
            ));
        }

        if self.listener_state().is_running() {
            debug!("Location updates already running");
            return Ok(ListenerState::Running);
        }

        let id = self
            .port
            .request_location_updates(self.request, self.sink(), self.context.clone());

        let mut subscription = lock(&self.subscription);
        if subscription.is_some() {
            drop(subscription);
            debug!("Location updates started concurrently, dropping {}", id);
            self.port.remove_updates(id);
            return Ok(ListenerState::Running);
        }
        *subscription = Some(id);
        info!(
            "Location updates started (every {:?}, {:?})",
            self.request.interval, self.request.priority
        );
        Ok(ListenerState::Running)
    }

    /// Removes location updates. Results already dispatched may still land.
    pub fn stop(&self) {
        let subscription = lock(&self.subscription).take();
        if let Some(id) = subscription {
            self.port.remove_updates(id);
            info!("Location updates stopped");
        }
    }

    pub fn listener_state(&self) -> ListenerState {
        match *lock(&self.subscription) {
            Some(_) => ListenerState::Running,
            None => ListenerState::Stopped,
        }
    }

    pub fn state(&self) -> &ObservableState<LocationReading> {
        &self.state
    }

    pub fn request(&self) -> LocationRequest {
        self.request
    }

    fn sink(&self) -> LocationSink {
        let state = self.state.clone();
        Arc::new(move |result: Option<LocationReading>| match result {
            Some(fix) => state.set(fix),
            None => debug!("Location result without a fix, keeping previous reading"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::InlineContext;
    use common::types::{Permission, Priority};
    use std::sync::{mpsc, Weak};
    use std::thread;
    use std::time::Duration;
    use test_utils::{MockLocationPort, MockPermissionPort};

    /// Provider that hands out its last known fix before `request` returns.
    struct EagerLocationPort {
        inner: MockLocationPort,
        last_known: LocationReading,
    }

    impl LocationPort for EagerLocationPort {
        fn request_location_updates(
            &self,
            request: LocationRequest,
            sink: LocationSink,
            context: Arc<dyn DeliveryContext>,
        ) -> Uuid {
            let id = self
                .inner
                .request_location_updates(request, sink.clone(), context.clone());
            let last_known = self.last_known;
            context.dispatch(Box::new(move || sink(Some(last_known))));
            id
        }

        fn remove_updates(&self, subscription: Uuid) {
            self.inner.remove_updates(subscription)
        }
    }

    struct Fixture {
        locations: Arc<MockLocationPort>,
        permissions: Arc<MockPermissionPort>,
        listener: LocationListener<MockLocationPort, MockPermissionPort>,
    }

    fn fixture(granted: bool) -> Fixture {
        let locations = Arc::new(MockLocationPort::new());
        let permissions = Arc::new(MockPermissionPort::new(granted));
        let gate = Arc::new(PermissionGate::new(
            permissions.clone(),
            Permission::FineLocation,
        ));
        let listener = LocationListener::new(
            locations.clone(),
            gate,
            ObservableState::new(),
            Arc::new(InlineContext),
            LocationRequest::default(),
        );
        Fixture {
            locations,
            permissions,
            listener,
        }
    }

    #[test]
    fn test_start_requires_permission() {
        let fixture = fixture(false);

        let result = fixture.listener.start();

        assert!(matches!(
            result,
            Err(SensorStateError::PermissionNotGranted(_))
        ));
        assert_eq!(fixture.locations.request_calls(), 0);
        assert_eq!(fixture.listener.listener_state(), ListenerState::Stopped);
    }

    #[test]
    fn test_start_uses_default_request() {
        let fixture = fixture(true);

        assert_eq!(fixture.listener.start(), Ok(ListenerState::Running));

        let request = fixture.locations.last_request().unwrap();
        assert_eq!(request.interval, Duration::from_millis(1500));
        assert_eq!(request.priority, Priority::HighAccuracy);
        fixture.listener.stop();
    }

    #[test]
    fn test_fix_updates_state() {
        let fixture = fixture(true);
        fixture.listener.start().unwrap();

        fixture
            .locations
            .deliver(Some(LocationReading::new(10.0, 20.0, 5.0)));

        assert_eq!(
            fixture.listener.state().get(),
            LocationReading::new(10.0, 20.0, 5.0)
        );
        fixture.listener.stop();
    }

    #[test]
    fn test_missing_fix_keeps_previous_reading() {
        let fixture = fixture(true);
        fixture.listener.start().unwrap();
        fixture
            .locations
            .deliver(Some(LocationReading::new(10.0, 20.0, 5.0)));

        fixture.locations.deliver(None);

        assert_eq!(
            fixture.listener.state().get(),
            LocationReading::new(10.0, 20.0, 5.0)
        );
        fixture.listener.stop();
    }

    #[test]
    fn test_start_stop_idempotent() {
        let fixture = fixture(true);

        fixture.listener.stop();
        fixture.listener.start().unwrap();
        fixture.listener.start().unwrap();
        assert_eq!(fixture.locations.request_calls(), 1);
        assert_eq!(fixture.locations.active_subscriptions(), 1);

        fixture.listener.stop();
        fixture.listener.stop();
        assert_eq!(fixture.locations.active_subscriptions(), 0);
        assert_eq!(fixture.listener.listener_state(), ListenerState::Stopped);
    }

    #[test]
    fn test_permission_revoked_before_start() {
        let fixture = fixture(true);
        fixture.permissions.set_granted(false);

        assert!(fixture.listener.start().is_err());
        assert_eq!(fixture.locations.active_subscriptions(), 0);
    }

    #[test]
    fn test_fix_delivered_during_request() {
        let locations = Arc::new(EagerLocationPort {
            inner: MockLocationPort::new(),
            last_known: LocationReading::new(48.85, 2.35, 12.5),
        });
        let gate = Arc::new(PermissionGate::new(
            Arc::new(MockPermissionPort::new(true)),
            Permission::FineLocation,
        ));
        let listener = Arc::new(LocationListener::new(
            locations.clone(),
            gate,
            ObservableState::new(),
            Arc::new(InlineContext),
            LocationRequest::default(),
        ));
        let seen = Arc::new(Mutex::new(Vec::new()));
        listener.state().subscribe({
            let listener: Weak<LocationListener<EagerLocationPort, MockPermissionPort>> =
                Arc::downgrade(&listener);
            let seen = seen.clone();
            move |_| {
                if let Some(listener) = listener.upgrade() {
                    seen.lock().unwrap().push(listener.listener_state());
                }
            }
        });

        let (done_tx, done_rx) = mpsc::channel();
        thread::spawn({
            let listener = listener.clone();
            move || {
                let _ = done_tx.send(listener.start());
            }
        });
        let result = done_rx
            .recv_timeout(Duration::from_secs(3))
            .expect("start never returned");

        assert_eq!(result, Ok(ListenerState::Running));
        assert_eq!(seen.lock().unwrap().len(), 1);
        assert_eq!(
            listener.state().get(),
            LocationReading::new(48.85, 2.35, 12.5)
        );
        assert!(listener.listener_state().is_running());

        listener.stop();
        assert_eq!(locations.inner.active_subscriptions(), 0);
    }
}
