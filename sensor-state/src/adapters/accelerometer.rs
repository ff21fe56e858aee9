// Bridges raw accelerometer callbacks to the motion state.

use log::{debug, info, warn};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use common::traits::{DeliveryContext, SensorPort};
use common::types::{AccelerometerSink, ListenerState, MotionReading, SamplingHint};
use publisher::ObservableState;

use crate::helpers::lock;

#[derive(Default)]
struct Registration {
    state: ListenerState,
    subscription: Option<Uuid>,
}

/// Writes every accelerometer sample into a `MotionReading` state.
///
/// Samples are marshalled onto the delivery context before the write, so the
/// state is only ever written from that context. `start`/`stop` are meant to
/// follow the visibility of whatever displays the readings.
pub struct AccelerometerListener<S> {
    port: Arc<S>,
    state: ObservableState<MotionReading>,
    context: Arc<dyn DeliveryContext>,
    sampling_hint: SamplingHint,
    registration: Mutex<Registration>,
}

impl<S> AccelerometerListener<S>
where
    S: SensorPort,
{
    pub fn new(
        port: Arc<S>,
        state: ObservableState<MotionReading>,
        context: Arc<dyn DeliveryContext>,
        sampling_hint: SamplingHint,
    ) -> Self {
        Self {
            port,
            state,
            context,
            sampling_hint,
            registration: Mutex::new(Registration::default()),
        }
    }

    /// Registers with the provider. Does nothing when already running, and
    /// becomes a permanent no-op once the provider reported no accelerometer.
    ///
    /// The provider is called without holding the registration lock, so it may
    /// deliver a first sample before returning.
    pub fn start(&self) -> ListenerState {
        {
            let registration = lock(&self.registration);
            if registration.state != ListenerState::Stopped {
                return registration.state;
            }
        }

        let subscription = self
            .port
            .register_accelerometer_listener(self.sink(), self.sampling_hint);

        let mut registration = lock(&self.registration);
        match subscription {
            Some(id) if registration.state.is_running() => {
                drop(registration);
                debug!("Accelerometer listener started concurrently, dropping {}", id);
                self.port.unregister(id);
                ListenerState::Running
            }
            Some(id) => {
                info!(
                    "Accelerometer listener started ({:?} sampling)",
                    self.sampling_hint
                );
                registration.subscription = Some(id);
                registration.state = ListenerState::Running;
                registration.state
            }
            None if registration.state.is_running() => ListenerState::Running,
            None => {
                warn!("No accelerometer available, motion state will not update");
                registration.state = ListenerState::Unavailable;
                registration.state
            }
        }
    }

    /// Unregisters from the provider. Samples already dispatched may still land.
    pub fn stop(&self) {
        let subscription = {
            let mut registration = lock(&self.registration);
            let subscription = registration.subscription.take();
            if subscription.is_some() {
                registration.state = ListenerState::Stopped;
            }
            subscription
        };
        match subscription {
            Some(id) => {
                self.port.unregister(id);
                info!("Accelerometer listener stopped");
            }
            None => debug!("Accelerometer listener not running, nothing to stop"),
        }
    }

    pub fn listener_state(&self) -> ListenerState {
        lock(&self.registration).state
    }

    pub fn state(&self) -> &ObservableState<MotionReading> {
        &self.state
    }

    fn sink(&self) -> AccelerometerSink {
        let state = self.state.clone();
        let context = self.context.clone();
        Arc::new(move |x: f32, y: f32, z: f32| {
            let state = state.clone();
            context.dispatch(Box::new(move || {
                state.set(MotionReading::from_axes(x, y, z));
            }));
        })
    }
}
