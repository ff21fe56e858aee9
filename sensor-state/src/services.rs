use log::{error, info, warn};
use std::sync::Arc;
use tokio::sync::Notify;

use common::traits::{DeliveryContext, LocationPort, PermissionPort, SensorPort};
use common::types::{ListenerState, LocationReading, MotionReading, PermissionState};
use publisher::ObservableState;

use crate::adapters::mock::{
    current_runtime, SimulatedLocation, SimulatedPermissions, SimulatedSensors,
};
use crate::adapters::{AccelerometerListener, LocationListener, PermissionGate};
use crate::context::MainLoop;
use crate::models::config::{SensorStateConfig, SimulationConfig};
use crate::models::errors::SensorStateError;
use crate::models::shutdown;

/// Owns both sensor pipelines and the permission gate.
///
/// This is the piece an app shell talks to: screens subscribe to
/// [`motion_state`](Self::motion_state) / [`gps_state`](Self::gps_state) and
/// drive the lifecycle calls below.
pub struct SensorStateService<S, L, P> {
    motion_state: ObservableState<MotionReading>,
    gps_state: ObservableState<LocationReading>,
    accelerometer: AccelerometerListener<S>,
    location: Arc<LocationListener<L, P>>,
    gate: Arc<PermissionGate<P>>,
}

impl<S, L, P> SensorStateService<S, L, P>
where
    S: SensorPort,
    L: LocationPort + 'static,
    P: PermissionPort + 'static,
{
    /// Wires the pipelines. Returns a Config error if `config` is invalid.
    pub fn new(
        sensors: Arc<S>,
        locations: Arc<L>,
        permissions: Arc<P>,
        context: Arc<dyn DeliveryContext>,
        config: &SensorStateConfig,
    ) -> Result<Self, SensorStateError> {
        config.validate()?;

        let motion_state = ObservableState::new();
        let gps_state = ObservableState::new();
        let gate = Arc::new(PermissionGate::new(
            permissions,
            config.location_permission,
        ));
        let accelerometer = AccelerometerListener::new(
            sensors,
            motion_state.clone(),
            context.clone(),
            config.sampling_hint,
        );
        let location = Arc::new(LocationListener::new(
            locations,
            gate.clone(),
            gps_state.clone(),
            context,
            config.location_request(),
        ));

        Ok(Self {
            motion_state,
            gps_state,
            accelerometer,
            location,
            gate,
        })
    }

    pub fn motion_state(&self) -> &ObservableState<MotionReading> {
        &self.motion_state
    }

    pub fn gps_state(&self) -> &ObservableState<LocationReading> {
        &self.gps_state
    }

    /// Observable permission state, for showing a notice on denial.
    pub fn permission_state(&self) -> &ObservableState<PermissionState> {
        self.gate.state()
    }

    /// Motion screen became visible.
    pub fn resume_motion_tracking(&self) -> ListenerState {
        self.accelerometer.start()
    }

    /// Motion screen was hidden.
    pub fn pause_motion_tracking(&self) {
        self.accelerometer.stop()
    }

    /// Checks (or asks for) the location permission and starts location
    /// updates once it is granted. Returns the permission state after the call.
    pub fn start_gps_tracking(&self) -> PermissionState {
        let location = self.location.clone();
        self.gate.ensure_permission(move || {
            if let Err(e) = location.start() {
                warn!("Could not start location updates: {}", e);
            }
        })
    }

    pub fn stop_gps_tracking(&self) {
        self.location.stop()
    }

    pub fn motion_listener_state(&self) -> ListenerState {
        self.accelerometer.listener_state()
    }

    pub fn gps_listener_state(&self) -> ListenerState {
        self.location.listener_state()
    }

    /// Stops both pipelines.
    pub fn shutdown(&self) {
        self.pause_motion_tracking();
        self.stop_gps_tracking();
    }
}

pub type MockSensorStateService =
    SensorStateService<SimulatedSensors, SimulatedLocation, SimulatedPermissions>;

/// Starts a sensor state service backed by simulated providers.
///
/// A main loop is spawned as delivery context; every state write and observer
/// notification runs on it. The service stops after `run_for_millis`, or on
/// Ctrl+C when `None`. Tracking is not started: call
/// [`SensorStateService::resume_motion_tracking`] and
/// [`SensorStateService::start_gps_tracking`] as screens open.
///
/// Must be called from within a tokio runtime; a Runtime error is returned otherwise.
///
/// # Returns
///
/// Returns a tuple containing:
/// * A `tokio::task::JoinHandle<()>` finishing once the service and its main loop stopped.
/// * An `Arc<MockSensorStateService>` instance, allowing further interaction with the pipelines.
pub fn run_mock_service(
    config: SensorStateConfig,
    simulation: SimulationConfig,
    run_for_millis: Option<u64>,
) -> Result<(tokio::task::JoinHandle<()>, Arc<MockSensorStateService>), SensorStateError> {
    config.validate()?;
    simulation.validate()?;
    current_runtime()?;

    let (main_loop, loop_handle) = MainLoop::spawn();
    let service = match build_mock_service(&config, &simulation, main_loop.clone()) {
        Ok(service) => Arc::new(service),
        Err(e) => {
            main_loop.shutdown();
            return Err(e);
        }
    };

    let abort_signal = Arc::new(Notify::new());
    shutdown::listen_for_shutdown(abort_signal.clone(), run_for_millis);

    let handle = tokio::spawn({
        let service = service.clone();
        async move {
            abort_signal.notified().await;
            info!("Stopping sensor state service");
            service.shutdown();
            main_loop.shutdown();
            if let Err(e) = loop_handle.await {
                error!("Error in main loop: {:?}", e);
            }
        }
    });
    Ok((handle, service))
}

fn build_mock_service(
    config: &SensorStateConfig,
    simulation: &SimulationConfig,
    main_loop: Arc<MainLoop>,
) -> Result<MockSensorStateService, SensorStateError> {
    let context: Arc<dyn DeliveryContext> = main_loop;
    let sensors = Arc::new(SimulatedSensors::new(
        simulation.accelerometer_available,
        simulation.sensor_noise_stdev,
    )?);
    let locations = Arc::new(SimulatedLocation::new(simulation)?);
    let permissions = Arc::new(SimulatedPermissions::new(simulation, context.clone())?);
    SensorStateService::new(sensors, locations, permissions, context, config)
}
