//! Capabilities consumed by the sensor pipelines.
//!
//! Implementations wrap whatever the platform offers (sensor service, fused
//! location client, runtime permission prompt). The workspace ships simulated
//! implementations in `sensor_state_rs` and hand-driven mocks in `test_utils`.

use std::sync::Arc;
use uuid::Uuid;

use crate::types::{
    AccelerometerSink, LocationRequest, LocationSink, Permission, PermissionCallback,
    SamplingHint, Task,
};

/// Execution context callbacks are marshalled onto before they touch state.
///
/// Tasks dispatched to one context run one at a time, in dispatch order.
pub trait DeliveryContext: Send + Sync {
    fn dispatch(&self, task: Task);
}

/// Access to the device accelerometer.
pub trait SensorPort: Send + Sync {
    /// Starts delivering `(x, y, z)` samples to `sink` at roughly the hinted rate.
    /// Returns `None` when the device has no accelerometer.
    fn register_accelerometer_listener(
        &self,
        sink: AccelerometerSink,
        sampling_hint: SamplingHint,
    ) -> Option<Uuid>;

    /// Stops deliveries for `subscription`. Unknown ids are ignored.
    fn unregister(&self, subscription: Uuid);
}

/// Access to the location provider.
pub trait LocationPort: Send + Sync {
    /// Starts delivering location results to `sink`, each one dispatched on `context`.
    /// A delivery carries `None` when the provider has no fix.
    fn request_location_updates(
        &self,
        request: LocationRequest,
        sink: LocationSink,
        context: Arc<dyn DeliveryContext>,
    ) -> Uuid;

    /// Stops deliveries for `subscription`. Unknown ids are ignored.
    fn remove_updates(&self, subscription: Uuid);
}

/// Runtime permission checks and prompts.
pub trait PermissionPort: Send + Sync {
    /// Synchronous check, never prompts.
    fn is_granted(&self, permission: Permission) -> bool;

    /// Prompts the user. `on_result` is expected to be called once with the outcome.
    fn request_permission(&self, permission: Permission, on_result: PermissionCallback);
}
