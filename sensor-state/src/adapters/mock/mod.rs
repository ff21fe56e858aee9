//! Simulated providers standing in for device hardware and the permission prompt.
//!
//! Each subscription runs on its own tokio task spawned on the runtime that was
//! current when the provider was built.

mod gaussian;
mod location;
mod permission;
mod sensors;

pub use location::SimulatedLocation;
pub use permission::SimulatedPermissions;
pub use sensors::SimulatedSensors;

use tokio::runtime::Handle;

use crate::models::errors::SensorStateError;

pub(crate) fn current_runtime() -> Result<Handle, SensorStateError> {
    Handle::try_current().map_err(|e| SensorStateError::Runtime(e.to_string()))
}
