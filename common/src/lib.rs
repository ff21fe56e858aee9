//! General functionality for the `sensor-state` workspace: readings, permission
//! identifiers, request types and the capability ports implemented by the
//! platform (or by a simulation) that feed the sensor pipelines.

pub mod constants;

#[doc(hidden)]
pub mod traits;
#[doc(hidden)]
pub mod types;

// Re-export traits
#[doc(inline)]
pub use traits::{DeliveryContext, LocationPort, Notifiable, PermissionPort, SensorPort};

// Re-export types
#[doc(inline)]
pub use types::{
    ListenerState, LocationReading, LocationRequest, MotionReading, Permission, PermissionState,
    Priority, SamplingHint,
};
