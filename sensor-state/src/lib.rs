//! # Crate sensor_state_rs
//!
//! ## sensor_state_rs
//!
//! The `sensor_state_rs` crate keeps two pieces of observable state in sync with device sensors:
//! a motion reading fed by the accelerometer and a GPS reading fed by a location provider. Screens
//! subscribe to the state and re-read it whenever they are notified.
//!
//! Features include:
//! - Accelerometer listener computing the movement strength (euclidean norm of the 3 axes) of every sample.
//! - Location listener writing each fix, and keeping the previous one when a result carries no fix.
//! - Runtime permission gate: location updates only start once the permission is granted.
//! - Delivery contexts: provider callbacks are marshalled onto a single consumer (inline or a main loop)
//!   before they touch the state.
//! - Simulated providers to run the whole pipeline without hardware.
//!
//! **NOTE** Device capabilities are reached through the traits in the `common` crate. Only simulated
//! providers are shipped.

pub mod adapters;
pub mod context;
mod helpers;
pub mod models;
pub mod services;

pub use adapters::mock::{SimulatedLocation, SimulatedPermissions, SimulatedSensors};
pub use adapters::{AccelerometerListener, LocationListener, PermissionGate};
pub use context::{InlineContext, MainLoop};
pub use models::config::{SensorStateConfig, SimulationConfig};
pub use models::errors::SensorStateError;
pub use services::{run_mock_service, MockSensorStateService, SensorStateService};
