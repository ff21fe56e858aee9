pub mod callback;
pub mod listener_state;
pub mod permission;
pub mod readings;
pub mod request;

pub use callback::*;
pub use listener_state::ListenerState;
pub use permission::{Permission, PermissionState};
pub use readings::{LocationReading, MotionReading};
pub use request::{LocationRequest, Priority, SamplingHint};
