pub mod accelerometer;
pub mod location;
pub mod mock;
pub mod permission;

pub use accelerometer::AccelerometerListener;
pub use location::LocationListener;
pub use permission::PermissionGate;
