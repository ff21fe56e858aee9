mod location;
mod permission;
mod sensor;

pub use location::MockLocationPort;
pub use permission::MockPermissionPort;
pub use sensor::MockSensorPort;
