pub mod location;
pub mod motion;

pub use location::LocationReading;
pub use motion::MotionReading;
