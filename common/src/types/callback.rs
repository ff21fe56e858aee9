use std::sync::Arc;
use uuid::Uuid;

use crate::types::readings::LocationReading;

/// Change signal delivered to observers, carrying the subscription id.
pub type Callback = Arc<dyn Fn(Uuid) + Send + Sync>;

/// Receives raw accelerometer samples.
pub type AccelerometerSink = Arc<dyn Fn(f32, f32, f32) + Send + Sync>;

/// Receives location results; `None` when no fix is available.
pub type LocationSink = Arc<dyn Fn(Option<LocationReading>) + Send + Sync>;

/// Outcome of a permission prompt.
pub type PermissionCallback = Box<dyn FnOnce(bool) + Send>;

/// Unit of work run on a delivery context.
pub type Task = Box<dyn FnOnce() + Send>;
