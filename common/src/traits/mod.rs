pub mod ports;
pub mod publisher;

pub use crate::traits::ports::{DeliveryContext, LocationPort, PermissionPort, SensorPort};
pub use crate::traits::publisher::Notifiable;
