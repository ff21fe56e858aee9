use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use common::constants::DEFAULT_LOCATION_INTERVAL_MILLIS;
use common::types::{LocationRequest, Permission, Priority, SamplingHint};

use crate::models::errors::SensorStateError;

/// Settings of the two sensor pipelines. Every field has a default, so a JSON
/// document only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorStateConfig {
    /// Delivery rate hint handed to the accelerometer provider.
    pub sampling_hint: SamplingHint,
    /// Target interval between location updates.
    pub location_interval_millis: u64,
    pub location_priority: Priority,
    /// Permission that unlocks location updates.
    pub location_permission: Permission,
}

impl Default for SensorStateConfig {
    fn default() -> Self {
        Self {
            sampling_hint: SamplingHint::Normal,
            location_interval_millis: DEFAULT_LOCATION_INTERVAL_MILLIS,
            location_priority: Priority::HighAccuracy,
            location_permission: Permission::FineLocation,
        }
    }
}

impl SensorStateConfig {
    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self, SensorStateError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SensorStateError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SensorStateError> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            SensorStateError::Config(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), SensorStateError> {
        if self.location_interval_millis == 0 {
            return Err(SensorStateError::Config(
                "location_interval_millis must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn location_request(&self) -> LocationRequest {
        LocationRequest::new(
            Duration::from_millis(self.location_interval_millis),
            self.location_priority,
        )
    }
}

/// Behaviour of the simulated providers used by the mock service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// When false the simulated device reports no accelerometer.
    pub accelerometer_available: bool,
    /// Standard deviation of the noise added to each axis, in m/s^2.
    pub sensor_noise_stdev: f64,
    pub base_latitude: f64,
    pub base_longitude: f64,
    /// Standard deviation of each random-walk step, in degrees.
    pub walk_stdev_degrees: f64,
    /// Chance that a location delivery carries no fix.
    pub no_fix_probability: f64,
    /// Whether the permission counts as granted in a previous session.
    pub permission_already_granted: bool,
    /// Answer given by the simulated user when prompted.
    pub grant_on_prompt: bool,
    pub prompt_delay_millis: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            accelerometer_available: true,
            sensor_noise_stdev: 0.05,
            base_latitude: 51.5072,
            base_longitude: -0.1276,
            walk_stdev_degrees: 0.00005,
            no_fix_probability: 0.1,
            permission_already_granted: false,
            grant_on_prompt: true,
            prompt_delay_millis: 500,
        }
    }
}

impl SimulationConfig {
    pub fn from_json(json: &str) -> Result<Self, SensorStateError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SensorStateError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SensorStateError> {
        if !(0.0..=1.0).contains(&self.no_fix_probability) {
            return Err(SensorStateError::Config(format!(
                "no_fix_probability must be within [0, 1], got {}",
                self.no_fix_probability
            )));
        }
        if self.sensor_noise_stdev < 0.0 || self.walk_stdev_degrees < 0.0 {
            return Err(SensorStateError::Config(
                "standard deviations must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
