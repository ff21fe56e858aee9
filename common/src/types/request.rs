use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{
    DEFAULT_LOCATION_INTERVAL_MILLIS, SENSOR_DELAY_FASTEST_MILLIS, SENSOR_DELAY_GAME_MILLIS,
    SENSOR_DELAY_NORMAL_MILLIS, SENSOR_DELAY_UI_MILLIS,
};

/// Desired accelerometer delivery rate. Providers treat it as a hint and may
/// deliver faster, slower, or coalesce samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingHint {
    Fastest,
    Game,
    Ui,
    #[default]
    Normal,
    Custom(u64),
}

impl SamplingHint {
    pub fn period(&self) -> Duration {
        let millis = match self {
            SamplingHint::Fastest => SENSOR_DELAY_FASTEST_MILLIS,
            SamplingHint::Game => SENSOR_DELAY_GAME_MILLIS,
            SamplingHint::Ui => SENSOR_DELAY_UI_MILLIS,
            SamplingHint::Normal => SENSOR_DELAY_NORMAL_MILLIS,
            SamplingHint::Custom(millis) => *millis,
        };
        Duration::from_millis(millis)
    }
}

/// Accuracy/power trade-off asked of the location provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    HighAccuracy,
    Balanced,
    LowPower,
    Passive,
}

/// Parameters of a location update subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocationRequest {
    pub interval: Duration,
    pub priority: Priority,
}

impl LocationRequest {
    pub fn new(interval: Duration, priority: Priority) -> Self {
        Self { interval, priority }
    }
}

impl Default for LocationRequest {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_LOCATION_INTERVAL_MILLIS),
            Priority::HighAccuracy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_location_request() {
        let request = LocationRequest::default();
        assert_eq!(request.interval, Duration::from_millis(1500));
        assert_eq!(request.priority, Priority::HighAccuracy);
    }

    #[test]
    fn test_sampling_hint_periods() {
        assert_eq!(SamplingHint::default(), SamplingHint::Normal);
        assert_eq!(SamplingHint::Normal.period(), Duration::from_millis(200));
        assert_eq!(SamplingHint::Game.period(), Duration::from_millis(20));
        assert_eq!(SamplingHint::Fastest.period(), Duration::ZERO);
        assert_eq!(SamplingHint::Custom(50).period(), Duration::from_millis(50));
    }

    #[test]
    fn test_sampling_hint_from_json() {
        let hint: SamplingHint = serde_json::from_str("\"ui\"").unwrap();
        assert_eq!(hint, SamplingHint::Ui);
        let hint: SamplingHint = serde_json::from_str(r#"{"custom": 10}"#).unwrap();
        assert_eq!(hint, SamplingHint::Custom(10));
    }
}
