/// Location update interval requested when nothing else is configured.
pub const DEFAULT_LOCATION_INTERVAL_MILLIS: u64 = 1500;

// Accelerometer delivery periods, matching the platform delay classes.
pub const SENSOR_DELAY_FASTEST_MILLIS: u64 = 0;
pub const SENSOR_DELAY_GAME_MILLIS: u64 = 20;
pub const SENSOR_DELAY_UI_MILLIS: u64 = 66;
pub const SENSOR_DELAY_NORMAL_MILLIS: u64 = 200;

pub const N_AXES: usize = 3;
