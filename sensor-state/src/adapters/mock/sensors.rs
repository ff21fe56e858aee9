use dashmap::DashMap;
use log::debug;
use rand::{rngs::StdRng, SeedableRng};
use std::f64::consts::TAU;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use common::traits::SensorPort;
use common::types::{AccelerometerSink, SamplingHint};

use super::current_runtime;
use super::gaussian::GaussianNoise;
use crate::models::errors::SensorStateError;

const GRAVITY: f64 = 9.80665;
const GAUSSIAN_SENSOR_MEAN: f64 = 0f64;
const WOBBLE_AMPLITUDE: f64 = 0.3;
const WOBBLE_FREQUENCY_HZ: f64 = 0.5;
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Accelerometer of a phone lying on a table with a slight wobble.
pub struct SimulatedSensors {
    runtime: Handle,
    available: bool,
    noise: GaussianNoise,
    tasks: DashMap<Uuid, JoinHandle<()>>,
}

impl SimulatedSensors {
    /// Returns a Runtime error when called outside of a tokio runtime.
    pub fn new(available: bool, noise_stdev: f64) -> Result<Self, SensorStateError> {
        Ok(Self {
            runtime: current_runtime()?,
            available,
            noise: GaussianNoise::new(GAUSSIAN_SENSOR_MEAN, noise_stdev)?,
            tasks: DashMap::new(),
        })
    }

    pub fn active_subscriptions(&self) -> usize {
        self.tasks.len()
    }
}

fn wobble(elapsed_secs: f64) -> [f64; 3] {
    let angle = TAU * WOBBLE_FREQUENCY_HZ * elapsed_secs;
    [
        WOBBLE_AMPLITUDE * angle.sin(),
        WOBBLE_AMPLITUDE * angle.cos(),
        GRAVITY,
    ]
}

impl SensorPort for SimulatedSensors {
    fn register_accelerometer_listener(
        &self,
        sink: AccelerometerSink,
        sampling_hint: SamplingHint,
    ) -> Option<Uuid> {
        if !self.available {
            return None;
        }

        let period = sampling_hint.period().max(MIN_PERIOD);
        let noise = self.noise.clone();
        let handle = self.runtime.spawn(async move {
            let mut rng = StdRng::from_entropy();
            let mut ticker = tokio::time::interval(period);
            // Late ticks are dropped, as a loaded sensor service would.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut elapsed_secs = 0f64;
            loop {
                ticker.tick().await;
                elapsed_secs += period.as_secs_f64();
                let [x, y, z] = wobble(elapsed_secs).map(|axis| noise.add_noise(&mut rng, axis));
                sink(x as f32, y as f32, z as f32);
            }
        });

        let id = Uuid::new_v4();
        self.tasks.insert(id, handle);
        debug!("Simulated accelerometer subscription {} every {:?}", id, period);
        Some(id)
    }

    fn unregister(&self, subscription: Uuid) {
        if let Some((_, handle)) = self.tasks.remove(&subscription) {
            handle.abort();
        }
    }
}

impl Drop for SimulatedSensors {
    fn drop(&mut self) {
        self.tasks.iter().for_each(|entry| entry.value().abort());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn collecting_sink() -> (AccelerometerSink, Arc<Mutex<Vec<[f32; 3]>>>) {
        let samples = Arc::new(Mutex::new(Vec::new()));
        let sink: AccelerometerSink = {
            let samples = samples.clone();
            Arc::new(move |x, y, z| samples.lock().unwrap().push([x, y, z]))
        };
        (sink, samples)
    }

    #[test]
    fn test_requires_runtime() {
        assert!(matches!(
            SimulatedSensors::new(true, 0.0),
            Err(SensorStateError::Runtime(_))
        ));
    }

    #[tokio::test]
    async fn test_delivers_gravity_samples() {
        let sensors = SimulatedSensors::new(true, 0.0).unwrap();
        let (sink, samples) = collecting_sink();

        let id = sensors
            .register_accelerometer_listener(sink, SamplingHint::Custom(5))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        sensors.unregister(id);

        let samples = samples.lock().unwrap();
        assert!(!samples.is_empty());
        for [x, y, z] in samples.iter() {
            assert!(x.abs() <= 0.31 && y.abs() <= 0.31);
            assert!((*z as f64 - GRAVITY).abs() < 1e-3);
        }
    }

    #[tokio::test]
    async fn test_unregister_stops_delivery() {
        let sensors = SimulatedSensors::new(true, 0.05).unwrap();
        let (sink, samples) = collecting_sink();

        let id = sensors
            .register_accelerometer_listener(sink, SamplingHint::Custom(5))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        sensors.unregister(id);
        assert_eq!(sensors.active_subscriptions(), 0);

        tokio::time::sleep(Duration::from_millis(20)).await;
        let delivered = samples.lock().unwrap().len();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(samples.lock().unwrap().len(), delivered);
    }

    #[tokio::test]
    async fn test_unavailable_device() {
        let sensors = SimulatedSensors::new(false, 0.0).unwrap();
        let (sink, _) = collecting_sink();
        assert!(sensors
            .register_accelerometer_listener(sink, SamplingHint::Normal)
            .is_none());
        assert_eq!(sensors.active_subscriptions(), 0);
    }
}
