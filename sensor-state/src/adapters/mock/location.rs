use dashmap::DashMap;
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use common::traits::{DeliveryContext, LocationPort};
use common::types::{LocationReading, LocationRequest, LocationSink, Priority};

use super::current_runtime;
use super::gaussian::GaussianNoise;
use crate::models::config::SimulationConfig;
use crate::models::errors::SensorStateError;

const GAUSSIAN_WALK_MEAN: f64 = 0f64;

/// Accuracy radius reported for each priority, in metres.
fn nominal_accuracy(priority: Priority) -> f32 {
    match priority {
        Priority::HighAccuracy => 5.0,
        Priority::Balanced => 40.0,
        Priority::LowPower => 150.0,
        Priority::Passive => 500.0,
    }
}

/// Location provider performing a random walk around a base coordinate, with
/// occasional deliveries that carry no fix.
pub struct SimulatedLocation {
    runtime: Handle,
    base: LocationReading,
    step: GaussianNoise,
    no_fix_probability: f64,
    tasks: DashMap<Uuid, JoinHandle<()>>,
}

impl SimulatedLocation {
    /// Returns a Runtime error when called outside of a tokio runtime.
    pub fn new(config: &SimulationConfig) -> Result<Self, SensorStateError> {
        config.validate()?;
        Ok(Self {
            runtime: current_runtime()?,
            base: LocationReading::new(config.base_latitude, config.base_longitude, 0.0),
            step: GaussianNoise::new(GAUSSIAN_WALK_MEAN, config.walk_stdev_degrees)?,
            no_fix_probability: config.no_fix_probability,
            tasks: DashMap::new(),
        })
    }

    pub fn active_subscriptions(&self) -> usize {
        self.tasks.len()
    }
}

impl LocationPort for SimulatedLocation {
    fn request_location_updates(
        &self,
        request: LocationRequest,
        sink: LocationSink,
        context: Arc<dyn DeliveryContext>,
    ) -> Uuid {
        let mut position = self.base;
        let step = self.step.clone();
        let no_fix_probability = self.no_fix_probability;
        let accuracy = nominal_accuracy(request.priority);

        let handle = self.runtime.spawn(async move {
            let mut rng = StdRng::from_entropy();
            let mut ticker = tokio::time::interval(request.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let result = if rng.gen_bool(no_fix_probability) {
                    None
                } else {
                    position.latitude = step.add_noise(&mut rng, position.latitude);
                    position.longitude = step.add_noise(&mut rng, position.longitude);
                    position.accuracy = accuracy * rng.gen_range(0.8f32..1.2f32);
                    Some(position)
                };
                let sink = sink.clone();
                context.dispatch(Box::new(move || sink(result)));
            }
        });

        let id = Uuid::new_v4();
        self.tasks.insert(id, handle);
        debug!(
            "Simulated location subscription {} every {:?}",
            id, request.interval
        );
        id
    }

    fn remove_updates(&self, subscription: Uuid) {
        if let Some((_, handle)) = self.tasks.remove(&subscription) {
            handle.abort();
        }
    }
}

impl Drop for SimulatedLocation {
    fn drop(&mut self) {
        self.tasks.iter().for_each(|entry| entry.value().abort());
    }
}
