use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use common::constants::N_AXES;
use common::traits::SensorPort;
use common::types::{AccelerometerSink, SamplingHint};

/// Accelerometer provider driven by the test through [`MockSensorPort::emit`].
#[derive(Default)]
pub struct MockSensorPort {
    sinks: DashMap<Uuid, AccelerometerSink>,
    register_calls: AtomicUsize,
    unregister_calls: AtomicUsize,
    unavailable: AtomicBool,
    last_hint: Mutex<Option<SamplingHint>>,
}

impl MockSensorPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// A device without accelerometer: every registration is refused.
    pub fn without_accelerometer() -> Self {
        let port = Self::default();
        port.unavailable.store(true, Ordering::SeqCst);
        port
    }

    /// Delivers one sample to every active sink, on the calling thread.
    pub fn emit(&self, x: f32, y: f32, z: f32) {
        let sinks: Vec<AccelerometerSink> =
            self.sinks.iter().map(|entry| entry.value().clone()).collect();
        for sink in sinks {
            sink(x, y, z);
        }
    }

    pub fn replay(&self, samples: &[[f32; N_AXES]]) {
        for [x, y, z] in samples {
            self.emit(*x, *y, *z);
        }
    }

    pub fn active_subscriptions(&self) -> usize {
        self.sinks.len()
    }

    pub fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }

    pub fn unregister_calls(&self) -> usize {
        self.unregister_calls.load(Ordering::SeqCst)
    }

    pub fn last_sampling_hint(&self) -> Option<SamplingHint> {
        *self.last_hint.lock().unwrap()
    }
}

impl SensorPort for MockSensorPort {
    fn register_accelerometer_listener(
        &self,
        sink: AccelerometerSink,
        sampling_hint: SamplingHint,
    ) -> Option<Uuid> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return None;
        }
        *self.last_hint.lock().unwrap() = Some(sampling_hint);
        let id = Uuid::new_v4();
        self.sinks.insert(id, sink);
        Some(id)
    }

    fn unregister(&self, subscription: Uuid) {
        self.unregister_calls.fetch_add(1, Ordering::SeqCst);
        self.sinks.remove(&subscription);
    }
}
